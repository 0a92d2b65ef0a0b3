use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Fully owned browser-session configuration.
///
/// This type is the stable handoff between the CLI surface and the session
/// bootstrap internals.
#[derive(Debug, Clone)]
pub struct SessionConfig {
	/// Profile directory backing the primary launch attempt.
	pub profile_dir: PathBuf,
	/// Explicit browser binary; left to driver discovery when absent.
	pub binary: Option<PathBuf>,
	/// WebDriver server endpoint sessions are created against.
	pub webdriver_url: String,
	/// Whether the browser launches headless.
	pub headless: bool,
	/// Messaging app origin; the entry page and deep links hang off this.
	pub base_url: Url,
	/// Bounded-wait policy for UI presence queries.
	pub wait: WaitPolicy,
	/// Unconditional pauses between interaction steps.
	pub pacing: Pacing,
}

impl SessionConfig {
	/// Creates a baseline config with default wait and pacing behavior.
	pub fn new(profile_dir: impl Into<PathBuf>, webdriver_url: impl Into<String>, base_url: Url) -> Self {
		Self {
			profile_dir: profile_dir.into(),
			binary: None,
			webdriver_url: webdriver_url.into(),
			headless: false,
			base_url,
			wait: WaitPolicy::default(),
			pacing: Pacing::default(),
		}
	}
}

/// Bounded-wait policy for presence queries against the external UI.
///
/// The app exposes no reliable load events, so every wait is either a poll
/// bounded by `ready_timeout` or an unconditional settle pause.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
	/// Upper bound for any single presence query.
	pub ready_timeout: Duration,
	/// Poll cadence while a presence query is outstanding.
	pub poll_interval: Duration,
	/// Settle pause after the readiness marker appears; presence does not
	/// imply interactivity.
	pub ready_grace: Duration,
}

impl Default for WaitPolicy {
	fn default() -> Self {
		Self {
			ready_timeout: Duration::from_secs(30),
			poll_interval: Duration::from_millis(500),
			ready_grace: Duration::from_secs(3),
		}
	}
}

/// Unconditional pauses covering UI transitions that expose no event.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
	/// After deep-link navigation, before touching the chat surface.
	pub chat_open: Duration,
	/// After clicking the composer, before typing.
	pub focus_settle: Duration,
	/// After typing, before the submitting keystroke.
	pub pre_submit: Duration,
	/// Courtesy delay after a delivered message, to stay under the app's
	/// abuse heuristics.
	pub after_sent: Duration,
	/// Shorter delay after a failed attempt.
	pub after_failure: Duration,
}

impl Default for Pacing {
	fn default() -> Self {
		Self {
			chat_open: Duration::from_secs(4),
			focus_settle: Duration::from_secs(1),
			pre_submit: Duration::from_secs(1),
			after_sent: Duration::from_secs(3),
			after_failure: Duration::from_secs(2),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn baseline_config_targets_a_visible_persistent_browser() {
		let base = Url::parse("https://web.whatsapp.com").unwrap();
		let cfg = SessionConfig::new("./wa-profile", "http://localhost:9515", base);
		assert!(!cfg.headless);
		assert!(cfg.binary.is_none());
		assert_eq!(cfg.wait.ready_timeout, Duration::from_secs(30));
	}

	#[test]
	fn success_delay_exceeds_failure_delay() {
		let pacing = Pacing::default();
		assert!(pacing.after_sent > pacing.after_failure);
	}
}
