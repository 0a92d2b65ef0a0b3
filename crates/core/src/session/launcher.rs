//! The session-creation boundary.
//!
//! Launch failures are classified here, once, into a closed set; the
//! bootstrap policy upstream matches on [`LaunchFailure`] kinds and never
//! sees raw driver errors.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use thirtyfour::ChromeCapabilities;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use tracing::debug;

/// Closed classification of a failed launch attempt.
#[derive(Debug, thiserror::Error)]
pub enum LaunchFailure {
	/// The profile directory is held by another browser instance, or the
	/// debugging endpoint never came up. One ephemeral-profile retry is
	/// worthwhile.
	#[error("profile conflict: {0}")]
	ProfileConflict(String),
	/// Anything else. Not retried.
	#[error("{0}")]
	Other(String),
}

/// How the live session's profile directory was sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMode {
	/// Reuses the on-disk profile, carrying authentication across runs.
	Persistent,
	/// Fresh throwaway profile; a new login handshake is required.
	Ephemeral,
}

impl fmt::Display for ProfileMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ProfileMode::Persistent => write!(f, "persistent"),
			ProfileMode::Ephemeral => write!(f, "ephemeral"),
		}
	}
}

/// One launch attempt's inputs.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
	pub profile_dir: PathBuf,
	pub mode: ProfileMode,
}

impl LaunchPlan {
	pub fn persistent(dir: impl Into<PathBuf>) -> Self {
		Self {
			profile_dir: dir.into(),
			mode: ProfileMode::Persistent,
		}
	}

	pub fn ephemeral(dir: impl Into<PathBuf>) -> Self {
		Self {
			profile_dir: dir.into(),
			mode: ProfileMode::Ephemeral,
		}
	}
}

/// Session-creation seam. Generic so the bootstrap policy is exercisable
/// without a browser.
#[async_trait]
pub trait Launcher {
	type Handle: Send;

	async fn launch(&mut self, plan: &LaunchPlan) -> Result<Self::Handle, LaunchFailure>;
}

/// Production launcher: assembles Chrome capabilities and creates a
/// WebDriver session against a chromedriver endpoint.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
	pub webdriver_url: String,
	pub binary: Option<PathBuf>,
	pub headless: bool,
}

#[async_trait]
impl Launcher for ChromeLauncher {
	type Handle = WebDriver;

	async fn launch(&mut self, plan: &LaunchPlan) -> Result<WebDriver, LaunchFailure> {
		let caps = self
			.capabilities(plan)
			.map_err(|err| LaunchFailure::Other(err.to_string()))?;
		debug!(
			target = "wab",
			profile = %plan.profile_dir.display(),
			mode = %plan.mode,
			"creating browser session"
		);
		WebDriver::new(&self.webdriver_url, caps).await.map_err(classify)
	}
}

impl ChromeLauncher {
	fn capabilities(&self, plan: &LaunchPlan) -> WebDriverResult<ChromeCapabilities> {
		let mut caps = DesiredCapabilities::chrome();
		caps.add_arg(&format!("--user-data-dir={}", plan.profile_dir.display()))?;
		// chromedriver's own logging drowns the console otherwise.
		caps.insert_browser_option("excludeSwitches", ["enable-logging"])?;
		if let Some(binary) = &self.binary {
			caps.set_binary(&binary.to_string_lossy())?;
		}
		if self.headless {
			caps.add_arg("--headless=new")?;
		}
		if plan.mode == ProfileMode::Ephemeral {
			// Flags the stale-profile retry needs to come up on locked-down
			// and shared-memory-starved hosts.
			caps.add_arg("--remote-debugging-port=9222")?;
			caps.add_arg("--disable-gpu")?;
			caps.add_arg("--no-sandbox")?;
			caps.add_arg("--disable-dev-shm-usage")?;
		}
		Ok(caps)
	}
}

/// Maps a raw session-creation error onto the closed [`LaunchFailure`] set.
fn classify(err: WebDriverError) -> LaunchFailure {
	classify_text(err.to_string())
}

/// chromedriver reports a held profile differently across versions; every
/// marker below means the same single ephemeral-profile retry applies.
const CONFLICT_MARKERS: &[&str] = &[
	"user data directory is already in use",
	"DevToolsActivePort",
	"session not created",
];

fn classify_text(text: String) -> LaunchFailure {
	if CONFLICT_MARKERS.iter().any(|marker| text.contains(marker)) {
		LaunchFailure::ProfileConflict(text)
	} else {
		LaunchFailure::Other(text)
	}
}
