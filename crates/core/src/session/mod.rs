//! Browser session bootstrap and the per-recipient send cycle.

mod builder;
mod config;
mod launcher;
mod server;

use async_trait::async_trait;
use tempfile::TempDir;
use thirtyfour::prelude::*;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub use config::{Pacing, SessionConfig, WaitPolicy};
pub use launcher::{ChromeLauncher, LaunchFailure, LaunchPlan, Launcher, ProfileMode};
pub use server::DriverServer;

use crate::compose::{self, Stroke};
use crate::dispatch::{Outcome, Sender};
use crate::error::{Result, WabError};
use crate::roster::Recipient;

/// Chat-list search box; only present once the app has loaded and the user
/// is authenticated.
const READY_MARKER: &str = r#"//div[@contenteditable="true"][@data-tab="3"]"#;

/// The single live browser session for a run.
///
/// Exclusively owned by the run controller; every recipient reuses it
/// sequentially. Closing it (or dropping it on the interrupt path) releases
/// the browser.
pub struct Session {
	driver: WebDriver,
	config: SessionConfig,
	mode: ProfileMode,
	#[allow(dead_code, reason = "RAII: keeps the fallback profile directory alive until close")]
	ephemeral_profile: Option<TempDir>,
}

impl Session {
	/// Starts the browser session and, as the final bootstrap step,
	/// navigates to the app entry page.
	pub async fn bootstrap(config: SessionConfig) -> Result<Self> {
		let mut launcher = ChromeLauncher {
			webdriver_url: config.webdriver_url.clone(),
			binary: config.binary.clone(),
			headless: config.headless,
		};
		let booted = builder::start(&mut launcher, &config).await?;
		let session = Self {
			driver: booted.handle,
			mode: booted.mode,
			ephemeral_profile: booted.ephemeral_profile,
			config,
		};
		session.driver.goto(session.config.base_url.as_str()).await?;
		info!(target = "wab", mode = %session.mode, "browser session ready");
		Ok(session)
	}

	/// How this session's profile directory was sourced.
	pub fn profile_mode(&self) -> ProfileMode {
		self.mode
	}

	/// Blocks until the app reports loaded and authenticated, then lets the
	/// UI settle before anything touches it.
	pub async fn await_ready(&self) -> Result<()> {
		let wait = self.config.wait;
		self.driver
			.query(By::XPath(READY_MARKER))
			.wait(wait.ready_timeout, wait.poll_interval)
			.first()
			.await
			.map_err(|_| WabError::Timeout {
				what: "the app to finish loading",
				timeout: wait.ready_timeout,
			})?;
		debug!(target = "wab", "readiness marker present");
		sleep(wait.ready_grace).await;
		Ok(())
	}

	/// Ends the session and releases the browser.
	pub async fn close(self) -> Result<()> {
		self.driver.quit().await?;
		Ok(())
	}

	/// The fallible middle of a send cycle: navigate, locate, inject,
	/// submit. The caller folds any error into the recipient's outcome.
	async fn try_send(&self, recipient: &Recipient) -> Result<()> {
		let pacing = self.config.pacing;
		let destination = compose::normalize_destination(&recipient.phone);
		let url = compose::chat_url(&self.config.base_url, &destination);

		self.driver.goto(url.as_str()).await?;
		// No "chat opened" event exists; give the conversation time to load.
		sleep(pacing.chat_open).await;

		let composer = self.find_composer().await?;
		composer.click().await?;
		sleep(pacing.focus_settle).await;

		for stroke in compose::keystroke_plan(&recipient.message) {
			match stroke {
				Stroke::Text(text) => composer.send_keys(text).await?,
				Stroke::SoftNewline => composer.send_keys(compose::soft_newline_keys()).await?,
				Stroke::Submit => {
					sleep(pacing.pre_submit).await;
					composer.send_keys(compose::submit_keys()).await?;
				}
			}
		}
		Ok(())
	}

	/// Finds the message-compose box, trying each known editor variant in
	/// order within the bounded wait.
	async fn find_composer(&self) -> Result<WebElement> {
		let wait = self.config.wait;
		compose::first_present(compose::COMPOSE_LOCATORS, |locator| async move {
			self.driver
				.query(By::XPath(locator))
				.wait(wait.ready_timeout, wait.poll_interval)
				.first()
				.await
		})
		.await
		.ok_or(WabError::ComposerNotFound)
	}
}

#[async_trait]
impl Sender for Session {
	async fn send(&mut self, recipient: &Recipient) -> Outcome {
		let pacing = self.config.pacing;
		match self.try_send(recipient).await {
			Ok(()) => {
				// Courtesy delay so back-to-back sends don't look automated.
				sleep(pacing.after_sent).await;
				Outcome::Sent
			}
			Err(err) => {
				warn!(target = "wab", phone = %recipient.phone, error = %err, "send failed");
				sleep(pacing.after_failure).await;
				Outcome::Failed(err.to_string())
			}
		}
	}
}
