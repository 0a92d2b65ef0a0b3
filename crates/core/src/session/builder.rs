//! Bootstrap launch policy: one persistent-profile attempt, and on a
//! classified profile conflict exactly one retry on a throwaway profile.

use tempfile::TempDir;
use tracing::warn;

use super::config::SessionConfig;
use super::launcher::{LaunchFailure, LaunchPlan, Launcher, ProfileMode};
use crate::error::{Result, WabError};

/// What a successful bootstrap attempt produced.
#[derive(Debug)]
pub(crate) struct Bootstrapped<H> {
	pub handle: H,
	pub mode: ProfileMode,
	/// Owns the fallback profile directory for the session's lifetime.
	pub ephemeral_profile: Option<TempDir>,
}

/// Runs the launch policy against `launcher`.
///
/// The fallback profile never inherits the persistent profile's state, so a
/// degraded run needs a fresh authentication handshake. Non-conflict
/// failures are terminal with no retry.
pub(crate) async fn start<L>(launcher: &mut L, config: &SessionConfig) -> Result<Bootstrapped<L::Handle>>
where
	L: Launcher + Send,
{
	let primary = LaunchPlan::persistent(config.profile_dir.clone());
	match launcher.launch(&primary).await {
		Ok(handle) => Ok(Bootstrapped {
			handle,
			mode: ProfileMode::Persistent,
			ephemeral_profile: None,
		}),
		Err(LaunchFailure::ProfileConflict(reason)) => {
			warn!(
				target = "wab",
				%reason,
				"persistent profile unavailable, retrying once with a temporary profile"
			);
			let temp = TempDir::with_prefix("wab-profile-")?;
			let fallback = LaunchPlan::ephemeral(temp.path());
			let handle = launcher
				.launch(&fallback)
				.await
				.map_err(|err| WabError::FallbackLaunch(err.to_string()))?;
			Ok(Bootstrapped {
				handle,
				mode: ProfileMode::Ephemeral,
				ephemeral_profile: Some(temp),
			})
		}
		Err(err @ LaunchFailure::Other(_)) => Err(WabError::Launch(err.to_string())),
	}
}
