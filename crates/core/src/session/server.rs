//! Lifecycle of a locally spawned chromedriver process.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tokio::time::sleep;
use tracing::debug;

use crate::error::{Result, WabError};

const STARTUP_ATTEMPTS: u32 = 25;
const STARTUP_POLL: Duration = Duration::from_millis(200);

/// A chromedriver child process bound to a local port.
///
/// The process is killed when this handle drops, so it must outlive every
/// session created against it.
#[derive(Debug)]
pub struct DriverServer {
	child: Child,
	url: String,
	port: u16,
}

impl DriverServer {
	/// Spawns chromedriver and waits until it accepts connections.
	pub async fn spawn(executable: &Path, port: u16) -> Result<Self> {
		debug!(
			target = "wab",
			exe = %executable.display(),
			port,
			"spawning webdriver server"
		);
		let child = Command::new(executable)
			.arg(format!("--port={port}"))
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.kill_on_drop(true)
			.spawn()
			.map_err(|err| {
				WabError::DriverServer(format!("failed to spawn {}: {err}", executable.display()))
			})?;

		let mut server = Self {
			child,
			url: format!("http://localhost:{port}"),
			port,
		};
		server.wait_until_accepting().await?;
		debug!(target = "wab", url = %server.url, "webdriver server accepting connections");
		Ok(server)
	}

	/// Endpoint sessions should be created against.
	pub fn url(&self) -> &str {
		&self.url
	}

	async fn wait_until_accepting(&mut self) -> Result<()> {
		for _ in 0..STARTUP_ATTEMPTS {
			if let Some(status) = self.child.try_wait()? {
				return Err(WabError::DriverServer(format!(
					"chromedriver exited during startup ({status}); is port {} already taken?",
					self.port
				)));
			}
			if TcpStream::connect(("127.0.0.1", self.port)).await.is_ok() {
				return Ok(());
			}
			sleep(STARTUP_POLL).await;
		}
		Err(WabError::DriverServer(format!(
			"chromedriver never accepted connections on port {}",
			self.port
		)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn missing_executable_reports_spawn_failure() {
		let err = DriverServer::spawn(Path::new("/definitely/not/chromedriver"), 19515)
			.await
			.unwrap_err();
		assert!(matches!(err, WabError::DriverServer(_)));
		assert!(err.to_string().contains("failed to spawn"));
	}

	#[cfg(unix)]
	#[tokio::test]
	async fn short_lived_process_reports_startup_exit() {
		// `true` exits immediately without ever listening.
		let err = DriverServer::spawn(Path::new("/bin/true"), 19516).await.unwrap_err();
		assert!(matches!(err, WabError::DriverServer(_)));
		assert!(err.to_string().contains("exited during startup"));
	}
}
