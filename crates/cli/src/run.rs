//! End-to-end run orchestration: roster, webdriver server, session
//! bootstrap, readiness gate, dispatch loop, summary.

use anyhow::anyhow;
use tracing::{info, warn};
use wab::{DriverServer, ProfileMode, Session, StopFlag, discover, roster, run_loop};

use crate::cli::Cli;
use crate::output;

pub async fn execute(cli: Cli) -> anyhow::Result<()> {
	output::banner();

	// Input errors are fatal before any browser session exists.
	let roster = roster::load(&cli.contacts)?;
	output::roster_loaded(roster.len(), &cli.contacts);

	// The spawned chromedriver must stay alive for the whole run.
	let (webdriver_url, _server) = resolve_webdriver(&cli).await?;

	let mut config = cli.session_config(webdriver_url);
	if config.binary.is_none() {
		config.binary = discover::browser_binary();
		if config.binary.is_none() {
			output::warn("no Chrome/Chromium binary found; relying on chromedriver's own discovery");
		}
	}

	let mut session = Session::bootstrap(config).await?;
	if session.profile_mode() == ProfileMode::Ephemeral {
		output::warn("saved login is not available on the temporary profile this run");
	}
	output::login_hint(session.profile_mode());

	if let Err(err) = session.await_ready().await {
		// Conservative abort: a half-loaded UI is worse than no run at all.
		let _ = session.close().await;
		return Err(err.into());
	}

	let stop = StopFlag::new();
	let interrupt = stop.clone();
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			warn!(target = "wab", "interrupt received, stopping after the current recipient");
			interrupt.set();
		}
	});

	let summary = run_loop(&mut session, &roster, &stop, |event| output::loop_event(&event)).await;

	session.close().await?;
	output::summary(&summary);
	Ok(())
}

async fn resolve_webdriver(cli: &Cli) -> anyhow::Result<(String, Option<DriverServer>)> {
	if let Some(url) = &cli.webdriver_url {
		info!(target = "wab", %url, "attaching to external webdriver server");
		return Ok((url.clone(), None));
	}

	let exe = discover::webdriver_server().ok_or_else(|| {
		anyhow!("chromedriver not found on PATH; install it or pass --webdriver-url for a running server")
	})?;
	let server = DriverServer::spawn(&exe, cli.driver_port).await?;
	Ok((server.url().to_string(), Some(server)))
}
