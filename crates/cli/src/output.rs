//! Human console output: banner, progress lines, run summary.
//!
//! Everything here goes to stdout; diagnostics stay on stderr through the
//! tracing subscriber.

use std::path::Path;

use colored::Colorize;
use wab::{LoopEvent, Outcome, ProfileMode, RunSummary};

pub fn banner() {
	println!("{}", "WhatsApp bulk messenger".bold());
}

pub fn roster_loaded(count: usize, path: &Path) {
	println!("loaded {} recipient(s) from {}", count.to_string().cyan(), path.display());
}

/// First-run guidance; the QR handshake is the operator's job.
pub fn login_hint(mode: ProfileMode) {
	println!();
	if mode == ProfileMode::Ephemeral {
		println!("{}", "Temporary profile: scan the QR code with your phone to sign in.".yellow());
	} else {
		println!("If this is your first run, scan the QR code with your phone.");
		println!("Signed-in sessions are reused on later runs.");
	}
	println!("Waiting for WhatsApp Web to load...");
}

pub fn loop_event(event: &LoopEvent<'_>) {
	match event {
		LoopEvent::Starting { index, total, recipient } => {
			println!("[{index}/{total}] sending to {}...", recipient.phone.as_str().cyan());
		}
		LoopEvent::Finished { outcome, .. } => match outcome {
			Outcome::Sent => println!("    {}", "sent".green()),
			Outcome::Failed(reason) => println!("    {} {reason}", "failed:".red()),
		},
		LoopEvent::Interrupted { remaining } => {
			println!();
			println!("{} {remaining} recipient(s) left unsent", "interrupted:".yellow().bold());
		}
	}
}

pub fn summary(summary: &RunSummary) {
	println!();
	println!("{}", "summary".bold());
	println!("  {} {}", "sent:".green(), summary.sent);
	println!("  {} {}", "failed:".red(), summary.failed);
	println!("  total: {}", summary.total());
}

pub fn warn(message: &str) {
	eprintln!("{} {message}", "warning:".yellow().bold());
}

pub fn print_error(err: &anyhow::Error) {
	eprintln!("{} {err:#}", "error:".red().bold());
}
