//! Bulk message dispatch over WhatsApp Web, driven through a real browser.
//!
//! The pipeline: load a recipient roster from a tabular contact file,
//! bootstrap one reusable browser session (persistent profile, with a
//! single ephemeral-profile fallback on conflict), wait for the app to be
//! ready, then walk the roster sequentially with per-recipient fault
//! isolation and aggregate accounting.

pub mod compose;
pub mod discover;
pub mod dispatch;
pub mod error;
pub mod roster;
pub mod session;

pub use dispatch::{LoopEvent, Outcome, RunSummary, Sender, StopFlag, run_loop};
pub use error::{Result, WabError};
pub use roster::Recipient;
pub use session::{DriverServer, Pacing, ProfileMode, Session, SessionConfig, WaitPolicy};
