//! Sequential dispatch loop with per-recipient fault isolation.
//!
//! The loop never aborts because of a recipient: [`Sender::send`] returns an
//! [`Outcome`], not a `Result`, so every failure is folded into accounting
//! and the next recipient proceeds.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::roster::Recipient;

/// Terminal state of one recipient's send cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Sent,
	Failed(String),
}

/// Aggregate accounting for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
	pub sent: usize,
	pub failed: usize,
	/// True when the loop stopped early on an interrupt.
	pub interrupted: bool,
}

impl RunSummary {
	pub fn record(&mut self, outcome: &Outcome) {
		match outcome {
			Outcome::Sent => self.sent += 1,
			Outcome::Failed(_) => self.failed += 1,
		}
	}

	pub fn total(&self) -> usize {
		self.sent + self.failed
	}
}

/// Cooperative stop signal, consulted between recipients only. An in-flight
/// send always runs to completion.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set(&self) {
		self.0.store(true, Ordering::Relaxed);
	}

	pub fn is_set(&self) -> bool {
		self.0.load(Ordering::Relaxed)
	}
}

/// One full send cycle for one recipient, pacing included.
#[async_trait]
pub trait Sender {
	async fn send(&mut self, recipient: &Recipient) -> Outcome;
}

/// Loop progress notifications for the presentation layer.
#[derive(Debug)]
pub enum LoopEvent<'a> {
	Starting {
		index: usize,
		total: usize,
		recipient: &'a Recipient,
	},
	Finished {
		index: usize,
		total: usize,
		outcome: &'a Outcome,
	},
	Interrupted {
		remaining: usize,
	},
}

/// Drives every recipient through `sender`, in source order, one at a time.
pub async fn run_loop<S>(
	sender: &mut S,
	roster: &[Recipient],
	stop: &StopFlag,
	mut notify: impl FnMut(LoopEvent<'_>) + Send,
) -> RunSummary
where
	S: Sender + Send,
{
	let total = roster.len();
	let mut summary = RunSummary::default();

	for (index, recipient) in roster.iter().enumerate() {
		if stop.is_set() {
			summary.interrupted = true;
			notify(LoopEvent::Interrupted {
				remaining: total - index,
			});
			break;
		}

		notify(LoopEvent::Starting {
			index: index + 1,
			total,
			recipient,
		});
		let outcome = sender.send(recipient).await;
		summary.record(&outcome);
		notify(LoopEvent::Finished {
			index: index + 1,
			total,
			outcome: &outcome,
		});
	}

	summary
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Scripted {
		outcomes: Vec<Outcome>,
		sent_to: Vec<String>,
	}

	impl Scripted {
		fn new(outcomes: Vec<Outcome>) -> Self {
			Self {
				outcomes,
				sent_to: Vec::new(),
			}
		}
	}

	#[async_trait]
	impl Sender for Scripted {
		async fn send(&mut self, recipient: &Recipient) -> Outcome {
			self.sent_to.push(recipient.phone.clone());
			self.outcomes.remove(0)
		}
	}

	fn roster(n: usize) -> Vec<Recipient> {
		(0..n)
			.map(|i| Recipient {
				phone: format!("91000000000{i}"),
				message: "hello".to_string(),
			})
			.collect()
	}

	#[test]
	fn summary_totals_add_up() {
		let mut summary = RunSummary::default();
		summary.record(&Outcome::Sent);
		summary.record(&Outcome::Failed("boom".into()));
		summary.record(&Outcome::Sent);
		assert_eq!(summary.sent, 2);
		assert_eq!(summary.failed, 1);
		assert_eq!(summary.total(), summary.sent + summary.failed);
	}

	#[tokio::test]
	async fn failures_do_not_abort_the_loop() {
		let roster = roster(3);
		let mut sender = Scripted::new(vec![
			Outcome::Failed("could not find the message input box".into()),
			Outcome::Sent,
			Outcome::Sent,
		]);

		let summary = run_loop(&mut sender, &roster, &StopFlag::new(), |_| {}).await;

		assert_eq!(sender.sent_to.len(), 3);
		assert_eq!(summary.sent, 2);
		assert_eq!(summary.failed, 1);
		assert_eq!(summary.total(), 3);
		assert!(!summary.interrupted);
	}

	#[tokio::test]
	async fn recipients_are_processed_in_source_order() {
		let roster = roster(3);
		let mut sender = Scripted::new(vec![Outcome::Sent, Outcome::Sent, Outcome::Sent]);

		run_loop(&mut sender, &roster, &StopFlag::new(), |_| {}).await;

		assert_eq!(sender.sent_to, vec!["910000000000", "910000000001", "910000000002"]);
	}

	#[tokio::test]
	async fn stop_flag_halts_between_recipients() {
		let roster = roster(4);
		let mut sender = Scripted::new(vec![Outcome::Sent; 4]);
		let stop = StopFlag::new();

		let stop_after_two = stop.clone();
		let summary = run_loop(&mut sender, &roster, &stop, move |event| {
			if let LoopEvent::Finished { index: 2, .. } = event {
				stop_after_two.set();
			}
		})
		.await;

		assert_eq!(sender.sent_to.len(), 2);
		assert_eq!(summary.total(), 2);
		assert!(summary.interrupted);
	}

	#[tokio::test]
	async fn empty_roster_produces_an_untouched_summary() {
		let mut sender = Scripted::new(Vec::new());
		let summary = run_loop(&mut sender, &[], &StopFlag::new(), |_| {}).await;
		assert_eq!(summary, RunSummary::default());
	}
}
