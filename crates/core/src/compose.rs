//! Message composition primitives.
//!
//! Everything here is decided before the browser is touched: destination
//! normalization, click-to-chat deep links, and the typed keystroke plan
//! that preserves multi-line bodies without submitting early.

use std::future::Future;

use thirtyfour::Key;
use url::Url;

/// Composer locators, tried in order. WhatsApp Web has shipped two editor
/// implementations; the data-tab box is the common one, the lexical editor
/// appears on newer builds.
pub const COMPOSE_LOCATORS: &[&str] = &[
	r#"//div[@contenteditable="true"][@data-tab="10"]"#,
	r#"//div[@contenteditable="true"][@data-lexical-editor="true"]"#,
];

/// Strips whitespace, `+` prefixes, and embedded spaces from a destination.
pub fn normalize_destination(raw: &str) -> String {
	raw.trim().replace(['+', ' '], "")
}

/// Click-to-chat deep link for a normalized destination.
pub fn chat_url(base: &Url, destination: &str) -> String {
	format!("{}/send?phone={}", base.as_str().trim_end_matches('/'), destination)
}

/// One unit of composer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stroke {
	/// Literal text typed into the composer.
	Text(String),
	/// Shift+enter: line break without submitting.
	SoftNewline,
	/// Hard enter: sends the message.
	Submit,
}

/// Lowers a message body into composer strokes: each line's text, a soft
/// newline after every line but the last, and a single trailing submit.
/// Carriage returns from CRLF input are dropped.
pub fn keystroke_plan(body: &str) -> Vec<Stroke> {
	let mut plan = Vec::new();
	let mut lines = body.split('\n').map(|line| line.trim_end_matches('\r')).peekable();
	while let Some(line) = lines.next() {
		plan.push(Stroke::Text(line.to_string()));
		if lines.peek().is_some() {
			plan.push(Stroke::SoftNewline);
		}
	}
	plan.push(Stroke::Submit);
	plan
}

/// Key sequence for a line break that must not submit.
pub(crate) fn soft_newline_keys() -> String {
	String::from_iter([char::from(Key::Shift), char::from(Key::Enter)])
}

/// Key sequence that submits the composed message.
pub(crate) fn submit_keys() -> String {
	char::from(Key::Enter).to_string()
}

/// Probes `locators` in order and returns the first hit, falling through to
/// the next locator on any probe failure.
pub(crate) async fn first_present<T, E, Fut>(
	locators: &'static [&'static str],
	mut probe: impl FnMut(&'static str) -> Fut,
) -> Option<T>
where
	Fut: Future<Output = std::result::Result<T, E>>,
{
	for locator in locators {
		if let Ok(found) = probe(locator).await {
			return Some(found);
		}
	}
	None
}

#[cfg(test)]
mod tests {
	use super::*;

	fn strokes(body: &str) -> (usize, usize, usize) {
		let plan = keystroke_plan(body);
		let text = plan.iter().filter(|s| matches!(s, Stroke::Text(_))).count();
		let soft = plan.iter().filter(|s| matches!(s, Stroke::SoftNewline)).count();
		let submit = plan.iter().filter(|s| matches!(s, Stroke::Submit)).count();
		(text, soft, submit)
	}

	#[test]
	fn destination_drops_plus_and_spaces() {
		assert_eq!(normalize_destination("+91 98765 43210"), "919876543210");
		assert_eq!(normalize_destination("  919876543210  "), "919876543210");
		assert_eq!(normalize_destination("919876543210"), "919876543210");
	}

	#[test]
	fn chat_url_embeds_normalized_digits() {
		let base = Url::parse("https://web.whatsapp.com").unwrap();
		assert_eq!(
			chat_url(&base, &normalize_destination("+91 98765 43210")),
			"https://web.whatsapp.com/send?phone=919876543210"
		);
	}

	#[test]
	fn single_line_body_is_text_then_submit() {
		let plan = keystroke_plan("Hello");
		assert_eq!(plan, vec![Stroke::Text("Hello".into()), Stroke::Submit]);
	}

	#[test]
	fn k_line_breaks_produce_k_soft_newlines_and_one_submit() {
		assert_eq!(strokes("Hi\nThere"), (2, 1, 1));
		assert_eq!(strokes("a\nb\nc\nd"), (4, 3, 1));
	}

	#[test]
	fn submit_is_always_last() {
		let plan = keystroke_plan("one\ntwo");
		assert_eq!(plan.last(), Some(&Stroke::Submit));
	}

	#[test]
	fn crlf_bodies_keep_no_carriage_returns() {
		let plan = keystroke_plan("one\r\ntwo");
		assert_eq!(
			plan,
			vec![
				Stroke::Text("one".into()),
				Stroke::SoftNewline,
				Stroke::Text("two".into()),
				Stroke::Submit,
			]
		);
	}

	#[tokio::test]
	async fn fallback_probes_second_locator_after_primary_misses() {
		let mut tried = Vec::new();
		let found = first_present(COMPOSE_LOCATORS, |locator| {
			tried.push(locator);
			let hit = tried.len() == 2;
			async move {
				if hit { Ok(locator) } else { Err("not found") }
			}
		})
		.await;

		assert_eq!(found, Some(COMPOSE_LOCATORS[1]));
		assert_eq!(tried, COMPOSE_LOCATORS.to_vec());
	}

	#[tokio::test]
	async fn fallback_stops_at_first_hit() {
		let mut tried = 0usize;
		let found = first_present(COMPOSE_LOCATORS, |locator| {
			tried += 1;
			async move { Ok::<_, ()>(locator) }
		})
		.await;

		assert_eq!(found, Some(COMPOSE_LOCATORS[0]));
		assert_eq!(tried, 1);
	}

	#[tokio::test]
	async fn fallback_exhausts_to_none() {
		let found: Option<()> = first_present(COMPOSE_LOCATORS, |_| async { Err("no") }).await;
		assert!(found.is_none());
	}
}
