//! Integration tests for startup failure reporting.
//!
//! Input errors must be reported, with a non-zero exit, before any browser
//! or webdriver process is touched.

use std::path::PathBuf;
use std::process::Command;

fn wab_binary() -> PathBuf {
	let mut path = std::env::current_exe().unwrap();
	path.pop();
	path.pop();
	path.push("wab");
	path
}

fn run_wab(contacts: &std::path::Path) -> std::process::Output {
	Command::new(wab_binary())
		.arg(contacts)
		.output()
		.expect("failed to execute wab")
}

#[test]
fn missing_contact_file_fails_before_any_browser() {
	let output = run_wab(std::path::Path::new("/definitely/missing/contacts.xlsx"));

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("contact file not found"), "stderr: {stderr}");
}

#[test]
fn missing_required_column_fails_before_any_browser() {
	let dir = tempfile::TempDir::new().unwrap();
	let contacts = dir.path().join("contacts.csv");
	std::fs::write(&contacts, "number,text\n123,hi\n").unwrap();

	let output = run_wab(&contacts);

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("column"), "stderr: {stderr}");
}

#[test]
fn unusable_rows_only_fails_before_any_browser() {
	let dir = tempfile::TempDir::new().unwrap();
	let contacts = dir.path().join("contacts.csv");
	std::fs::write(&contacts, "phone,message\n,\n").unwrap();

	let output = run_wab(&contacts);

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("no usable rows"), "stderr: {stderr}");
}
