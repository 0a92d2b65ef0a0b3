use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WabError>;

#[derive(Debug, Error)]
pub enum WabError {
	#[error("contact file not found: {}", .path.display())]
	ContactsNotFound { path: PathBuf },

	#[error("contact file has no '{column}' column (needs 'phone' and 'message' headers)")]
	MissingColumn { column: &'static str },

	#[error("contact file has no usable rows (each row needs both a phone and a message)")]
	EmptyRoster,

	#[error("unsupported contact file format: {} (expected .xlsx or .csv)", .path.display())]
	UnsupportedFormat { path: PathBuf },

	#[error("failed to read spreadsheet: {0}")]
	Sheet(#[from] calamine::Error),

	#[error("failed to read csv: {0}")]
	Csv(#[from] csv::Error),

	#[error("webdriver server: {0}")]
	DriverServer(String),

	#[error("browser launch failed: {0}")]
	Launch(String),

	#[error("browser launch failed again on the temporary profile: {0}")]
	FallbackLaunch(String),

	#[error("timed out after {}s waiting for {what}", .timeout.as_secs())]
	Timeout { what: &'static str, timeout: Duration },

	#[error("could not find the message input box")]
	ComposerNotFound,

	#[error(transparent)]
	WebDriver(#[from] thirtyfour::error::WebDriverError),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
