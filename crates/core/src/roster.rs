//! Recipient roster loading from tabular contact files.
//!
//! Supports spreadsheet workbooks (first sheet) and CSV. Both formats need a
//! `phone` and a `message` header column; rows missing either value are
//! dropped before they ever reach the dispatch loop.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, WabError};

pub const PHONE_COLUMN: &str = "phone";
pub const MESSAGE_COLUMN: &str = "message";

/// One deliverable (destination, message body) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
	pub phone: String,
	pub message: String,
}

impl Recipient {
	/// Builds a recipient from raw cell text, rejecting rows where either
	/// value trims to nothing.
	fn from_cells(phone: &str, message: &str) -> Option<Self> {
		let phone = phone.trim();
		let message = message.trim();
		if phone.is_empty() || message.is_empty() {
			return None;
		}
		Some(Self {
			phone: phone.to_string(),
			message: message.to_string(),
		})
	}
}

/// Loads the roster, picking the parser from the file extension.
///
/// Fails before any browser session exists when the file is missing, lacks
/// the required columns, or yields zero usable rows.
pub fn load(path: &Path) -> Result<Vec<Recipient>> {
	if !path.exists() {
		return Err(WabError::ContactsNotFound {
			path: path.to_path_buf(),
		});
	}

	let ext = path
		.extension()
		.and_then(|e| e.to_str())
		.map(str::to_ascii_lowercase);
	let roster = match ext.as_deref() {
		Some("xlsx" | "xlsm" | "xls" | "ods") => load_sheet(path)?,
		Some("csv") => load_csv(path)?,
		_ => {
			return Err(WabError::UnsupportedFormat {
				path: path.to_path_buf(),
			});
		}
	};

	if roster.is_empty() {
		return Err(WabError::EmptyRoster);
	}
	debug!(target = "wab", rows = roster.len(), "roster loaded");
	Ok(roster)
}

fn load_sheet(path: &Path) -> Result<Vec<Recipient>> {
	let mut workbook = open_workbook_auto(path)?;
	let range = workbook.worksheet_range_at(0).ok_or(WabError::EmptyRoster)??;

	let mut rows = range.rows();
	let header = rows.next().ok_or(WabError::EmptyRoster)?;
	let phone_col = column_index(header, PHONE_COLUMN)?;
	let message_col = column_index(header, MESSAGE_COLUMN)?;

	Ok(rows
		.filter_map(|row| {
			Recipient::from_cells(&cell_text(row.get(phone_col)), &cell_text(row.get(message_col)))
		})
		.collect())
}

fn column_index(header: &[Data], name: &'static str) -> Result<usize> {
	header
		.iter()
		.position(|cell| cell_text(Some(cell)).trim().eq_ignore_ascii_case(name))
		.ok_or(WabError::MissingColumn { column: name })
}

/// Renders a cell as text. Spreadsheets store phone numbers as floats, so
/// integral floats must come out digit-only.
fn cell_text(cell: Option<&Data>) -> String {
	match cell {
		None | Some(Data::Empty) => String::new(),
		Some(Data::String(s)) => s.clone(),
		Some(Data::Float(f)) if f.fract() == 0.0 => format!("{f:.0}"),
		Some(Data::Int(i)) => i.to_string(),
		Some(other) => other.to_string(),
	}
}

#[derive(Debug, Deserialize)]
struct CsvRow {
	#[serde(default)]
	phone: Option<String>,
	#[serde(default)]
	message: Option<String>,
}

fn load_csv(path: &Path) -> Result<Vec<Recipient>> {
	let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

	let headers: Vec<String> = reader
		.headers()?
		.iter()
		.map(|h| h.trim().to_ascii_lowercase())
		.collect();
	for required in [PHONE_COLUMN, MESSAGE_COLUMN] {
		if !headers.iter().any(|h| h == required) {
			return Err(WabError::MissingColumn { column: required });
		}
	}
	reader.set_headers(csv::StringRecord::from(headers));

	let mut roster = Vec::new();
	for row in reader.deserialize::<CsvRow>() {
		let row = row?;
		if let Some(recipient) = Recipient::from_cells(
			row.phone.as_deref().unwrap_or(""),
			row.message.as_deref().unwrap_or(""),
		) {
			roster.push(recipient);
		}
	}
	Ok(roster)
}
