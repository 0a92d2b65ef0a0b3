//! Executable discovery for the browser binary and the webdriver server.

use std::path::PathBuf;

use tracing::debug;

/// Well-known Chrome/Chromium install locations, checked before PATH.
fn browser_candidates() -> Vec<PathBuf> {
	if cfg!(target_os = "windows") {
		let mut paths = vec![
			PathBuf::from(r"C:\Program Files\Google\Chrome\Application\chrome.exe"),
			PathBuf::from(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe"),
		];
		if let Ok(local) = std::env::var("LOCALAPPDATA") {
			paths.push(PathBuf::from(format!(r"{local}\Google\Chrome\Application\chrome.exe")));
		}
		paths
	} else if cfg!(target_os = "macos") {
		vec![PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome")]
	} else {
		vec![
			PathBuf::from("/usr/bin/google-chrome"),
			PathBuf::from("/usr/bin/google-chrome-stable"),
			PathBuf::from("/usr/bin/chromium"),
			PathBuf::from("/usr/bin/chromium-browser"),
		]
	}
}

const BROWSER_NAMES: &[&str] = &[
	"google-chrome",
	"google-chrome-stable",
	"chromium",
	"chromium-browser",
	"chrome",
];

/// Finds a Chrome/Chromium binary. `None` is not fatal; chromedriver can
/// usually discover one on its own.
pub fn browser_binary() -> Option<PathBuf> {
	if let Some(path) = browser_candidates().into_iter().find(|p| p.exists()) {
		debug!(target = "wab", path = %path.display(), "found browser binary");
		return Some(path);
	}
	BROWSER_NAMES.iter().find_map(|name| which::which(name).ok())
}

/// Finds chromedriver on PATH.
pub fn webdriver_server() -> Option<PathBuf> {
	which::which("chromedriver").ok()
}
