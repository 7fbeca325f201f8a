//! Browser discovery and launch configuration.
//!
//! Browser binaries are provisioned externally; nothing is downloaded. The
//! executable is located here so the search order is ours, then handed to
//! chromiumoxide as a [`BrowserConfig`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use chromiumoxide::BrowserConfig;
use tracing::warn;

use crate::error::{Error, Result};

/// Environment variables consulted for an explicit browser path, in order.
const BROWSER_ENV_VARS: [&str; 2] = ["HOVERPROBE_BROWSER", "CHROME_PATH"];

/// Options controlling how the browser process is started.
#[derive(Debug, Clone)]
pub struct LaunchOptions {
	/// Explicit browser executable; discovered when `None`.
	pub executable: Option<PathBuf>,
	/// Run without a visible window.
	pub headless: bool,
	/// Pass `--no-sandbox` (required when running as root in containers).
	pub no_sandbox: bool,
	/// Initial window size in CSS pixels.
	pub window_size: Option<(u32, u32)>,
	/// Additional command-line switches.
	pub extra_args: Vec<String>,
	/// How long the browser may take to come up.
	pub startup_timeout: Duration,
}

impl Default for LaunchOptions {
	fn default() -> Self {
		Self {
			executable: None,
			headless: true,
			no_sandbox: false,
			window_size: None,
			extra_args: Vec::new(),
			startup_timeout: Duration::from_secs(20),
		}
	}
}

impl LaunchOptions {
	/// Switches passed on top of chromiumoxide's defaults.
	pub(crate) fn switches(&self) -> Vec<String> {
		let mut args = vec!["--allow-file-access-from-files".to_string()];
		if self.headless {
			args.push("--hide-scrollbars".to_string());
			args.push("--mute-audio".to_string());
		}
		args.extend(self.extra_args.iter().cloned());
		args
	}

	/// Builds the chromiumoxide config for `executable` with a private
	/// profile directory.
	pub(crate) fn browser_config(&self, executable: &Path, profile_dir: &Path) -> Result<BrowserConfig> {
		let mut builder = BrowserConfig::builder()
			.chrome_executable(executable)
			.user_data_dir(profile_dir)
			.launch_timeout(self.startup_timeout)
			.viewport(None);

		if !self.headless {
			builder = builder.with_head();
		}
		if self.no_sandbox {
			builder = builder.no_sandbox();
		}
		if let Some((width, height)) = self.window_size {
			builder = builder.window_size(width, height);
		}
		for arg in self.switches() {
			builder = builder.arg(arg);
		}

		builder.build().map_err(Error::LaunchFailed)
	}
}

/// Find a Chrome/Chromium executable.
///
/// Checks, in order:
/// 1. The `explicit` path, if given (must exist)
/// 2. `HOVERPROBE_BROWSER` and `CHROME_PATH` environment variables
/// 3. Well-known executable names on `PATH`
/// 4. Well-known absolute install locations
///
/// # Errors
///
/// Returns [`Error::BrowserNotFound`] listing what was searched.
pub fn find_browser_executable(explicit: Option<&Path>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		if path.exists() {
			return Ok(path.to_path_buf());
		}
		return Err(Error::BrowserNotFound(path.display().to_string()));
	}

	for var in BROWSER_ENV_VARS {
		if let Ok(value) = std::env::var(var) {
			if value.trim().is_empty() {
				continue;
			}
			let path = PathBuf::from(&value);
			if path.exists() {
				return Ok(path);
			}
			warn!(target = "hoverprobe", var, path = %value, "browser path from environment does not exist");
		}
	}

	let candidates = browser_candidates();
	for candidate in &candidates {
		if candidate.starts_with('/') || candidate.contains('\\') {
			let path = Path::new(candidate);
			if path.exists() {
				return Ok(path.to_path_buf());
			}
		} else if let Ok(path) = which::which(candidate) {
			return Ok(path);
		}
	}

	Err(Error::BrowserNotFound(candidates.join(", ")))
}

fn browser_candidates() -> Vec<&'static str> {
	if cfg!(target_os = "macos") {
		vec![
			"/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
			"/Applications/Chromium.app/Contents/MacOS/Chromium",
			"/Applications/Brave Browser.app/Contents/MacOS/Brave Browser",
		]
	} else if cfg!(target_os = "windows") {
		vec![
			r"C:\Program Files\Google\Chrome\Application\chrome.exe",
			r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
			r"C:\Program Files\Chromium\Application\chrome.exe",
		]
	} else {
		vec![
			"google-chrome-stable",
			"google-chrome",
			"chromium-browser",
			"chromium",
			"/usr/bin/google-chrome-stable",
			"/usr/bin/google-chrome",
			"/usr/bin/chromium-browser",
			"/usr/bin/chromium",
			"/snap/bin/chromium",
		]
	}
}

/// Normalizes a `--cdp-endpoint` value for chromiumoxide's connect.
///
/// `ws://`/`wss://` and `http(s)://` URLs pass through (chromiumoxide
/// resolves HTTP bases through `/json/version`); a bare port becomes a
/// loopback HTTP base.
pub fn endpoint_url(endpoint: &str) -> Result<String> {
	let endpoint = endpoint.trim();
	if ["ws://", "wss://", "http://", "https://"]
		.iter()
		.any(|scheme| endpoint.starts_with(scheme))
	{
		return Ok(endpoint.trim_end_matches('/').to_string());
	}
	match endpoint.parse::<u16>() {
		Ok(port) if port != 0 => Ok(format!("http://127.0.0.1:{port}")),
		_ => Err(Error::InvalidArgument(format!(
			"CDP endpoint must be a ws:// or http:// URL or a port, got '{endpoint}'"
		))),
	}
}
