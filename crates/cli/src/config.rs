//! Suite configuration and target page resolution.
//!
//! Settings are layered, last wins: built-in defaults, a JSON config file,
//! `HOVERPROBE_*` environment variables, then command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use probe::{LaunchOptions, Viewport, WaitOptions};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::contract::DropdownContract;
use crate::error::{ProbeError, Result};

pub const ENV_PAGE_URL: &str = "HOVERPROBE_PAGE_URL";
pub const ENV_BROWSER: &str = "HOVERPROBE_BROWSER";
pub const ENV_HEADLESS: &str = "HOVERPROBE_HEADLESS";
pub const ENV_TIMEOUT_MS: &str = "HOVERPROBE_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuiteConfig {
	/// Page under test: an absolute URL or a local path.
	pub page: Option<String>,
	/// Browser executable; discovered when unset.
	pub browser: Option<PathBuf>,
	/// DevTools endpoint of a running browser; launches one when unset.
	pub cdp_endpoint: Option<String>,
	pub headless: bool,
	pub no_sandbox: bool,
	pub viewport: Viewport,
	/// Bound for the menu to appear after hover.
	pub visible_timeout_ms: u64,
	/// Bound for the hover background to apply.
	pub style_timeout_ms: u64,
	pub poll_interval_ms: u64,
	pub navigation_timeout_ms: u64,
	pub contract: DropdownContract,
	/// Directory a relative local `page` is resolved against. Set to the
	/// config file's directory when the page comes from that file.
	#[serde(skip)]
	pub page_base: Option<PathBuf>,
}

impl Default for SuiteConfig {
	fn default() -> Self {
		Self {
			page: None,
			browser: None,
			cdp_endpoint: None,
			headless: true,
			no_sandbox: false,
			viewport: Viewport::default(),
			visible_timeout_ms: 10_000,
			style_timeout_ms: 2_000,
			poll_interval_ms: 100,
			navigation_timeout_ms: u64::try_from(probe::DEFAULT_NAVIGATION_TIMEOUT.as_millis()).unwrap_or(30_000),
			contract: DropdownContract::default(),
			page_base: None,
		}
	}
}

impl SuiteConfig {
	/// Reads a JSON config file. Missing keys keep their defaults.
	pub fn load(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path).map_err(|source| ProbeError::ConfigRead {
			path: path.to_path_buf(),
			source,
		})?;
		let mut config: Self = serde_json::from_str(&raw).map_err(|source| ProbeError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})?;
		if config.page.is_some() {
			config.page_base = path.parent().map(Path::to_path_buf);
		}
		config.validate()?;
		Ok(config)
	}

	/// Applies `HOVERPROBE_*` overrides read through `var`.
	///
	/// Unset and blank variables are ignored alike.
	pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
		let var = |name: &str| var(name).filter(|v| !v.trim().is_empty());

		if let Some(page) = var(ENV_PAGE_URL) {
			self.set_page(page);
		}
		if let Some(browser) = var(ENV_BROWSER) {
			self.browser = Some(PathBuf::from(browser));
		}
		if let Some(headless) = var(ENV_HEADLESS) {
			self.headless = parse_bool(ENV_HEADLESS, &headless)?;
		}
		if let Some(timeout) = var(ENV_TIMEOUT_MS) {
			self.visible_timeout_ms = timeout
				.trim()
				.parse()
				.map_err(|_| ProbeError::Config(format!("{ENV_TIMEOUT_MS} must be milliseconds, got '{timeout}'")))?;
		}
		self.validate()
	}

	/// Sets a page given relative to the working directory.
	pub fn set_page(&mut self, page: String) {
		self.page = Some(page);
		self.page_base = None;
	}

	/// Directory a relative local page resolves against.
	pub fn page_dir(&self, cwd: &Path) -> PathBuf {
		match &self.page_base {
			Some(base) => cwd.join(base),
			None => cwd.to_path_buf(),
		}
	}

	pub fn validate(&self) -> Result<()> {
		if self.viewport.width == 0 || self.viewport.height == 0 {
			return Err(ProbeError::Config(format!(
				"viewport must be non-empty, got {}x{}",
				self.viewport.width, self.viewport.height
			)));
		}
		if self.poll_interval_ms == 0 {
			return Err(ProbeError::Config("pollIntervalMs must be positive".into()));
		}
		if self.contract.expected.is_empty() {
			return Err(ProbeError::Config("contract.expected must list at least one item".into()));
		}
		Ok(())
	}

	pub fn visible_wait(&self) -> WaitOptions {
		WaitOptions::new(
			Duration::from_millis(self.visible_timeout_ms),
			Duration::from_millis(self.poll_interval_ms),
		)
	}

	pub fn style_wait(&self) -> WaitOptions {
		WaitOptions::new(
			Duration::from_millis(self.style_timeout_ms),
			Duration::from_millis(self.poll_interval_ms),
		)
	}

	pub fn navigation_timeout(&self) -> Duration {
		Duration::from_millis(self.navigation_timeout_ms)
	}

	pub fn launch_options(&self) -> LaunchOptions {
		LaunchOptions {
			executable: self.browser.clone(),
			headless: self.headless,
			no_sandbox: self.no_sandbox,
			window_size: Some((self.viewport.width, self.viewport.height)),
			..LaunchOptions::default()
		}
	}
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Ok(true),
		"0" | "false" | "no" | "off" => Ok(false),
		_ => Err(ProbeError::Config(format!("{name} must be a boolean, got '{raw}'"))),
	}
}

/// Resolves the page under test to a URL.
///
/// - absolute URLs are used as given
/// - with a fixture server, other values are paths relative to its root,
///   and no page at all means the server root
/// - otherwise the value is a local file, relative to `cwd`, which must exist
pub fn resolve_page_url(page: Option<&str>, serve_base: Option<&Url>, cwd: &Path) -> Result<Url> {
	let page = match (page, serve_base) {
		(Some(page), _) => page,
		(None, Some(base)) => return Ok(base.clone()),
		(None, None) => return Err(ProbeError::MissingPage),
	};

	// A one-letter scheme is a Windows drive, not a URL.
	if let Ok(url) = Url::parse(page) {
		if url.scheme().len() > 1 {
			return Ok(url);
		}
	}

	if let Some(base) = serve_base {
		return base
			.join(page.trim_start_matches('/'))
			.map_err(|e| ProbeError::Config(format!("invalid page path '{page}': {e}")));
	}

	let path = cwd.join(page);
	let path = path.canonicalize().map_err(|_| ProbeError::PageNotFound(path.clone()))?;
	Url::from_file_path(&path).map_err(|()| ProbeError::PageNotFound(path))
}
