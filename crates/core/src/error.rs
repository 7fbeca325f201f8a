//! Error types for the page API.

use chromiumoxide::error::CdpError;
use thiserror::Error;

/// Result type alias for page operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a browser.
#[derive(Debug, Error)]
pub enum Error {
	/// No Chrome/Chromium executable could be located.
	#[error("Browser executable not found (searched: {0}). Set HOVERPROBE_BROWSER or pass --browser.")]
	BrowserNotFound(String),

	/// The browser could not be launched or connected to.
	#[error("Failed to launch browser: {0}")]
	LaunchFailed(String),

	/// Error reported by the DevTools client.
	#[error("CDP error: {0}")]
	Cdp(#[from] CdpError),

	/// I/O error.
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// JSON serialization/deserialization error.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	/// Timeout waiting for an operation or condition.
	#[error("Timeout: {0}")]
	Timeout(String),

	/// Navigation was rejected by the browser.
	#[error("Navigation to '{url}' failed: {reason}")]
	NavigationFailed { url: String, reason: String },

	/// The page was already closed.
	#[error("Page is closed")]
	PageClosed,

	/// Element not found by selector.
	#[error("Element not found: selector '{0}'")]
	ElementNotFound(String),

	/// JavaScript evaluation threw or returned an unusable value.
	#[error("Evaluation failed: {0}")]
	Evaluation(String),

	/// Invalid argument provided to a method.
	#[error("Invalid argument: {0}")]
	InvalidArgument(String),
}

impl Error {
	/// Returns true if this is a timeout error.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Timeout(_))
	}

	/// Returns true if a selector matched nothing.
	pub fn is_element_not_found(&self) -> bool {
		matches!(self, Error::ElementNotFound(_))
	}
}
