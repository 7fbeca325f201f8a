//! [`Page`]: one browser tab.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::element::Element;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::locator::Locator;

/// Default navigation timeout.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Document URL of Chromium's built-in error page.
const ERROR_PAGE_PREFIX: &str = "chrome-error://";

/// Viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
	pub width: u32,
	pub height: u32,
}

impl Default for Viewport {
	fn default() -> Self {
		Self {
			width: 1920,
			height: 1080,
		}
	}
}

/// A browser tab.
///
/// Cloning is cheap; all clones address the same target.
#[derive(Clone)]
pub struct Page {
	inner: chromiumoxide::Page,
	closed: Arc<AtomicBool>,
}

impl std::fmt::Debug for Page {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Page")
			.field("target_id", self.inner.target_id())
			.field("closed", &self.is_closed())
			.finish()
	}
}

impl Page {
	pub(crate) fn new(inner: chromiumoxide::Page) -> Self {
		Self {
			inner,
			closed: Arc::new(AtomicBool::new(false)),
		}
	}

	fn live(&self) -> Result<&chromiumoxide::Page> {
		if self.is_closed() {
			return Err(Error::PageClosed);
		}
		Ok(&self.inner)
	}

	pub fn is_closed(&self) -> bool {
		self.closed.load(Ordering::SeqCst)
	}

	/// Navigates to `url` and waits for the load to finish.
	///
	/// # Errors
	///
	/// Returns [`Error::NavigationFailed`] if the browser rejects the URL
	/// or lands on its error page (unreachable host, missing file) and
	/// [`Error::Timeout`] if loading takes longer than `timeout`.
	pub async fn goto(&self, url: &str, timeout: Duration) -> Result<()> {
		let page = self.live()?;
		let navigation_failed = |reason: String| Error::NavigationFailed {
			url: url.to_string(),
			reason,
		};

		match tokio::time::timeout(timeout, page.goto(url)).await {
			Ok(Ok(_)) => {}
			Ok(Err(e)) => return Err(navigation_failed(e.to_string())),
			Err(_) => {
				return Err(Error::Timeout(format!(
					"loading '{url}' did not finish within {}ms",
					timeout.as_millis()
				)));
			}
		}

		let location: String = page.evaluate("location.href").await?.into_value()?;
		if location.starts_with(ERROR_PAGE_PREFIX) {
			return Err(navigation_failed("the browser showed its error page".to_string()));
		}
		debug!(target = "hoverprobe", %url, "page loaded");
		Ok(())
	}

	/// Overrides the viewport (layout) size.
	pub async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
		if viewport.width == 0 || viewport.height == 0 {
			return Err(Error::InvalidArgument(format!(
				"viewport must be non-empty, got {}x{}",
				viewport.width, viewport.height
			)));
		}
		let params = SetDeviceMetricsOverrideParams::new(
			i64::from(viewport.width),
			i64::from(viewport.height),
			1.0,
			false,
		);
		self.live()?.execute(params).await?;
		Ok(())
	}

	/// Creates a [`Locator`] for a CSS selector.
	pub fn locator(&self, selector: &str) -> Locator {
		Locator::new(self.clone(), selector)
	}

	/// Every element matching `selector`, in document order.
	pub(crate) async fn query_all(&self, selector: &str) -> Result<Vec<Element>> {
		Ok(self.live()?.find_elements(selector).await?)
	}

	/// Closes the tab. Closing twice is a no-op.
	pub async fn close(&self) -> Result<()> {
		if self.closed.swap(true, Ordering::SeqCst) {
			return Ok(());
		}
		self.inner.clone().close().await?;
		debug!(target = "hoverprobe", target_id = ?self.inner.target_id(), "page closed");
		Ok(())
	}
}
