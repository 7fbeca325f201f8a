//! [`Browser`]: a launched or connected Chromium instance.

use std::time::Duration;

use futures_util::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::launch::{LaunchOptions, endpoint_url, find_browser_executable};
use crate::page::Page;

const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// A browser under automation control.
///
/// Launched browsers own their process and terminate it on
/// [`Browser::close`] (chromiumoxide also kills it on drop). Connected
/// browsers are left running; closing only drops the connection.
pub struct Browser {
	inner: chromiumoxide::Browser,
	handler: JoinHandle<()>,
	launched: bool,
	// Dropped after `inner` so the profile outlives the process.
	_profile_dir: Option<TempDir>,
}

impl Browser {
	/// Launches a new browser process with a private profile.
	pub async fn launch(options: &LaunchOptions) -> Result<Self> {
		let executable = find_browser_executable(options.executable.as_deref())?;
		let profile_dir = tempfile::Builder::new().prefix("hoverprobe-profile-").tempdir()?;
		let config = options.browser_config(&executable, profile_dir.path())?;

		debug!(target = "hoverprobe", executable = %executable.display(), headless = options.headless, "launching browser");
		let (inner, handler) = chromiumoxide::Browser::launch(config)
			.await
			.map_err(|e| Error::LaunchFailed(format!("{}: {e}", executable.display())))?;

		Ok(Self {
			inner,
			handler: spawn_handler(handler),
			launched: true,
			_profile_dir: Some(profile_dir),
		})
	}

	/// Connects to an already-running browser.
	///
	/// `endpoint` may be a `ws://` URL, an `http://host:port` base or a port.
	pub async fn connect(endpoint: &str) -> Result<Self> {
		let url = endpoint_url(endpoint)?;
		debug!(target = "hoverprobe", %url, "connecting to browser");
		let (inner, handler) = chromiumoxide::Browser::connect(url.clone())
			.await
			.map_err(|e| Error::LaunchFailed(format!("cannot connect to {url}: {e}")))?;

		Ok(Self {
			inner,
			handler: spawn_handler(handler),
			launched: false,
			_profile_dir: None,
		})
	}

	/// Whether this browser was launched (and is owned) by us.
	pub fn is_launched(&self) -> bool {
		self.launched
	}

	/// Browser product string (e.g. `HeadlessChrome/126.0.6478.126`).
	pub async fn version(&self) -> Result<String> {
		Ok(self.inner.version().await?.product)
	}

	/// Opens a new tab on `about:blank`.
	pub async fn new_page(&self) -> Result<Page> {
		let page = self.inner.new_page("about:blank").await?;
		debug!(target = "hoverprobe", target_id = ?page.target_id(), "target created");
		Ok(Page::new(page))
	}

	/// Closes the browser.
	///
	/// Launched browsers are asked to exit and reaped, or killed when they do
	/// not comply within a short bound.
	pub async fn close(mut self) -> Result<()> {
		let result = if self.launched { self.shutdown().await } else { Ok(()) };
		self.handler.abort();
		result
	}

	async fn shutdown(&mut self) -> Result<()> {
		match tokio::time::timeout(CLOSE_TIMEOUT, self.inner.close()).await {
			Ok(Ok(_)) => match tokio::time::timeout(CLOSE_TIMEOUT, self.inner.wait()).await {
				Ok(Ok(status)) => {
					debug!(target = "hoverprobe", ?status, "browser exited");
					Ok(())
				}
				Ok(Err(e)) => Err(Error::Io(e)),
				Err(_) => self.kill().await,
			},
			Ok(Err(e)) => {
				warn!(target = "hoverprobe", "Browser.close failed: {e}; killing process");
				self.kill().await
			}
			Err(_) => {
				warn!(target = "hoverprobe", "Browser.close timed out; killing process");
				self.kill().await
			}
		}
	}

	async fn kill(&mut self) -> Result<()> {
		match self.inner.kill().await {
			Some(Err(e)) => {
				warn!(target = "hoverprobe", "killing browser failed: {e}");
				Err(Error::Io(e))
			}
			Some(Ok(())) | None => Ok(()),
		}
	}
}

/// Drives chromiumoxide's event handler until the connection ends.
fn spawn_handler(mut handler: chromiumoxide::Handler) -> JoinHandle<()> {
	tokio::spawn(async move {
		while let Some(event) = handler.next().await {
			if let Err(e) = event {
				debug!(target = "hoverprobe", "cdp handler: {e}");
			}
		}
	})
}

impl std::fmt::Debug for Browser {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Browser")
			.field("launched", &self.launched)
			.field("websocket", &self.inner.websocket_address())
			.finish()
	}
}
