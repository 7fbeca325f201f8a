//! Browser sessions: one per case, opened by a [`SessionFactory`].

use std::time::Duration;

use async_trait::async_trait;
use probe::{Browser, LaunchOptions, Page, Result, Viewport};
use tracing::{debug, warn};

use crate::surface::DropdownPage;

/// A browser session owned by exactly one case.
#[async_trait]
pub trait SessionLike: Send + Sync {
	async fn set_viewport(&self, viewport: Viewport) -> Result<()>;

	/// Loads `url` and waits for the load event.
	async fn goto(&self, url: &str) -> Result<()>;

	fn page(&self) -> &dyn DropdownPage;

	/// Releases the session. Consumes it so teardown cannot run twice.
	async fn close(self: Box<Self>) -> Result<()>;
}

/// Opens fresh sessions.
#[async_trait]
pub trait SessionFactory: Send + Sync {
	async fn open(&self) -> Result<Box<dyn SessionLike>>;
}

/// Where sessions get their browser from.
#[derive(Debug, Clone)]
pub enum BrowserSource {
	/// Launch a new browser per session.
	Launch(LaunchOptions),
	/// Open a new tab per session in an already-running browser.
	Connect(String),
}

/// Opens real browser sessions.
#[derive(Debug, Clone)]
pub struct BrowserSessionFactory {
	source: BrowserSource,
	navigation_timeout: Duration,
}

impl BrowserSessionFactory {
	pub fn new(source: BrowserSource, navigation_timeout: Duration) -> Self {
		Self {
			source,
			navigation_timeout,
		}
	}
}

#[async_trait]
impl SessionFactory for BrowserSessionFactory {
	async fn open(&self) -> Result<Box<dyn SessionLike>> {
		let browser = match &self.source {
			BrowserSource::Launch(options) => Browser::launch(options).await?,
			BrowserSource::Connect(endpoint) => Browser::connect(endpoint).await?,
		};

		let page = match browser.new_page().await {
			Ok(page) => page,
			Err(e) => {
				if let Err(close_err) = browser.close().await {
					warn!(target = "hoverprobe", "closing browser after failed setup: {close_err}");
				}
				return Err(e);
			}
		};

		debug!(target = "hoverprobe", ?browser, ?page, "session opened");
		Ok(Box::new(BrowserSession {
			browser,
			page,
			navigation_timeout: self.navigation_timeout,
		}))
	}
}

/// A browser plus the tab the case runs in.
///
/// Closing closes the tab, then the browser (which terminates it when it
/// was launched by us and only disconnects otherwise).
pub struct BrowserSession {
	browser: Browser,
	page: Page,
	navigation_timeout: Duration,
}

#[async_trait]
impl SessionLike for BrowserSession {
	async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
		self.page.set_viewport(viewport).await
	}

	async fn goto(&self, url: &str) -> Result<()> {
		self.page.goto(url, self.navigation_timeout).await
	}

	fn page(&self) -> &dyn DropdownPage {
		&self.page
	}

	async fn close(self: Box<Self>) -> Result<()> {
		let BrowserSession { browser, page, .. } = *self;
		let page_closed = page.close().await;
		let browser_closed = browser.close().await;
		debug!(target = "hoverprobe", "session closed");
		page_closed.and(browser_closed)
	}
}
