//! probe: a small selector-based page API over chromiumoxide
//!
//! Just enough browser automation to drive hover-driven UI checks: launch or
//! connect to Chromium, open tabs, navigate, resolve elements by CSS
//! selector, move the pointer, read visibility/text/link/style state, and
//! poll for conditions with a bound.
//!
//! ```ignore
//! use probe::{Browser, LaunchOptions, Viewport, WaitOptions};
//!
//! let browser = Browser::launch(&LaunchOptions::default()).await?;
//! let page = browser.new_page().await?;
//! page.set_viewport(Viewport::default()).await?;
//! page.goto("file:///srv/site/index.html", probe::DEFAULT_NAVIGATION_TIMEOUT).await?;
//!
//! page.locator(".dropdown").hover().await?;
//! browser.close().await?;
//! ```

pub mod browser;
pub mod error;
pub mod js;
pub mod launch;
pub mod locator;
pub mod page;
pub mod wait;

pub use browser::Browser;
pub use error::{Error, Result};
pub use launch::{LaunchOptions, find_browser_executable};
pub use locator::Locator;
pub use page::{DEFAULT_NAVIGATION_TIMEOUT, Page, Viewport};
pub use wait::{WaitOptions, poll_until};
