//! In-memory page and session doubles for exercising the suite without a
//! browser.
//!
//! [`MockDropdownPage`] models the parts of a dropdown page the checks
//! observe: which selectors match, whether the menu is shown initially or
//! on hover, the menu entries and the first entry's hover background.
//! [`MockSessionFactory`] hands out sessions over fresh copies of one
//! [`MockPageSpec`] and counts opens and closes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use probe::{Error, Result, Viewport};
use url::Url;

use crate::contract::DropdownContract;
use crate::session::{SessionFactory, SessionLike};
use crate::surface::DropdownPage;

const BASE_URL: &str = "http://127.0.0.1:8000/index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockItem {
	pub text: String,
	/// Raw `href` attribute; resolved against the page URL when read.
	pub href: Option<String>,
}

/// Description of a page, cloned into every session.
#[derive(Debug, Clone)]
pub struct MockPageSpec {
	pub contract: DropdownContract,
	/// Selectors that match nothing.
	pub missing: Vec<String>,
	pub menu_initially_visible: bool,
	pub reveal_on_hover: bool,
	pub items: Vec<MockItem>,
	pub background: String,
	/// Background of the first item while hovered; `None` means no hover rule.
	pub hover_background: Option<String>,
}

impl MockPageSpec {
	/// A page that satisfies the default contract.
	pub fn conforming() -> Self {
		Self {
			contract: DropdownContract::default(),
			missing: Vec::new(),
			menu_initially_visible: false,
			reveal_on_hover: true,
			items: vec![
				item("Projects", "#projects"),
				item("Contact", "#contact"),
				item("Resources", "#resources"),
			],
			background: "rgba(0, 0, 0, 0)".to_string(),
			hover_background: Some("rgb(232, 232, 232)".to_string()),
		}
	}

	pub fn menu_initially_visible(mut self) -> Self {
		self.menu_initially_visible = true;
		self
	}

	pub fn without_hover_reveal(mut self) -> Self {
		self.reveal_on_hover = false;
		self
	}

	pub fn without_hover_style(mut self) -> Self {
		self.hover_background = None;
		self
	}

	pub fn without(mut self, selector: &str) -> Self {
		self.missing.push(selector.to_string());
		self
	}

	pub fn with_items(mut self, items: &[(&str, &str)]) -> Self {
		self.items = items.iter().map(|(text, href)| item(text, href)).collect();
		self
	}

	pub fn with_href(mut self, index: usize, href: Option<&str>) -> Self {
		self.items[index].href = href.map(str::to_string);
		self
	}
}

fn item(text: &str, href: &str) -> MockItem {
	MockItem {
		text: text.to_string(),
		href: Some(href.to_string()),
	}
}

/// Action recorded by [`MockDropdownPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
	Hover { selector: String },
}

/// A page built from a [`MockPageSpec`] with live hover state.
pub struct MockDropdownPage {
	spec: MockPageSpec,
	base: Url,
	hovered: Mutex<Option<String>>,
	actions: Mutex<Vec<MockAction>>,
}

impl MockDropdownPage {
	pub fn new(spec: MockPageSpec) -> Self {
		Self {
			spec,
			base: Url::parse(BASE_URL).unwrap(),
			hovered: Mutex::new(None),
			actions: Mutex::new(Vec::new()),
		}
	}

	pub fn actions(&self) -> Vec<MockAction> {
		self.actions.lock().unwrap().clone()
	}

	fn contract(&self) -> &DropdownContract {
		&self.spec.contract
	}

	fn is_item_selector(&self, selector: &str) -> bool {
		selector == self.contract().items || selector == self.contract().first_item
	}

	fn matches(&self, selector: &str) -> bool {
		if self.spec.missing.iter().any(|missing| missing == selector) {
			return false;
		}
		if self.is_item_selector(selector) {
			return !self.spec.items.is_empty() && self.matches(&self.contract().menu);
		}
		true
	}

	fn lookup(&self, selector: &str) -> Result<()> {
		if self.matches(selector) {
			Ok(())
		} else {
			Err(Error::ElementNotFound(selector.to_string()))
		}
	}

	fn hovered_is(&self, selector: &str) -> bool {
		self.hovered.lock().unwrap().as_deref() == Some(selector)
	}

	fn menu_shown(&self) -> bool {
		let contract = self.contract();
		self.matches(&contract.menu)
			&& (self.spec.menu_initially_visible
				|| (self.spec.reveal_on_hover && (self.hovered_is(&contract.toggle) || self.hovered_is(&contract.first_item))))
	}
}

#[async_trait]
impl DropdownPage for MockDropdownPage {
	async fn require(&self, selector: &str) -> Result<()> {
		self.lookup(selector)
	}

	async fn is_visible(&self, selector: &str) -> Result<bool> {
		self.lookup(selector)?;
		if selector == self.contract().menu || self.is_item_selector(selector) {
			Ok(self.menu_shown())
		} else {
			Ok(true)
		}
	}

	async fn hover(&self, selector: &str) -> Result<()> {
		self.lookup(selector)?;
		if self.is_item_selector(selector) && !self.menu_shown() {
			return Err(Error::InvalidArgument(format!(
				"element '{selector}' has an empty box and cannot be hovered"
			)));
		}
		self.actions.lock().unwrap().push(MockAction::Hover {
			selector: selector.to_string(),
		});
		*self.hovered.lock().unwrap() = Some(selector.to_string());
		Ok(())
	}

	async fn texts(&self, selector: &str) -> Result<Vec<String>> {
		if selector != self.contract().items || !self.matches(selector) {
			return Ok(Vec::new());
		}
		Ok(self.spec.items.iter().map(|item| item.text.clone()).collect())
	}

	async fn link_targets(&self, selector: &str) -> Result<Vec<Option<String>>> {
		if selector != self.contract().items || !self.matches(selector) {
			return Ok(Vec::new());
		}
		Ok(self
			.spec
			.items
			.iter()
			.map(|item| {
				item.href
					.as_deref()
					.map(|href| self.base.join(href).map(String::from).unwrap_or_else(|_| href.to_string()))
			})
			.collect())
	}

	async fn computed_style(&self, selector: &str, property: &str) -> Result<String> {
		self.lookup(selector)?;
		if property != "background-color" {
			return Ok(String::new());
		}
		if selector == self.contract().first_item && self.hovered_is(selector) {
			if let Some(hover) = &self.spec.hover_background {
				return Ok(hover.clone());
			}
		}
		Ok(self.spec.background.clone())
	}
}

/// Open/close bookkeeping shared by a factory and its sessions.
#[derive(Debug, Default)]
pub struct SessionCounters {
	opened: AtomicUsize,
	closed: AtomicUsize,
	navigations: Mutex<Vec<String>>,
	viewports: Mutex<Vec<Viewport>>,
}

pub struct MockSessionFactory {
	spec: MockPageSpec,
	counters: Arc<SessionCounters>,
	fail_open: bool,
	fail_goto: bool,
}

impl MockSessionFactory {
	pub fn new(spec: MockPageSpec) -> Self {
		Self {
			spec,
			counters: Arc::new(SessionCounters::default()),
			fail_open: false,
			fail_goto: false,
		}
	}

	/// Every `open` fails as if no browser were installed.
	pub fn failing_open(mut self) -> Self {
		self.fail_open = true;
		self
	}

	/// Every navigation fails.
	pub fn failing_goto(mut self) -> Self {
		self.fail_goto = true;
		self
	}

	pub fn opened(&self) -> usize {
		self.counters.opened.load(Ordering::SeqCst)
	}

	pub fn closed(&self) -> usize {
		self.counters.closed.load(Ordering::SeqCst)
	}

	pub fn navigations(&self) -> Vec<String> {
		self.counters.navigations.lock().unwrap().clone()
	}

	pub fn viewports(&self) -> Vec<Viewport> {
		self.counters.viewports.lock().unwrap().clone()
	}
}

#[async_trait]
impl SessionFactory for MockSessionFactory {
	async fn open(&self) -> Result<Box<dyn SessionLike>> {
		if self.fail_open {
			return Err(Error::BrowserNotFound("mock factory configured to fail".into()));
		}
		self.counters.opened.fetch_add(1, Ordering::SeqCst);
		Ok(Box::new(MockSession {
			page: MockDropdownPage::new(self.spec.clone()),
			counters: Arc::clone(&self.counters),
			fail_goto: self.fail_goto,
		}))
	}
}

pub struct MockSession {
	page: MockDropdownPage,
	counters: Arc<SessionCounters>,
	fail_goto: bool,
}

#[async_trait]
impl SessionLike for MockSession {
	async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
		self.counters.viewports.lock().unwrap().push(viewport);
		Ok(())
	}

	async fn goto(&self, url: &str) -> Result<()> {
		self.counters.navigations.lock().unwrap().push(url.to_string());
		if self.fail_goto {
			return Err(Error::NavigationFailed {
				url: url.to_string(),
				reason: "net::ERR_FILE_NOT_FOUND".into(),
			});
		}
		Ok(())
	}

	fn page(&self) -> &dyn DropdownPage {
		&self.page
	}

	async fn close(self: Box<Self>) -> Result<()> {
		self.counters.closed.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}
