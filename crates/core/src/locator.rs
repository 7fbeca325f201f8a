//! [`Locator`]: a selector re-resolved against the live DOM on every call.

use chromiumoxide::element::Element;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::js;
use crate::page::Page;

/// Elements matching a CSS selector.
///
/// Single-element methods act on the first match and fail with
/// [`Error::ElementNotFound`] when there is none. Collection methods
/// (`count`, `all_*`) act on every match in document order and never fail
/// for zero matches.
#[derive(Debug, Clone)]
pub struct Locator {
	page: Page,
	selector: String,
}

impl Locator {
	pub(crate) fn new(page: Page, selector: &str) -> Self {
		Self {
			page,
			selector: selector.to_string(),
		}
	}

	async fn all(&self) -> Result<Vec<Element>> {
		self.page.query_all(&self.selector).await
	}

	async fn first(&self) -> Result<Element> {
		self.all()
			.await?
			.into_iter()
			.next()
			.ok_or_else(|| Error::ElementNotFound(self.selector.clone()))
	}

	/// Number of matching elements.
	pub async fn count(&self) -> Result<usize> {
		Ok(self.all().await?.len())
	}

	/// Fails with [`Error::ElementNotFound`] unless the element exists.
	pub async fn ensure_attached(&self) -> Result<()> {
		self.first().await.map(|_| ())
	}

	/// Whether the element is rendered and visible.
	pub async fn is_visible(&self) -> Result<bool> {
		let element = self.first().await?;
		is_visible(&element).await
	}

	/// Rendered text of every match, trimmed.
	pub async fn all_inner_texts(&self) -> Result<Vec<String>> {
		let mut texts = Vec::new();
		for element in self.all().await? {
			let text = element.inner_text().await?.unwrap_or_default();
			texts.push(text.trim().to_string());
		}
		Ok(texts)
	}

	/// Resolved link target (absolute `href`) of every match, `None` for
	/// elements without an `href` attribute.
	pub async fn all_link_targets(&self) -> Result<Vec<Option<String>>> {
		let mut targets = Vec::new();
		for element in self.all().await? {
			let Some(raw) = element.attribute("href").await? else {
				targets.push(None);
				continue;
			};
			let resolved = match element.property("href").await? {
				Some(Value::String(href)) => href,
				_ => raw,
			};
			targets.push(Some(resolved));
		}
		Ok(targets)
	}

	/// Computed value of a CSS property (e.g. `background-color`).
	pub async fn computed_style(&self, property: &str) -> Result<String> {
		let element = self.first().await?;
		match call(&element, &js::computed_style_fn(property)).await? {
			Value::String(value) => Ok(value),
			other => Err(Error::Evaluation(format!("computed style of {property} returned {other}"))),
		}
	}

	/// Scrolls the element into view and moves the pointer over it.
	///
	/// # Errors
	///
	/// Returns [`Error::ElementNotFound`] if nothing matches and
	/// [`Error::InvalidArgument`] if the element is not visible (there is
	/// nothing to hover).
	pub async fn hover(&self) -> Result<()> {
		let element = self.first().await?;
		if !is_visible(&element).await? {
			return Err(Error::InvalidArgument(format!(
				"element '{}' is not visible and cannot be hovered",
				self.selector
			)));
		}
		debug!(target = "hoverprobe", selector = %self.selector, "hover");
		element.hover().await?;
		Ok(())
	}
}

async fn is_visible(element: &Element) -> Result<bool> {
	match call(element, js::IS_VISIBLE_FN).await? {
		Value::Bool(visible) => Ok(visible),
		other => Err(Error::Evaluation(format!("visibility check returned {other}"))),
	}
}

/// Calls a function declaration with the element as `this`.
async fn call(element: &Element, function: &str) -> Result<Value> {
	let returns = element.call_js_fn(function, false).await?;
	if let Some(details) = returns.exception_details {
		return Err(Error::Evaluation(details.text));
	}
	Ok(returns.result.value.unwrap_or(Value::Null))
}
