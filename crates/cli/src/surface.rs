//! The page operations the dropdown checks are written against.
//!
//! [`DropdownPage`] is implemented for [`probe::Page`] and, in tests, for an
//! in-memory page model so the case logic runs without a browser.

use async_trait::async_trait;
use probe::{Page, Result, WaitOptions, poll_until};

/// Selector-addressed page queries and pointer moves.
///
/// Single-element methods act on the first match and fail with
/// [`probe::Error::ElementNotFound`] when nothing matches. Collection methods
/// return matches in document order.
#[async_trait]
pub trait DropdownPage: Send + Sync {
	/// Fails unless at least one element matches.
	async fn require(&self, selector: &str) -> Result<()>;

	async fn is_visible(&self, selector: &str) -> Result<bool>;

	/// Moves the pointer onto the element.
	async fn hover(&self, selector: &str) -> Result<()>;

	/// Rendered texts of every match.
	async fn texts(&self, selector: &str) -> Result<Vec<String>>;

	/// Resolved link targets of every match (`None` for links without one).
	async fn link_targets(&self, selector: &str) -> Result<Vec<Option<String>>>;

	async fn computed_style(&self, selector: &str, property: &str) -> Result<String>;

	/// Polls until the element exists and is visible.
	async fn wait_for_visible(&self, selector: &str, options: WaitOptions) -> Result<()> {
		let description = format!("'{selector}' to become visible");
		poll_until(&description, options, move || async move {
			match self.is_visible(selector).await {
				Ok(visible) => Ok(visible.then_some(())),
				Err(e) if e.is_element_not_found() => Ok(None),
				Err(e) => Err(e),
			}
		})
		.await
	}

	/// Polls until `property` differs from `from` and returns the new value.
	async fn wait_for_style_change(
		&self,
		selector: &str,
		property: &str,
		from: &str,
		options: WaitOptions,
	) -> Result<String> {
		let description = format!("{property} of '{selector}' to change from {from}");
		poll_until(&description, options, move || async move {
			let current = self.computed_style(selector, property).await?;
			Ok((current != from).then_some(current))
		})
		.await
	}
}

#[async_trait]
impl DropdownPage for Page {
	async fn require(&self, selector: &str) -> Result<()> {
		self.locator(selector).ensure_attached().await
	}

	async fn is_visible(&self, selector: &str) -> Result<bool> {
		self.locator(selector).is_visible().await
	}

	async fn hover(&self, selector: &str) -> Result<()> {
		self.locator(selector).hover().await
	}

	async fn texts(&self, selector: &str) -> Result<Vec<String>> {
		self.locator(selector).all_inner_texts().await
	}

	async fn link_targets(&self, selector: &str) -> Result<Vec<Option<String>>> {
		self.locator(selector).all_link_targets().await
	}

	async fn computed_style(&self, selector: &str, property: &str) -> Result<String> {
		self.locator(selector).computed_style(property).await
	}
}
