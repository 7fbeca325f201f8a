//! The dropdown checks.
//!
//! Each case runs against a freshly loaded page and is independent of the
//! others. Assertion failures become [`CaseError::Assertion`]; anything the
//! automation layer reports (missing element, wait timeout, protocol error)
//! propagates as [`CaseError::Automation`].

use probe::WaitOptions;
use serde::Serialize;
use thiserror::Error;

use crate::contract::DropdownContract;
use crate::surface::DropdownPage;

const BACKGROUND_COLOR: &str = "background-color";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Case {
	DropdownVisibility,
	DropdownItems,
	DropdownLinks,
	DropdownHoverStyles,
}

#[derive(Debug, Error)]
pub enum CaseError {
	#[error("{0}")]
	Assertion(String),

	#[error(transparent)]
	Automation(#[from] probe::Error),
}

/// What a case needs from its session and the suite configuration.
pub struct CaseContext<'a> {
	pub page: &'a dyn DropdownPage,
	pub contract: &'a DropdownContract,
	/// Bound for the menu to appear after hovering the toggle.
	pub visible_wait: WaitOptions,
	/// Bound for the hover style to apply.
	pub style_wait: WaitOptions,
}

type CaseResult = std::result::Result<(), CaseError>;

fn ensure(condition: bool, message: impl Into<String>) -> CaseResult {
	if condition {
		Ok(())
	} else {
		Err(CaseError::Assertion(message.into()))
	}
}

impl Case {
	pub const ALL: [Case; 4] = [
		Case::DropdownVisibility,
		Case::DropdownItems,
		Case::DropdownLinks,
		Case::DropdownHoverStyles,
	];

	pub fn name(self) -> &'static str {
		match self {
			Case::DropdownVisibility => "dropdown_visibility",
			Case::DropdownItems => "dropdown_items",
			Case::DropdownLinks => "dropdown_links",
			Case::DropdownHoverStyles => "dropdown_hover_styles",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			Case::DropdownVisibility => "menu is hidden initially and appears on hover",
			Case::DropdownItems => "menu lists the expected items in order",
			Case::DropdownLinks => "menu links point at the expected targets",
			Case::DropdownHoverStyles => "hovering the first item changes its background color",
		}
	}

	pub fn from_name(name: &str) -> Option<Case> {
		Case::ALL.into_iter().find(|case| case.name() == name)
	}

	pub async fn run(self, ctx: &CaseContext<'_>) -> CaseResult {
		match self {
			Case::DropdownVisibility => dropdown_visibility(ctx).await,
			Case::DropdownItems => dropdown_items(ctx).await,
			Case::DropdownLinks => dropdown_links(ctx).await,
			Case::DropdownHoverStyles => dropdown_hover_styles(ctx).await,
		}
	}
}

impl std::fmt::Display for Case {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

/// Hovers the toggle and waits for the menu.
async fn open_menu(ctx: &CaseContext<'_>) -> CaseResult {
	ctx.page.hover(&ctx.contract.toggle).await?;
	ctx.page.wait_for_visible(&ctx.contract.menu, ctx.visible_wait).await?;
	Ok(())
}

async fn dropdown_visibility(ctx: &CaseContext<'_>) -> CaseResult {
	let contract = ctx.contract;
	ctx.page.require(&contract.toggle).await?;
	ctx.page.require(&contract.menu).await?;

	ensure(
		!ctx.page.is_visible(&contract.menu).await?,
		"Dropdown menu should be hidden initially",
	)?;

	open_menu(ctx).await?;

	ensure(
		ctx.page.is_visible(&contract.menu).await?,
		"Dropdown menu should be visible after hover",
	)
}

async fn dropdown_items(ctx: &CaseContext<'_>) -> CaseResult {
	open_menu(ctx).await?;

	let texts = ctx.page.texts(&ctx.contract.items).await?;
	let expected = ctx.contract.expected.len();
	ensure(
		texts.len() == expected,
		format!("Expected {expected} dropdown items, but found {}", texts.len()),
	)?;

	for (actual, expected) in texts.iter().zip(ctx.contract.expected_texts()) {
		ensure(
			actual == expected,
			format!("Expected dropdown item text '{expected}', but found '{actual}'"),
		)?;
	}
	Ok(())
}

async fn dropdown_links(ctx: &CaseContext<'_>) -> CaseResult {
	open_menu(ctx).await?;

	let targets = ctx.page.link_targets(&ctx.contract.items).await?;
	for (actual, expected) in targets.iter().zip(ctx.contract.expected_href_suffixes()) {
		let actual = actual.as_deref();
		ensure(
			actual.is_some_and(|href| href.ends_with(expected)),
			format!(
				"Expected href to end with '{expected}', but found '{}'",
				actual.unwrap_or("<no href>")
			),
		)?;
	}
	Ok(())
}

async fn dropdown_hover_styles(ctx: &CaseContext<'_>) -> CaseResult {
	open_menu(ctx).await?;

	let first_item = &ctx.contract.first_item;
	ctx.page.require(first_item).await?;
	let initial = ctx.page.computed_style(first_item, BACKGROUND_COLOR).await?;

	ctx.page.hover(first_item).await?;

	match ctx
		.page
		.wait_for_style_change(first_item, BACKGROUND_COLOR, &initial, ctx.style_wait)
		.await
	{
		Ok(_) => Ok(()),
		Err(e) if e.is_timeout() => Err(CaseError::Assertion("Background color should change on hover".into())),
		Err(e) => Err(e.into()),
	}
}
