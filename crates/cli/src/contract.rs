//! The page contract the dropdown checks assert against.

use serde::{Deserialize, Serialize};

/// Selectors and expected menu entries.
///
/// The defaults describe the bundled fixture: a `.dropdown` toggle whose
/// `.dropdown-menu` lists Projects, Contact and Resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DropdownContract {
	/// Element the pointer hovers to open the menu.
	pub toggle: String,
	/// The menu container.
	pub menu: String,
	/// Menu entries, in document order.
	pub items: String,
	/// The first entry, used for the hover-style check.
	pub first_item: String,
	pub expected: Vec<ExpectedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedItem {
	pub text: String,
	/// Suffix the resolved link target must end with, usually a fragment.
	pub href_suffix: String,
}

impl ExpectedItem {
	pub fn new(text: &str, href_suffix: &str) -> Self {
		Self {
			text: text.to_string(),
			href_suffix: href_suffix.to_string(),
		}
	}
}

impl Default for DropdownContract {
	fn default() -> Self {
		Self {
			toggle: ".dropdown".to_string(),
			menu: ".dropdown-menu".to_string(),
			items: ".dropdown-menu li a".to_string(),
			first_item: ".dropdown-menu li:first-child a".to_string(),
			expected: vec![
				ExpectedItem::new("Projects", "#projects"),
				ExpectedItem::new("Contact", "#contact"),
				ExpectedItem::new("Resources", "#resources"),
			],
		}
	}
}

impl DropdownContract {
	pub fn expected_texts(&self) -> impl Iterator<Item = &str> {
		self.expected.iter().map(|item| item.text.as_str())
	}

	pub fn expected_href_suffixes(&self) -> impl Iterator<Item = &str> {
		self.expected.iter().map(|item| item.href_suffix.as_str())
	}
}
