//! Function declarations called on resolved elements (`this` is the element).
//!
//! They return primitives only so the result arrives by value.

/// Visibility rules: connected, no `display: none` up the tree, not
/// `visibility: hidden|collapse`, not fully transparent, non-empty box.
pub const IS_VISIBLE_FN: &str = r#"function() {
	if (!this.isConnected) return false;
	for (let node = this; node; node = node.parentElement) {
		if (getComputedStyle(node).display === 'none') return false;
	}
	const style = getComputedStyle(this);
	if (style.visibility === 'hidden' || style.visibility === 'collapse') return false;
	if (style.opacity === '0') return false;
	const rect = this.getBoundingClientRect();
	return rect.width > 0 && rect.height > 0;
}"#;

/// Reads one computed style property.
pub fn computed_style_fn(property: &str) -> String {
	// A JSON string literal is a valid JS string literal.
	let property = serde_json::Value::from(property);
	format!("function() {{ return getComputedStyle(this).getPropertyValue({property}); }}")
}
