//! Placeholder hint shown in an empty top-level paragraph.

use crate::host::{BlockInfo, BlockKind};

/// Which hint text the enclosing block should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderHint {
	/// The block is empty.
	EmptyBlock,
	/// The block holds nothing but the trigger character.
	TriggerTyped,
}

/// A node decoration covering one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoration {
	pub from: usize,
	pub to: usize,
	pub hint: PlaceholderHint,
	/// Text the host renders as the placeholder.
	pub text: String,
}

/// Picks the hint for `block`, if any.
///
/// Only top-level paragraphs of an editable document are decorated.
pub fn placeholder_hint(block: &BlockInfo, trigger: char, editable: bool) -> Option<PlaceholderHint> {
	if !editable || block.depth != 1 || block.kind != BlockKind::Paragraph {
		return None;
	}
	if block.child_count == 0 && block.text.is_empty() {
		return Some(PlaceholderHint::EmptyBlock);
	}
	let mut chars = block.text.chars();
	if block.child_count == 1 && chars.next() == Some(trigger) && chars.next().is_none() {
		return Some(PlaceholderHint::TriggerTyped);
	}
	None
}
