//! Menu list model: matches, highlight and scroll window.

use scribe_primitives::{Key, KeyCode, Modifiers};

use crate::catalog::CommandDescriptor;

/// Result of routing a key to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKeyOutcome {
	/// The menu does not use this key.
	Ignored,
	/// The highlight moved.
	Moved,
	/// The item at this index was chosen.
	Chosen(usize),
}

/// State of the quick insert menu.
#[derive(Debug, Clone)]
pub struct MenuList {
	items: Vec<CommandDescriptor>,
	highlighted: Option<usize>,
	scroll_offset: usize,
	max_visible: usize,
}

impl MenuList {
	pub fn new(items: Vec<CommandDescriptor>, max_visible: usize) -> Self {
		let highlighted = (!items.is_empty()).then_some(0);
		Self {
			items,
			highlighted,
			scroll_offset: 0,
			max_visible: max_visible.max(1),
		}
	}

	pub fn items(&self) -> &[CommandDescriptor] {
		&self.items
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn highlighted(&self) -> Option<usize> {
		self.highlighted
	}

	pub fn highlighted_item(&self) -> Option<&CommandDescriptor> {
		self.highlighted.and_then(|i| self.items.get(i))
	}

	/// Replaces the items; the highlight returns to the top when they change.
	pub fn set_items(&mut self, items: Vec<CommandDescriptor>) {
		if items == self.items {
			return;
		}
		self.highlighted = (!items.is_empty()).then_some(0);
		self.scroll_offset = 0;
		self.items = items;
	}

	/// Returns the range of visible items (start..end indices).
	pub fn visible_range(&self) -> std::ops::Range<usize> {
		let end = (self.scroll_offset + self.max_visible).min(self.items.len());
		self.scroll_offset.min(end)..end
	}

	/// Moves the highlight by `delta`, wrapping at both ends.
	pub fn move_by(&mut self, delta: isize) {
		let len = self.items.len();
		if len == 0 {
			return;
		}
		let current = self.highlighted.unwrap_or(0) as isize;
		let next = (current + delta).rem_euclid(len as isize) as usize;
		self.highlighted = Some(next);
		self.ensure_highlight_visible();
	}

	/// Moves the highlight by one page, clamping at both ends.
	pub fn page(&mut self, direction: isize) {
		let len = self.items.len();
		if len == 0 {
			return;
		}
		let current = self.highlighted.unwrap_or(0);
		let next = if direction < 0 {
			current.saturating_sub(self.max_visible)
		} else {
			(current + self.max_visible).min(len - 1)
		};
		self.highlighted = Some(next);
		self.ensure_highlight_visible();
	}

	/// Applies menu navigation for `key`.
	pub fn handle_key(&mut self, key: &Key) -> MenuKeyOutcome {
		if key.is_enter() {
			return match self.highlighted {
				Some(idx) if idx < self.items.len() => MenuKeyOutcome::Chosen(idx),
				_ => MenuKeyOutcome::Ignored,
			};
		}

		let bare = key.modifiers.is_empty();
		match key.code {
			KeyCode::Up if bare => self.navigate(|m| m.move_by(-1)),
			KeyCode::Down if bare => self.navigate(|m| m.move_by(1)),
			KeyCode::Char('p') if key.modifiers == Modifiers::CTRL => self.navigate(|m| m.move_by(-1)),
			KeyCode::Char('n') if key.modifiers == Modifiers::CTRL => self.navigate(|m| m.move_by(1)),
			KeyCode::PageUp if bare => self.navigate(|m| m.page(-1)),
			KeyCode::PageDown if bare => self.navigate(|m| m.page(1)),
			_ => MenuKeyOutcome::Ignored,
		}
	}

	fn navigate(&mut self, f: impl FnOnce(&mut Self)) -> MenuKeyOutcome {
		if self.items.is_empty() {
			return MenuKeyOutcome::Ignored;
		}
		f(self);
		MenuKeyOutcome::Moved
	}

	fn ensure_highlight_visible(&mut self) {
		let Some(selected) = self.highlighted else {
			return;
		};
		if selected < self.scroll_offset {
			self.scroll_offset = selected;
		}
		let visible_end = self.scroll_offset + self.max_visible;
		if selected >= visible_end {
			self.scroll_offset = selected.saturating_sub(self.max_visible - 1);
		}
	}
}
