//! Rope utilities and extensions.

use ropey::RopeSlice;

use crate::range::CharIdx;

/// Returns the character at `pos`, or `None` past the end.
#[inline]
pub fn char_at(text: RopeSlice, pos: CharIdx) -> Option<char> {
	text.get_char(pos)
}

/// Returns the character immediately before `pos`.
///
/// `None` at the start of the document or when `pos` is out of bounds.
#[inline]
pub fn char_before(text: RopeSlice, pos: CharIdx) -> Option<char> {
	if pos == 0 || pos > text.len_chars() {
		return None;
	}
	text.get_char(pos - 1)
}

/// Copies `[from, to)` into an owned string, clamping both ends to the text.
pub fn slice_to_string(text: RopeSlice, from: CharIdx, to: CharIdx) -> String {
	let len = text.len_chars();
	let to = to.min(len);
	let from = from.min(to);
	text.slice(from..to).to_string()
}
