//! Undoable document changes.
//!
//! A [`Transaction`] wraps a [`ChangeSet`] together with the cursor position
//! the document should adopt once the change lands. Hosts apply one
//! transaction per undo step.

mod changeset;
mod types;


pub use changeset::ChangeSet;
use thiserror::Error;
pub use types::{Bias, Change, Insertion, Operation};

use crate::range::{CharIdx, Range};
use crate::{Rope, RopeSlice};

/// Errors raised while building a transaction against a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
	/// A change extends past the end of the document.
	#[error("change [{start}, {end}) exceeds document length {len}")]
	OutOfBounds {
		/// Start of the offending change.
		start: CharIdx,
		/// End of the offending change.
		end: CharIdx,
		/// Document length in characters.
		len: usize,
	},
	/// Changes overlap or are not sorted by position.
	#[error("change at {start} overlaps the previous change ending at {prev_end}")]
	Overlapping {
		/// Start of the offending change.
		start: CharIdx,
		/// End of the change before it.
		prev_end: CharIdx,
	},
	/// A change has `start > end`.
	#[error("change start {start} is after its end {end}")]
	Inverted {
		/// Start of the offending change.
		start: CharIdx,
		/// End of the offending change.
		end: CharIdx,
	},
}

/// A set of document changes applied as one undoable step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
	changes: ChangeSet,
	cursor: Option<CharIdx>,
}

impl Transaction {
	/// Creates a transaction from sorted, non-overlapping changes.
	pub fn change(doc: RopeSlice, changes: impl IntoIterator<Item = Change>) -> Result<Self, TransactionError> {
		let len = doc.len_chars();
		let mut cs = ChangeSet::default();
		let mut last = 0;

		for change in changes {
			if change.start > change.end {
				return Err(TransactionError::Inverted {
					start: change.start,
					end: change.end,
				});
			}
			if change.end > len {
				return Err(TransactionError::OutOfBounds {
					start: change.start,
					end: change.end,
					len,
				});
			}
			if change.start < last {
				return Err(TransactionError::Overlapping {
					start: change.start,
					prev_end: last,
				});
			}

			cs.retain(change.start - last);
			cs.delete(change.end - change.start);
			if let Some(text) = change.replacement {
				cs.insert(text);
			}
			last = change.end;
		}
		cs.retain(len - last);

		Ok(Self { changes: cs, cursor: None })
	}

	/// Deletes `range` and places the cursor where it started.
	pub fn delete(doc: RopeSlice, range: Range) -> Result<Self, TransactionError> {
		let tx = Self::change(doc, [Change::delete(range.min(), range.max())])?;
		Ok(tx.with_cursor(range.min()))
	}

	/// Inserts `text` at `pos` and places the cursor after it.
	pub fn insert(doc: RopeSlice, pos: CharIdx, text: impl Into<String>) -> Result<Self, TransactionError> {
		let text = text.into();
		let after = pos + text.chars().count();
		let tx = Self::change(doc, [Change::insert(pos, text)])?;
		Ok(tx.with_cursor(after))
	}

	/// Sets the cursor the document adopts after applying.
	pub fn with_cursor(mut self, pos: CharIdx) -> Self {
		self.cursor = Some(pos);
		self
	}

	/// Returns the underlying changeset.
	pub fn changes(&self) -> &ChangeSet {
		&self.changes
	}

	/// Returns the cursor requested by this transaction, if any.
	pub fn cursor(&self) -> Option<CharIdx> {
		self.cursor
	}

	/// Returns true if applying leaves the text unchanged.
	pub fn is_identity(&self) -> bool {
		self.changes.is_identity()
	}

	/// Applies the changes to `doc`.
	pub fn apply(&self, doc: &mut Rope) {
		self.changes.apply(doc);
	}

	/// Builds the transaction that undoes this one.
	///
	/// `original` must be the document before this transaction applied.
	pub fn invert(&self, original: &Rope) -> Self {
		Self {
			changes: self.changes.invert(original),
			cursor: None,
		}
	}

	/// Maps a position through the changes.
	pub fn map_pos(&self, pos: CharIdx, bias: Bias) -> CharIdx {
		self.changes.map_pos(pos, bias)
	}
}
