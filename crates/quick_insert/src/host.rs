//! Capabilities consumed from the host editor.
//!
//! The quick insert subsystem never owns the document. It reads text and
//! caret state, dispatches transactions and structural edits, and asks for
//! caret geometry, all through the traits in this module.

use std::fmt;

use scribe_image::ImageAttrs;
use scribe_primitives::{CharIdx, ClientRect, RopeSlice, Transaction};

use crate::error::DocumentError;

/// Identifies the editor instance a quick insert extension belongs to.
///
/// Passed explicitly to the overlay controller and stamped on every menu it
/// renders, so a host running several editors can route menu callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditorId(pub u64);

impl fmt::Display for EditorId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "editor#{}", self.0)
	}
}

/// Optional payload about the acting user, forwarded to command effects.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
	pub user_id: String,
	pub display_name: Option<String>,
}

/// Kind of textblock or container a block represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
	Paragraph,
	/// Heading with level 1..=6.
	Heading(u8),
	/// The document title block.
	Title,
	BulletList,
	OrderedList,
	TaskList,
	Blockquote,
	CodeBlock,
	Callout,
}

/// Leaf nodes a command may insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	HorizontalRule,
	Table { rows: u16, cols: u16, header_row: bool },
	Image(ImageAttrs),
}

/// A structural document edit issued by a command effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralEdit {
	/// Convert or wrap the block at the caret.
	SetBlock(BlockKind),
	/// Insert a node at the caret.
	Insert(NodeKind),
}

/// Snapshot of the block enclosing the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockInfo {
	/// Offset of the first character inside the block.
	pub start: CharIdx,
	/// Offset one past the last character inside the block.
	pub end: CharIdx,
	pub text: String,
	/// Nesting depth; top-level blocks have depth 1.
	pub depth: usize,
	/// Number of inline children (text runs, hard breaks, inline nodes).
	pub child_count: usize,
	pub kind: BlockKind,
}

/// Editable document capability.
pub trait DocumentHost {
	/// Full document text.
	fn text(&self) -> RopeSlice<'_>;

	/// Current caret offset.
	fn cursor(&self) -> CharIdx;

	/// Whether the editor currently accepts edits.
	fn is_editable(&self) -> bool;

	/// Applies `tx` as a single undoable step.
	fn dispatch(&mut self, tx: Transaction) -> Result<(), DocumentError>;

	/// Applies a structural edit as its own undoable step.
	fn apply_structure(&mut self, edit: StructuralEdit) -> Result<(), DocumentError>;

	/// The block enclosing the caret, if the caret is inside a textblock.
	fn enclosing_block(&self) -> Option<BlockInfo>;

	/// Kind of the block at the caret.
	fn active_block(&self) -> BlockKind;

	/// Returns keyboard focus to the editing surface.
	fn focus(&mut self);
}

/// Maps document offsets to client rectangles.
///
/// Evaluated on demand; results must not be cached across renders because
/// text reflow moves the caret.
pub trait CaretGeometry {
	fn caret_rect(&self, pos: CharIdx) -> Option<ClientRect>;
}

/// Everything the quick insert extension needs from its host.
pub trait QuickInsertHost: DocumentHost + CaretGeometry {}

impl<T: DocumentHost + CaretGeometry + ?Sized> QuickInsertHost for T {}
