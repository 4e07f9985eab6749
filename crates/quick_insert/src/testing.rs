//! In-memory host and renderer doubles shared by unit tests.

use std::collections::BTreeSet;
use std::ops::Range;

use scribe_primitives::{Bias, CharIdx, ClientRect, Rope, RopeSlice, Transaction};

use crate::catalog::CommandDescriptor;
use crate::error::{DocumentError, RenderError};
use crate::host::{BlockInfo, BlockKind, CaretGeometry, DocumentHost, EditorId, StructuralEdit};
use crate::overlay::{MenuHandle, MenuProps, MenuRenderer, Placement};

/// Pixel width of one character cell in [`MemoryDocument`] geometry.
pub const CELL_WIDTH: f32 = 8.0;
/// Pixel height of one line in [`MemoryDocument`] geometry.
pub const LINE_HEIGHT: f32 = 20.0;

/// Installs a test-writer subscriber once per process.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::TRACE)
		.try_init();
}

/// Host-side effects recorded by [`MemoryDocument`], in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
	Dispatched { text_after: String },
	Structure(StructuralEdit),
	Focused,
}

/// Single-buffer document with one caret, line-based blocks and undo.
#[derive(Debug)]
pub struct MemoryDocument {
	rope: Rope,
	cursor: CharIdx,
	editable: bool,
	active_block: BlockKind,
	depth: usize,
	reject: Option<String>,
	geometry: bool,
	history: Vec<Transaction>,
	structure: Vec<StructuralEdit>,
	events: Vec<HostEvent>,
}

impl MemoryDocument {
	/// Creates a document holding `text` with the caret at the end.
	pub fn new(text: &str) -> Self {
		let rope = Rope::from_str(text);
		let cursor = rope.len_chars();
		Self {
			rope,
			cursor,
			editable: true,
			active_block: BlockKind::Paragraph,
			depth: 1,
			reject: None,
			geometry: true,
			history: Vec::new(),
			structure: Vec::new(),
			events: Vec::new(),
		}
	}

	pub fn rope(&self) -> &Rope {
		&self.rope
	}

	pub fn caret(&self) -> CharIdx {
		self.cursor
	}

	pub fn editable(&self) -> bool {
		self.editable
	}

	pub fn text_string(&self) -> String {
		self.rope.to_string()
	}

	/// Simulates the user typing `text` at the caret.
	pub fn type_text(&mut self, text: &str) -> Transaction {
		let tx = Transaction::insert(self.rope.slice(..), self.cursor, text).expect("caret is in bounds");
		self.apply_user(tx)
	}

	/// Simulates Backspace at the caret.
	pub fn backspace(&mut self) -> Transaction {
		let from = self.cursor.saturating_sub(1);
		let tx = Transaction::delete(self.rope.slice(..), (from..self.cursor).into()).expect("caret is in bounds");
		self.apply_user(tx)
	}

	/// Simulates a remote edit at `pos`; the caret is mapped, not moved to it.
	pub fn insert_at(&mut self, pos: CharIdx, text: &str) -> Transaction {
		let tx = Transaction::insert(self.rope.slice(..), pos, text).expect("position is in bounds");
		let cursor = tx.map_pos(self.cursor, Bias::Right);
		tx.apply(&mut self.rope);
		self.cursor = cursor;
		tx
	}

	pub fn move_cursor(&mut self, pos: CharIdx) {
		self.cursor = pos.min(self.rope.len_chars());
	}

	/// Reverts the most recent dispatched transaction.
	pub fn undo(&mut self) -> bool {
		let Some(inverse) = self.history.pop() else {
			return false;
		};
		inverse.apply(&mut self.rope);
		self.cursor = inverse.cursor().unwrap_or(self.cursor).min(self.rope.len_chars());
		true
	}

	pub fn undo_depth(&self) -> usize {
		self.history.len()
	}

	pub fn set_editable(&mut self, editable: bool) {
		self.editable = editable;
	}

	pub fn set_active_block(&mut self, kind: BlockKind) {
		self.active_block = kind;
	}

	pub fn set_depth(&mut self, depth: usize) {
		self.depth = depth;
	}

	/// Makes every subsequent dispatch fail with [`DocumentError::Rejected`].
	pub fn set_reject_edits(&mut self, reason: Option<&str>) {
		self.reject = reason.map(str::to_owned);
	}

	/// Toggles whether the caret can be measured.
	pub fn set_geometry_available(&mut self, available: bool) {
		self.geometry = available;
	}

	pub fn events(&self) -> &[HostEvent] {
		&self.events
	}

	pub fn structure_log(&self) -> &[StructuralEdit] {
		&self.structure
	}

	pub fn focus_count(&self) -> usize {
		self.events.iter().filter(|e| matches!(e, HostEvent::Focused)).count()
	}

	fn apply_user(&mut self, tx: Transaction) -> Transaction {
		let cursor = tx.cursor().unwrap_or_else(|| tx.map_pos(self.cursor, Bias::Right));
		let inverse = tx.invert(&self.rope).with_cursor(self.cursor);
		tx.apply(&mut self.rope);
		self.cursor = cursor;
		self.history.push(inverse);
		tx
	}

	fn check_editable(&self) -> Result<(), DocumentError> {
		if !self.editable {
			return Err(DocumentError::ReadOnly);
		}
		if let Some(reason) = &self.reject {
			return Err(DocumentError::Rejected(reason.clone()));
		}
		Ok(())
	}
}

impl DocumentHost for MemoryDocument {
	fn text(&self) -> RopeSlice<'_> {
		self.rope.slice(..)
	}

	fn cursor(&self) -> CharIdx {
		self.cursor
	}

	fn is_editable(&self) -> bool {
		self.editable
	}

	fn dispatch(&mut self, tx: Transaction) -> Result<(), DocumentError> {
		self.check_editable()?;
		self.apply_user(tx);
		self.events.push(HostEvent::Dispatched {
			text_after: self.rope.to_string(),
		});
		Ok(())
	}

	fn apply_structure(&mut self, edit: StructuralEdit) -> Result<(), DocumentError> {
		self.check_editable()?;
		if let StructuralEdit::SetBlock(kind) = edit {
			self.active_block = kind;
		}
		self.structure.push(edit.clone());
		self.events.push(HostEvent::Structure(edit));
		Ok(())
	}

	fn enclosing_block(&self) -> Option<BlockInfo> {
		let line = self.rope.char_to_line(self.cursor);
		let start = self.rope.line_to_char(line);
		let text: String = self.rope.line(line).chars().filter(|&c| c != '\n').collect();
		let end = start + text.chars().count();
		Some(BlockInfo {
			start,
			end,
			child_count: usize::from(!text.is_empty()),
			text,
			depth: self.depth,
			kind: self.active_block,
		})
	}

	fn active_block(&self) -> BlockKind {
		self.active_block
	}

	fn focus(&mut self) {
		self.events.push(HostEvent::Focused);
	}
}

impl CaretGeometry for MemoryDocument {
	fn caret_rect(&self, pos: CharIdx) -> Option<ClientRect> {
		if !self.geometry || pos > self.rope.len_chars() {
			return None;
		}
		let line = self.rope.char_to_line(pos);
		let col = pos - self.rope.line_to_char(line);
		Some(ClientRect::caret(col as f32 * CELL_WIDTH, line as f32 * LINE_HEIGHT, LINE_HEIGHT))
	}
}

/// Owned copy of the last props pushed to [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct PropsSnapshot {
	pub owner: EditorId,
	pub anchor: ClientRect,
	pub placement: Placement,
	pub query: String,
	pub keys: Vec<&'static str>,
	pub highlighted: Option<usize>,
	pub visible: Range<usize>,
}

impl From<&MenuProps<'_>> for PropsSnapshot {
	fn from(props: &MenuProps<'_>) -> Self {
		Self {
			owner: props.owner,
			anchor: props.anchor,
			placement: props.placement,
			query: props.query.to_owned(),
			keys: props.items.iter().map(|c: &CommandDescriptor| c.key).collect(),
			highlighted: props.highlighted,
			visible: props.visible.clone(),
		}
	}
}

/// Renderer that records every call and tracks live instances.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
	next_id: u64,
	live: BTreeSet<u64>,
	pub mounts: usize,
	pub updates: usize,
	pub destroys: usize,
	/// Largest number of simultaneously live instances observed.
	pub peak_live: usize,
	pub last: Option<PropsSnapshot>,
	pub fail_mount: bool,
	pub fail_update: bool,
}

impl RecordingRenderer {
	pub fn live_instances(&self) -> usize {
		self.live.len()
	}
}

impl MenuRenderer for RecordingRenderer {
	fn mount(&mut self, props: &MenuProps<'_>) -> Result<MenuHandle, RenderError> {
		if self.fail_mount {
			return Err(RenderError::Mount("surface unavailable".into()));
		}
		self.next_id += 1;
		self.live.insert(self.next_id);
		self.mounts += 1;
		self.peak_live = self.peak_live.max(self.live.len());
		self.last = Some(props.into());
		Ok(MenuHandle::new(self.next_id))
	}

	fn update(&mut self, handle: &MenuHandle, props: &MenuProps<'_>) -> Result<(), RenderError> {
		assert!(self.live.contains(&handle.id()), "update on destroyed menu {}", handle.id());
		if self.fail_update {
			return Err(RenderError::Update("props rejected".into()));
		}
		self.updates += 1;
		self.last = Some(props.into());
		Ok(())
	}

	fn destroy(&mut self, handle: MenuHandle) {
		assert!(self.live.remove(&handle.id()), "menu {} destroyed twice", handle.id());
		self.destroys += 1;
	}
}
