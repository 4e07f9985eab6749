//! Trigger detection over document change notifications.
//!
//! The detector owns the only [`MatchSpan`]. It opens one when the user types
//! the trigger character at a word boundary, follows the caret while the user
//! types the query, and closes it as soon as the caret or the text leaves the
//! matchable region.

use scribe_primitives::{Bias, CharIdx, ChangeSet, RopeSlice, char_at, char_before, slice_to_string, transaction::Operation};
use tracing::trace;

/// Offsets of the trigger character through the caret, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
	/// Offset of the trigger character.
	pub start: CharIdx,
	/// Caret offset; one past the last query character.
	pub end: CharIdx,
}

impl MatchSpan {
	pub fn new(start: CharIdx, end: CharIdx) -> Self {
		Self { start, end }
	}

	/// Text typed after the trigger character.
	pub fn query(&self, text: RopeSlice) -> String {
		slice_to_string(text, self.start + 1, self.end)
	}
}

/// Why a match span ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanCloseReason {
	/// The user pressed Escape.
	Escaped,
	/// The trigger character was removed.
	DeletedTrigger,
	/// The caret moved outside the span, or the user typed past the match.
	CaretLeftSpan,
	/// A command was chosen and the span text removed.
	Committed,
	/// The editor lost focus or became read-only.
	Blurred,
}

/// Span lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanEvent {
	Opened(MatchSpan),
	Updated { span: MatchSpan, query: String },
	Closed(SpanCloseReason),
}

/// A document change as seen by the detector.
#[derive(Debug, Clone, Copy)]
pub struct ChangeNotification<'a> {
	/// Document text after the change.
	pub text: RopeSlice<'a>,
	/// Caret offset after the change.
	pub cursor: CharIdx,
	/// The edit that produced this state; `None` for caret-only updates.
	pub changes: Option<&'a ChangeSet>,
	pub editable: bool,
}

impl ChangeNotification<'_> {
	fn edited(&self) -> bool {
		self.changes.is_some_and(|c| !c.is_identity())
	}
}

/// Watches text input for the trigger character.
#[derive(Debug)]
pub struct TriggerDetector {
	trigger: char,
	allow_spaces: bool,
	span: Option<MatchSpan>,
	/// End of the typed query, mapped through edits. The caret may sit
	/// anywhere in `(span.start, typed_end]` without closing the span.
	typed_end: CharIdx,
}

impl TriggerDetector {
	pub fn new(trigger: char, allow_spaces: bool) -> Self {
		Self {
			trigger,
			allow_spaces,
			span: None,
			typed_end: 0,
		}
	}

	pub fn trigger(&self) -> char {
		self.trigger
	}

	/// The live span, if matching is active.
	pub fn span(&self) -> Option<MatchSpan> {
		self.span
	}

	pub fn is_active(&self) -> bool {
		self.span.is_some()
	}

	/// Processes one change notification.
	pub fn on_change(&mut self, n: &ChangeNotification<'_>) -> Option<SpanEvent> {
		if !n.editable {
			return self.dismiss(SpanCloseReason::Blurred);
		}

		match self.span {
			None => self.try_open(n),
			Some(span) => self.track(span, n),
		}
	}

	/// Ends the live span from outside (Escape, commit, blur).
	pub fn dismiss(&mut self, reason: SpanCloseReason) -> Option<SpanEvent> {
		self.span.take().map(|span| {
			trace!(?span, ?reason, "match span closed");
			SpanEvent::Closed(reason)
		})
	}

	/// Drops the live span without reporting it.
	pub fn reset(&mut self) {
		self.span = None;
	}

	fn try_open(&mut self, n: &ChangeNotification<'_>) -> Option<SpanEvent> {
		if !n.edited() || char_before(n.text, n.cursor) != Some(self.trigger) {
			return None;
		}

		let start = n.cursor - 1;
		if char_before(n.text, start).is_some_and(|c| !c.is_whitespace()) {
			return None;
		}

		let span = MatchSpan::new(start, n.cursor);
		trace!(?span, "match span opened");
		self.span = Some(span);
		self.typed_end = n.cursor;
		Some(SpanEvent::Opened(span))
	}

	fn track(&mut self, span: MatchSpan, n: &ChangeNotification<'_>) -> Option<SpanEvent> {
		let (start, typed_end) = match n.changes {
			Some(cs) => (cs.map_pos(span.start, Bias::Right), cs.map_pos(self.typed_end, Bias::Right)),
			None => (span.start, self.typed_end),
		};

		if char_at(n.text, start) != Some(self.trigger) {
			return self.dismiss(SpanCloseReason::DeletedTrigger);
		}
		if n.cursor <= start || n.cursor > typed_end {
			return self.dismiss(SpanCloseReason::CaretLeftSpan);
		}

		// A trigger typed inside the query restarts matching at the newest one.
		if n.cursor > start + 1 && n.changes.is_some_and(|cs| inserted_trigger_at(cs, n.cursor, self.trigger)) {
			let restarted = MatchSpan::new(n.cursor - 1, n.cursor);
			trace!(span = ?restarted, "match span restarted");
			self.span = Some(restarted);
			self.typed_end = n.cursor;
			return Some(SpanEvent::Updated {
				span: restarted,
				query: String::new(),
			});
		}

		let next = MatchSpan::new(start, n.cursor);
		let query = next.query(n.text);
		if query.contains('\n') || (!self.allow_spaces && query.chars().any(char::is_whitespace)) {
			return self.dismiss(SpanCloseReason::CaretLeftSpan);
		}

		self.typed_end = typed_end;
		if next == span && !n.edited() {
			return None;
		}

		trace!(span = ?next, %query, "match span updated");
		self.span = Some(next);
		Some(SpanEvent::Updated { span: next, query })
	}
}

/// Returns true if `cs` inserted text ending in `trigger` right before `pos`.
///
/// `pos` is an offset in the document after `cs` applied.
fn inserted_trigger_at(cs: &ChangeSet, pos: CharIdx, trigger: char) -> bool {
	let mut new_pos = 0;
	for op in cs.changes() {
		match op {
			Operation::Retain(n) => new_pos += n,
			Operation::Delete(_) => {}
			Operation::Insert(ins) => {
				new_pos += ins.char_len();
				if new_pos == pos {
					return ins.text().ends_with(trigger);
				}
			}
		}
		if new_pos > pos {
			break;
		}
	}
	false
}
