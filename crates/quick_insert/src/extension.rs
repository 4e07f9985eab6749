//! Host-facing quick insert extension.
//!
//! [`QuickInsert`] glues the trigger detector, the items provider, the
//! overlay controller and the command executor together. The host forwards
//! document changes, key presses, pointer selection and blur to it; every
//! callback takes `&mut self`, so transitions never interleave.

use scribe_primitives::{ChangeSet, Key};
use tracing::debug;

use crate::catalog::CommandDescriptor;
use crate::config::{QuickInsertConfig, QuickInsertOptions};
use crate::decoration::{Decoration, PlaceholderHint, placeholder_hint};
use crate::detector::{ChangeNotification, MatchSpan, SpanCloseReason, SpanEvent, TriggerDetector};
use crate::error::QuickInsertError;
use crate::executor::CommandExecutor;
use crate::filter::ItemsProvider;
use crate::host::{DocumentHost, EditorId, QuickInsertHost, UserContext};
use crate::overlay::{MenuRenderer, OverlayController, OverlayKeyOutcome};

/// Whether the editor should still process a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
	/// Quick insert consumed the key.
	Handled,
	/// Pass the key on to the editor.
	Unhandled,
}

/// Slash-command menu attached to one editor.
pub struct QuickInsert<R: MenuRenderer> {
	id: EditorId,
	config: QuickInsertConfig,
	items: Box<dyn ItemsProvider>,
	detector: TriggerDetector,
	overlay: OverlayController<R>,
	executor: CommandExecutor,
}

impl<R: MenuRenderer> QuickInsert<R> {
	pub fn new(id: EditorId, options: QuickInsertOptions, renderer: R) -> Self {
		let QuickInsertOptions {
			config,
			items,
			on_command,
		} = options;
		let overlay = OverlayController::new(id, renderer)
			.with_placement(config.placement)
			.with_max_visible(config.max_visible);
		Self {
			id,
			detector: TriggerDetector::new(config.trigger_char, config.allow_spaces),
			items,
			overlay,
			executor: CommandExecutor::new(on_command),
			config,
		}
	}

	pub fn id(&self) -> EditorId {
		self.id
	}

	pub fn config(&self) -> &QuickInsertConfig {
		&self.config
	}

	pub fn is_open(&self) -> bool {
		self.overlay.is_open()
	}

	pub fn span(&self) -> Option<MatchSpan> {
		self.detector.span()
	}

	pub fn query(&self) -> Option<&str> {
		self.overlay.query()
	}

	pub fn matches(&self) -> &[CommandDescriptor] {
		self.overlay.matches()
	}

	pub fn overlay(&self) -> &OverlayController<R> {
		&self.overlay
	}

	pub fn renderer(&self) -> &R {
		self.overlay.renderer()
	}

	pub fn renderer_mut(&mut self) -> &mut R {
		self.overlay.renderer_mut()
	}

	/// Handles a document or selection change.
	///
	/// `changes` is the edit that produced the current state, or `None` when
	/// only the caret moved.
	pub fn on_change(&mut self, host: &dyn QuickInsertHost, changes: Option<&ChangeSet>) -> Result<(), QuickInsertError> {
		let event = self.detector.on_change(&ChangeNotification {
			text: host.text(),
			cursor: host.cursor(),
			changes,
			editable: host.is_editable(),
		});

		match event {
			None => Ok(()),
			Some(SpanEvent::Opened(span)) => {
				let query = span.query(host.text());
				self.show(host, span, &query)
			}
			Some(SpanEvent::Updated { span, query }) => self.show(host, span, &query),
			Some(SpanEvent::Closed(reason)) => {
				debug!(editor = %self.id, ?reason, "quick insert dismissed");
				self.overlay.close();
				Ok(())
			}
		}
	}

	/// Routes a key press while the menu may be open.
	pub fn on_key_down(
		&mut self,
		host: &mut dyn QuickInsertHost,
		key: &Key,
		user: Option<&UserContext>,
	) -> Result<KeyDisposition, QuickInsertError> {
		let outcome = match self.overlay.key_down(key) {
			Ok(outcome) => outcome,
			Err(error) => {
				self.detector.reset();
				return Err(error.into());
			}
		};

		match outcome {
			OverlayKeyOutcome::Unhandled => Ok(KeyDisposition::Unhandled),
			OverlayKeyOutcome::Handled => Ok(KeyDisposition::Handled),
			OverlayKeyOutcome::Dismissed => {
				self.detector.dismiss(SpanCloseReason::Escaped);
				debug!(editor = %self.id, "quick insert escaped");
				Ok(KeyDisposition::Handled)
			}
			OverlayKeyOutcome::Chosen(descriptor) => {
				self.run(host, &descriptor, user)?;
				Ok(KeyDisposition::Handled)
			}
		}
	}

	/// Runs the menu item at `index`, as chosen with the pointer.
	///
	/// Returns false if no menu is open or the index is out of range.
	pub fn select(&mut self, host: &mut dyn QuickInsertHost, index: usize, user: Option<&UserContext>) -> Result<bool, QuickInsertError> {
		let Some(descriptor) = self.overlay.item(index) else {
			return Ok(false);
		};
		self.run(host, &descriptor, user)?;
		Ok(true)
	}

	/// Closes the menu when the editor loses focus.
	pub fn on_blur(&mut self) {
		if self.detector.dismiss(SpanCloseReason::Blurred).is_some() {
			debug!(editor = %self.id, "quick insert blurred");
		}
		self.overlay.close();
	}

	/// Placeholder decoration for the block at the caret, when enabled.
	pub fn decoration(&self, host: &dyn DocumentHost) -> Option<Decoration> {
		if !self.config.placeholder_hints {
			return None;
		}
		let block = host.enclosing_block()?;
		let hint = placeholder_hint(&block, self.config.trigger_char, host.is_editable())?;
		let text = match hint {
			PlaceholderHint::EmptyBlock => &self.config.empty_hint,
			PlaceholderHint::TriggerTyped => &self.config.trigger_hint,
		};
		Some(Decoration {
			from: block.start,
			to: block.end,
			hint,
			text: text.clone(),
		})
	}

	fn show(&mut self, host: &dyn QuickInsertHost, span: MatchSpan, query: &str) -> Result<(), QuickInsertError> {
		let matches = self.items.items(query);
		match self.overlay.open(host, span, query, matches) {
			Ok(true) => Ok(()),
			Ok(false) => {
				self.detector.reset();
				Ok(())
			}
			Err(error) => {
				self.detector.reset();
				Err(error.into())
			}
		}
	}

	fn run(&mut self, host: &mut dyn QuickInsertHost, descriptor: &CommandDescriptor, user: Option<&UserContext>) -> Result<(), QuickInsertError> {
		let Some(span) = self.detector.span() else {
			self.overlay.close();
			return Ok(());
		};
		debug!(editor = %self.id, command = descriptor.key, ?span, "quick insert command chosen");

		let detector = &mut self.detector;
		let overlay = &mut self.overlay;
		self.executor.execute(host, span, descriptor, user, || {
			detector.dismiss(SpanCloseReason::Committed);
			overlay.close();
		})
	}
}
