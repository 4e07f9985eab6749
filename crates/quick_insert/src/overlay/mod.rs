//! Floating menu lifecycle.
//!
//! [`OverlayController`] is an explicit two-state machine. The renderer handle
//! exists only inside [`OverlayState::Open`], so a closed overlay has nothing
//! left to update or destroy, and [`OverlayController::close`] can run any
//! number of times.

use std::mem;

use scribe_primitives::{ClientRect, Key};
use tracing::{debug, warn};

pub mod menu;
pub mod render;

pub use menu::{MenuKeyOutcome, MenuList};
pub use render::{MenuHandle, MenuProps, MenuRenderer, Placement};

use crate::catalog::CommandDescriptor;
use crate::detector::MatchSpan;
use crate::error::RenderError;
use crate::host::{CaretGeometry, EditorId, QuickInsertHost};

/// Default number of rows shown before the menu scrolls.
pub const DEFAULT_MAX_VISIBLE: usize = 10;

/// Data held while the menu is mounted.
#[derive(Debug)]
pub struct OpenOverlay {
	/// Client rectangle of the trigger character.
	pub anchor: ClientRect,
	pub span: MatchSpan,
	pub query: String,
	pub menu: MenuList,
	handle: MenuHandle,
}

impl OpenOverlay {
	pub fn handle(&self) -> &MenuHandle {
		&self.handle
	}
}

#[derive(Debug, Default)]
pub enum OverlayState {
	#[default]
	Closed,
	Open(OpenOverlay),
}

/// What the overlay did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKeyOutcome {
	/// The menu consumed the key.
	Handled,
	/// The key belongs to the editor.
	Unhandled,
	/// Escape closed the menu.
	Dismissed,
	/// Enter chose this command; the menu is still mounted.
	Chosen(CommandDescriptor),
}

/// Owns the menu renderer and the single live menu instance.
pub struct OverlayController<R: MenuRenderer> {
	owner: EditorId,
	renderer: R,
	placement: Placement,
	max_visible: usize,
	state: OverlayState,
}

impl<R: MenuRenderer> OverlayController<R> {
	pub fn new(owner: EditorId, renderer: R) -> Self {
		Self {
			owner,
			renderer,
			placement: Placement::default(),
			max_visible: DEFAULT_MAX_VISIBLE,
			state: OverlayState::Closed,
		}
	}

	pub fn with_placement(mut self, placement: Placement) -> Self {
		self.placement = placement;
		self
	}

	pub fn with_max_visible(mut self, max_visible: usize) -> Self {
		self.max_visible = max_visible.max(1);
		self
	}

	pub fn owner(&self) -> EditorId {
		self.owner
	}

	pub fn is_open(&self) -> bool {
		matches!(self.state, OverlayState::Open(_))
	}

	pub fn state(&self) -> &OverlayState {
		&self.state
	}

	pub fn renderer(&self) -> &R {
		&self.renderer
	}

	pub fn renderer_mut(&mut self) -> &mut R {
		&mut self.renderer
	}

	fn open_state(&self) -> Option<&OpenOverlay> {
		match &self.state {
			OverlayState::Open(open) => Some(open),
			OverlayState::Closed => None,
		}
	}

	pub fn query(&self) -> Option<&str> {
		self.open_state().map(|o| o.query.as_str())
	}

	pub fn matches(&self) -> &[CommandDescriptor] {
		self.open_state().map_or(&[], |o| o.menu.items())
	}

	pub fn anchor(&self) -> Option<ClientRect> {
		self.open_state().map(|o| o.anchor)
	}

	/// Mounts the menu for `span`.
	///
	/// Returns `Ok(false)` without touching the renderer when the host is
	/// read-only or the trigger cannot be located on screen. An already open
	/// menu is updated in place instead of mounting a second instance.
	pub fn open(
		&mut self,
		host: &dyn QuickInsertHost,
		span: MatchSpan,
		query: &str,
		matches: Vec<CommandDescriptor>,
	) -> Result<bool, RenderError> {
		if self.is_open() {
			self.update(host, span, query, matches)?;
			return Ok(true);
		}
		if !host.is_editable() {
			debug!(editor = %self.owner, "quick insert suppressed in read-only mode");
			return Ok(false);
		}
		let Some(anchor) = host.caret_rect(span.start) else {
			debug!(editor = %self.owner, ?span, "trigger has no client rect; menu not mounted");
			return Ok(false);
		};

		let menu = MenuList::new(matches, self.max_visible);
		let props = MenuProps {
			owner: self.owner,
			anchor,
			placement: self.placement,
			query,
			items: menu.items(),
			highlighted: menu.highlighted(),
			visible: menu.visible_range(),
		};
		let handle = self.renderer.mount(&props).inspect_err(|error| {
			warn!(editor = %self.owner, %error, "quick insert menu failed to mount");
		})?;

		debug!(editor = %self.owner, ?span, handle = handle.id(), "quick insert menu opened");
		self.state = OverlayState::Open(OpenOverlay {
			anchor,
			span,
			query: query.to_owned(),
			menu,
			handle,
		});
		Ok(true)
	}

	/// Replaces the query and matches of the open menu and re-anchors it.
	///
	/// No-op when closed. A renderer failure tears the menu down.
	pub fn update(
		&mut self,
		geometry: &dyn CaretGeometry,
		span: MatchSpan,
		query: &str,
		matches: Vec<CommandDescriptor>,
	) -> Result<(), RenderError> {
		let OverlayState::Open(open) = &mut self.state else {
			return Ok(());
		};
		open.menu.set_items(matches);
		open.span = span;
		open.query.clear();
		open.query.push_str(query);
		if let Some(anchor) = geometry.caret_rect(span.start) {
			open.anchor = anchor;
		}
		self.push_props()
	}

	/// Routes a key press to the open menu.
	pub fn key_down(&mut self, key: &Key) -> Result<OverlayKeyOutcome, RenderError> {
		let OverlayState::Open(open) = &mut self.state else {
			return Ok(OverlayKeyOutcome::Unhandled);
		};
		if key.is_escape() {
			self.close();
			return Ok(OverlayKeyOutcome::Dismissed);
		}
		match open.menu.handle_key(key) {
			MenuKeyOutcome::Ignored => Ok(OverlayKeyOutcome::Unhandled),
			MenuKeyOutcome::Moved => {
				self.push_props()?;
				Ok(OverlayKeyOutcome::Handled)
			}
			MenuKeyOutcome::Chosen(idx) => Ok(open
				.menu
				.items()
				.get(idx)
				.copied()
				.map_or(OverlayKeyOutcome::Unhandled, OverlayKeyOutcome::Chosen)),
		}
	}

	/// Returns the item at `index` of the open menu, for pointer selection.
	pub fn item(&self, index: usize) -> Option<CommandDescriptor> {
		self.open_state().and_then(|o| o.menu.items().get(index).copied())
	}

	/// Unmounts the menu. Returns false if it was already closed.
	pub fn close(&mut self) -> bool {
		match mem::take(&mut self.state) {
			OverlayState::Open(open) => {
				debug!(editor = %self.owner, handle = open.handle.id(), "quick insert menu closed");
				self.renderer.destroy(open.handle);
				true
			}
			OverlayState::Closed => false,
		}
	}

	fn push_props(&mut self) -> Result<(), RenderError> {
		let OverlayState::Open(open) = &self.state else {
			return Ok(());
		};
		let props = MenuProps {
			owner: self.owner,
			anchor: open.anchor,
			placement: self.placement,
			query: &open.query,
			items: open.menu.items(),
			highlighted: open.menu.highlighted(),
			visible: open.menu.visible_range(),
		};
		let result = self.renderer.update(&open.handle, &props);
		if let Err(error) = &result {
			warn!(editor = %self.owner, %error, "quick insert menu update failed; closing");
			self.close();
		}
		result
	}
}

impl<R: MenuRenderer> Drop for OverlayController<R> {
	fn drop(&mut self) {
		self.close();
	}
}
