//! Contract between the overlay controller and the host's menu renderer.

use std::ops::Range;

use scribe_primitives::ClientRect;
use serde::Deserialize;

use crate::catalog::CommandDescriptor;
use crate::error::RenderError;
use crate::host::EditorId;

/// Where the floating menu sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
	#[default]
	BottomStart,
	BottomEnd,
	TopStart,
	TopEnd,
}

/// Owned token for one live floating menu instance.
///
/// Not `Clone`: the overlay controller holds the only copy and hands it back
/// to [`MenuRenderer::destroy`], which consumes it.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct MenuHandle(u64);

impl MenuHandle {
	/// Wraps a renderer-assigned instance id.
	pub fn new(id: u64) -> Self {
		Self(id)
	}

	pub fn id(&self) -> u64 {
		self.0
	}
}

/// Everything the renderer needs to draw the menu.
#[derive(Debug, Clone)]
pub struct MenuProps<'a> {
	/// Editor the menu belongs to.
	pub owner: EditorId,
	pub anchor: ClientRect,
	pub placement: Placement,
	pub query: &'a str,
	/// All matching commands; empty renders the "no results" state.
	pub items: &'a [CommandDescriptor],
	pub highlighted: Option<usize>,
	/// Slice of `items` inside the scroll viewport.
	pub visible: Range<usize>,
}

/// Host capability that turns menu props into visible UI.
pub trait MenuRenderer {
	/// Creates a floating instance showing `props`.
	fn mount(&mut self, props: &MenuProps<'_>) -> Result<MenuHandle, RenderError>;

	/// Replaces the props of a live instance.
	fn update(&mut self, handle: &MenuHandle, props: &MenuProps<'_>) -> Result<(), RenderError>;

	/// Tears down the instance and any listeners attached to it.
	fn destroy(&mut self, handle: MenuHandle);
}
