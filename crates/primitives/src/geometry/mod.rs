//! Client-space geometry.
//!
//! Coordinates are logical pixels relative to the host viewport, matching what
//! a caret-to-rectangle lookup reports.

#[cfg(test)]
mod tests;

/// An axis-aligned rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientRect {
	pub x: f32,
	pub y: f32,
	pub width: f32,
	pub height: f32,
}

impl ClientRect {
	/// Creates a rectangle, clamping negative sizes to zero.
	pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
		Self {
			x,
			y,
			width: width.max(0.0),
			height: height.max(0.0),
		}
	}

	/// A zero-width rectangle, the usual shape of a caret.
	pub fn caret(x: f32, y: f32, line_height: f32) -> Self {
		Self::new(x, y, 0.0, line_height)
	}
}
