//! Core types for text editing: ranges, transactions, keys and client geometry.

/// Client-space rectangles for anchoring floating UI.
pub mod geometry;
/// Key event types.
pub mod key;
/// Text range types measured in characters.
pub mod range;
/// Rope utilities and extensions.
pub mod rope;
/// Undoable change primitives.
pub mod transaction;

pub use geometry::ClientRect;
pub use key::{Key, KeyCode, Modifiers};
pub use range::{CharIdx, CharLen, Range};
pub use rope::{char_at, char_before, slice_to_string};
pub use ropey::{Rope, RopeSlice};
pub use transaction::{Bias, Change, ChangeSet, Transaction, TransactionError};
