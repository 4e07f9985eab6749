//! Error types for the quick insert subsystem.
//!
//! An empty match list and a suppressed read-only open are deliberately not
//! errors; they are ordinary states.

use scribe_primitives::TransactionError;
use thiserror::Error;

/// Failures reported by the menu renderer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
	/// The renderer could not create a floating instance.
	#[error("failed to mount menu: {0}")]
	Mount(String),
	/// The renderer rejected a props update.
	#[error("failed to update menu: {0}")]
	Update(String),
}

/// Failures reported by the document host when applying an edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
	/// The document is in read-only mode.
	#[error("document is read-only")]
	ReadOnly,
	/// The transaction could not be built against the current text.
	#[error(transparent)]
	Transaction(#[from] TransactionError),
	/// The host refused the edit for its own reasons.
	#[error("edit rejected: {0}")]
	Rejected(String),
}

/// Failures raised by a command effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EffectError {
	/// The command cannot run in the current context.
	#[error("{0}")]
	Unavailable(&'static str),
	/// A document edit issued by the effect failed.
	#[error(transparent)]
	Document(#[from] DocumentError),
	/// Any other failure.
	#[error("{0}")]
	Failed(String),
}

/// Errors surfaced to the host by [`crate::QuickInsert`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuickInsertError {
	#[error(transparent)]
	Render(#[from] RenderError),
	#[error("failed to remove trigger text: {0}")]
	Document(#[from] DocumentError),
	/// The command effect failed after the trigger text was already removed.
	#[error("command '{key}' failed: {source}")]
	Effect {
		key: &'static str,
		#[source]
		source: EffectError,
	},
}
