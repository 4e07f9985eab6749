//! Runs a chosen command against the document.

use std::fmt;
use std::sync::Arc;

use scribe_primitives::{Range, Transaction};
use tracing::{debug, warn};

use crate::catalog::CommandDescriptor;
use crate::detector::MatchSpan;
use crate::error::{DocumentError, EffectError, QuickInsertError};
use crate::host::{DocumentHost, UserContext};

/// Host override for running a chosen command.
///
/// Receives the descriptor after the trigger text has been removed.
pub type OnCommandFn =
	Arc<dyn Fn(&CommandDescriptor, &mut dyn DocumentHost, Option<&UserContext>) -> Result<(), EffectError> + Send + Sync>;

/// Removes the typed trigger and query, then runs the command effect.
#[derive(Clone, Default)]
pub struct CommandExecutor {
	on_command: Option<OnCommandFn>,
}

impl CommandExecutor {
	pub fn new(on_command: Option<OnCommandFn>) -> Self {
		Self { on_command }
	}

	/// Executes `descriptor` for the match in `span`.
	///
	/// The text from `span.start` to the caret is deleted in one dispatched
	/// transaction, so a single undo restores it. `after_delete` runs between
	/// the deletion and the effect. An effect failure leaves the deletion in
	/// place and skips refocusing.
	pub fn execute(
		&self,
		host: &mut dyn DocumentHost,
		span: MatchSpan,
		descriptor: &CommandDescriptor,
		user: Option<&UserContext>,
		after_delete: impl FnOnce(),
	) -> Result<(), QuickInsertError> {
		let end = host.cursor().max(span.start);
		let tx = Transaction::delete(host.text(), Range::new(span.start, end)).map_err(DocumentError::from)?;
		host.dispatch(tx)?;
		debug!(command = descriptor.key, start = span.start, end, "trigger text removed");

		after_delete();

		let result = match &self.on_command {
			Some(on_command) => on_command(descriptor, host, user),
			None => (descriptor.effect)(host, user),
		};
		if let Err(source) = result {
			warn!(command = descriptor.key, error = %source, "quick insert command failed");
			return Err(QuickInsertError::Effect {
				key: descriptor.key,
				source,
			});
		}

		host.focus();
		Ok(())
	}
}

impl fmt::Debug for CommandExecutor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandExecutor")
			.field("on_command", &self.on_command.is_some())
			.finish()
	}
}
