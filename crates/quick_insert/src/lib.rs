//! Slash-triggered quick insert menu.
//!
//! Typing the trigger character (`/` by default) at the start of a word opens
//! a floating menu of block commands anchored at the trigger. Further typing
//! filters the menu by key prefix; arrow keys move the highlight, Enter or a
//! pointer click runs the command, Escape closes the menu.
//!
//! # Components
//!
//! * [`TriggerDetector`] turns document change notifications into
//!   [`SpanEvent`]s for the live [`MatchSpan`].
//! * [`filter`] and [`ItemsProvider`] pick the commands for a query.
//! * [`OverlayController`] mounts, updates and destroys the menu through a
//!   host [`MenuRenderer`] and routes keys to the [`MenuList`].
//! * [`CommandExecutor`] deletes the typed span as one undo step, then runs
//!   the command effect.
//! * [`QuickInsert`] wires them to a host implementing [`QuickInsertHost`].
//!
//! The document itself is never owned here; see [`host`].

pub mod catalog;
pub mod config;
pub mod decoration;
pub mod detector;
pub mod error;
pub mod executor;
pub mod extension;
pub mod filter;
pub mod host;
pub mod overlay;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod testing;

pub use catalog::{BUILTIN_COMMANDS, CommandDescriptor, CommandEffect, find_command};
pub use config::{ConfigError, QuickInsertConfig, QuickInsertOptions};
pub use decoration::{Decoration, PlaceholderHint, placeholder_hint};
pub use detector::{ChangeNotification, MatchSpan, SpanCloseReason, SpanEvent, TriggerDetector};
pub use error::{DocumentError, EffectError, QuickInsertError, RenderError};
pub use executor::{CommandExecutor, OnCommandFn};
pub use extension::{KeyDisposition, QuickInsert};
pub use filter::{CatalogItems, FnItemsProvider, ItemsProvider, filter};
pub use host::{BlockInfo, BlockKind, CaretGeometry, DocumentHost, EditorId, NodeKind, QuickInsertHost, StructuralEdit, UserContext};
pub use overlay::{MenuHandle, MenuKeyOutcome, MenuList, MenuProps, MenuRenderer, OverlayController, OverlayKeyOutcome, OverlayState, Placement};
