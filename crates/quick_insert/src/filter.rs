//! Query matching over the command catalog.

use crate::catalog::{BUILTIN_COMMANDS, CommandDescriptor};

/// Returns the commands whose key starts with `query`, in catalog order.
///
/// Matching is case-sensitive and exact-prefix. An empty query returns the
/// whole catalog; an empty result is a valid outcome.
pub fn filter(catalog: &[CommandDescriptor], query: &str) -> Vec<CommandDescriptor> {
	catalog.iter().filter(|c| c.matches(query)).copied().collect()
}

/// Capability contract for menu item providers.
pub trait ItemsProvider: Send + Sync {
	/// Returns the commands to show for the active query, in display order.
	fn items(&self, query: &str) -> Vec<CommandDescriptor>;
}

/// Prefix filter over a static catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogItems {
	catalog: &'static [CommandDescriptor],
}

impl CatalogItems {
	pub fn new(catalog: &'static [CommandDescriptor]) -> Self {
		Self { catalog }
	}
}

impl Default for CatalogItems {
	fn default() -> Self {
		Self::new(BUILTIN_COMMANDS)
	}
}

impl ItemsProvider for CatalogItems {
	fn items(&self, query: &str) -> Vec<CommandDescriptor> {
		filter(self.catalog, query)
	}
}

/// Closure-backed provider adapter.
pub struct FnItemsProvider<F> {
	f: F,
}

impl<F> FnItemsProvider<F> {
	pub fn new(f: F) -> Self {
		Self { f }
	}
}

impl<F> ItemsProvider for FnItemsProvider<F>
where
	F: Fn(&str) -> Vec<CommandDescriptor> + Send + Sync,
{
	fn items(&self, query: &str) -> Vec<CommandDescriptor> {
		(self.f)(query)
	}
}
