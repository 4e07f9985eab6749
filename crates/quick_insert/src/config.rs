//! Quick insert configuration.
//!
//! [`QuickInsertConfig`] holds the plain settings and deserializes from the
//! `[quick-insert]` table of a TOML settings file. [`QuickInsertOptions`]
//! adds the hooks that cannot be expressed in a file.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::executor::OnCommandFn;
use crate::filter::{CatalogItems, ItemsProvider};
use crate::overlay::{DEFAULT_MAX_VISIBLE, Placement};

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("invalid quick insert config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("trigger character {0:?} must be a visible symbol")]
	InvalidTrigger(char),
	#[error("max-visible must be at least 1")]
	InvalidMaxVisible,
}

/// File-backed quick insert settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct QuickInsertConfig {
	/// Character that opens the menu.
	pub trigger_char: char,
	/// Keep matching after a space in the query.
	pub allow_spaces: bool,
	pub placement: Placement,
	/// Menu rows shown before scrolling.
	pub max_visible: usize,
	/// Show the empty-block placeholder decoration.
	pub placeholder_hints: bool,
	pub empty_hint: String,
	pub trigger_hint: String,
}

impl Default for QuickInsertConfig {
	fn default() -> Self {
		Self {
			trigger_char: '/',
			allow_spaces: false,
			placement: Placement::default(),
			max_visible: DEFAULT_MAX_VISIBLE,
			placeholder_hints: false,
			empty_hint: "Type / for commands".into(),
			trigger_hint: "Keep typing to filter".into(),
		}
	}
}

#[derive(Deserialize)]
struct SettingsFile {
	#[serde(rename = "quick-insert", default)]
	quick_insert: QuickInsertConfig,
}

impl QuickInsertConfig {
	/// Reads the `[quick-insert]` table of a settings file.
	///
	/// Other tables are ignored; a missing table yields the defaults.
	pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
		let file: SettingsFile = toml::from_str(src)?;
		file.quick_insert.validate()
	}

	pub fn validate(self) -> Result<Self, ConfigError> {
		let c = self.trigger_char;
		if c.is_whitespace() || c.is_alphanumeric() || c.is_control() {
			return Err(ConfigError::InvalidTrigger(c));
		}
		if self.max_visible == 0 {
			return Err(ConfigError::InvalidMaxVisible);
		}
		Ok(self)
	}
}

/// Full option set for [`crate::QuickInsert`].
pub struct QuickInsertOptions {
	pub config: QuickInsertConfig,
	/// Supplies the menu items for a query.
	pub items: Box<dyn ItemsProvider>,
	/// Replaces the default "run the descriptor's effect" behavior.
	pub on_command: Option<OnCommandFn>,
}

impl Default for QuickInsertOptions {
	fn default() -> Self {
		Self::new(QuickInsertConfig::default())
	}
}

impl QuickInsertOptions {
	pub fn new(config: QuickInsertConfig) -> Self {
		Self {
			config,
			items: Box::new(CatalogItems::default()),
			on_command: None,
		}
	}

	pub fn with_items(mut self, items: impl ItemsProvider + 'static) -> Self {
		self.items = Box::new(items);
		self
	}

	pub fn with_on_command(mut self, on_command: OnCommandFn) -> Self {
		self.on_command = Some(on_command);
		self
	}
}

impl fmt::Debug for QuickInsertOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("QuickInsertOptions")
			.field("config", &self.config)
			.field("on_command", &self.on_command.is_some())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn missing_table_yields_defaults() {
		let config = QuickInsertConfig::from_toml("[editor]\ntab-width = 4\n").unwrap();
		assert_eq!(config, QuickInsertConfig::default());
		assert_eq!(config.trigger_char, '/');
		assert!(!config.placeholder_hints);
	}

	#[test]
	fn partial_table_overrides_fields() {
		let config = QuickInsertConfig::from_toml(
			r#"
			[quick-insert]
			trigger-char = "+"
			allow-spaces = true
			placement = "top-start"
			max-visible = 6
			"#,
		)
		.unwrap();
		assert_eq!(config.trigger_char, '+');
		assert!(config.allow_spaces);
		assert_eq!(config.placement, Placement::TopStart);
		assert_eq!(config.max_visible, 6);
		assert_eq!(config.empty_hint, "Type / for commands");
	}

	#[test]
	fn rejects_word_and_space_triggers() {
		for trigger in ["a", "7", " "] {
			let src = format!("[quick-insert]\ntrigger-char = {trigger:?}\n");
			let err = QuickInsertConfig::from_toml(&src).unwrap_err();
			assert!(matches!(err, ConfigError::InvalidTrigger(_)), "{trigger:?}: {err}");
		}
	}

	#[test]
	fn rejects_zero_rows() {
		let err = QuickInsertConfig::from_toml("[quick-insert]\nmax-visible = 0\n").unwrap_err();
		assert!(matches!(err, ConfigError::InvalidMaxVisible));
	}

	#[test]
	fn rejects_unknown_keys_and_bad_types() {
		let err = QuickInsertConfig::from_toml("[quick-insert]\ntriger-char = \"/\"\n").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));

		let err = QuickInsertConfig::from_toml("[quick-insert]\ntrigger-char = \"//\"\n").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn options_default_to_builtin_catalog() {
		let options = QuickInsertOptions::default();
		assert_eq!(options.items.items("code").len(), 1);
		assert!(options.on_command.is_none());
	}
}
