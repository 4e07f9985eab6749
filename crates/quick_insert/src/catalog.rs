//! Command descriptors and the built-in quick insert catalog.

use std::fmt;

use scribe_image::ImageAttrs;

use crate::error::EffectError;
use crate::host::{BlockKind, DocumentHost, NodeKind, StructuralEdit, UserContext};

/// Effect run when a command is chosen.
///
/// Effects run after the trigger text has been removed; any edit they make
/// is a separate undo step.
pub type CommandEffect = fn(&mut dyn DocumentHost, Option<&UserContext>) -> Result<(), EffectError>;

/// A catalog entry.
#[derive(Clone, Copy)]
pub struct CommandDescriptor {
	/// Unique key matched against the typed query by prefix.
	pub key: &'static str,
	pub label: &'static str,
	/// Icon name understood by the menu renderer.
	pub icon: &'static str,
	pub effect: CommandEffect,
}

impl CommandDescriptor {
	/// Returns true if this command is offered for `query`.
	#[inline]
	pub fn matches(&self, query: &str) -> bool {
		self.key.starts_with(query)
	}
}

impl fmt::Debug for CommandDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandDescriptor")
			.field("key", &self.key)
			.field("label", &self.label)
			.field("icon", &self.icon)
			.finish_non_exhaustive()
	}
}

// Keys are unique within a catalog.
impl PartialEq for CommandDescriptor {
	fn eq(&self, other: &Self) -> bool {
		self.key == other.key
	}
}

impl Eq for CommandDescriptor {}

fn set_block(host: &mut dyn DocumentHost, kind: BlockKind) -> Result<(), EffectError> {
	host.apply_structure(StructuralEdit::SetBlock(kind))?;
	Ok(())
}

fn insert_node(host: &mut dyn DocumentHost, node: NodeKind) -> Result<(), EffectError> {
	host.apply_structure(StructuralEdit::Insert(node))?;
	Ok(())
}

fn paragraph(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::Paragraph)
}

fn heading1(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::Heading(1))
}

fn heading2(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::Heading(2))
}

fn heading3(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::Heading(3))
}

fn bullet_list(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::BulletList)
}

fn ordered_list(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::OrderedList)
}

fn task_list(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::TaskList)
}

fn blockquote(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::Blockquote)
}

fn code_block(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::CodeBlock)
}

fn callout(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	set_block(host, BlockKind::Callout)
}

/// Dividers are not allowed inside the title block.
fn horizontal_rule(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	if host.active_block() == BlockKind::Title {
		return Err(EffectError::Unavailable("dividers cannot be inserted into the title"));
	}
	insert_node(host, NodeKind::HorizontalRule)
}

fn table(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	insert_node(
		host,
		NodeKind::Table {
			rows: 3,
			cols: 3,
			header_row: true,
		},
	)
}

/// Inserts an empty image node; the image widget prompts for a file on mount.
fn image(host: &mut dyn DocumentHost, _user: Option<&UserContext>) -> Result<(), EffectError> {
	insert_node(host, NodeKind::Image(ImageAttrs::default()))
}

/// The default quick insert catalog, in menu order.
pub static BUILTIN_COMMANDS: &[CommandDescriptor] = &[
	CommandDescriptor {
		key: "paragraph",
		label: "Text",
		icon: "paragraph",
		effect: paragraph,
	},
	CommandDescriptor {
		key: "heading1",
		label: "Heading 1",
		icon: "h1",
		effect: heading1,
	},
	CommandDescriptor {
		key: "heading2",
		label: "Heading 2",
		icon: "h2",
		effect: heading2,
	},
	CommandDescriptor {
		key: "heading3",
		label: "Heading 3",
		icon: "h3",
		effect: heading3,
	},
	CommandDescriptor {
		key: "bulletList",
		label: "Bulleted list",
		icon: "list-bullet",
		effect: bullet_list,
	},
	CommandDescriptor {
		key: "orderedList",
		label: "Numbered list",
		icon: "list-ordered",
		effect: ordered_list,
	},
	CommandDescriptor {
		key: "taskList",
		label: "Task list",
		icon: "list-task",
		effect: task_list,
	},
	CommandDescriptor {
		key: "blockquote",
		label: "Quote",
		icon: "quote",
		effect: blockquote,
	},
	CommandDescriptor {
		key: "codeBlock",
		label: "Code block",
		icon: "code",
		effect: code_block,
	},
	CommandDescriptor {
		key: "callout",
		label: "Callout",
		icon: "callout",
		effect: callout,
	},
	CommandDescriptor {
		key: "horizontalRule",
		label: "Divider",
		icon: "horizontal-rule",
		effect: horizontal_rule,
	},
	CommandDescriptor {
		key: "table",
		label: "Table",
		icon: "table",
		effect: table,
	},
	CommandDescriptor {
		key: "image",
		label: "Image",
		icon: "image",
		effect: image,
	},
];

/// Looks up a command by its exact key.
pub fn find_command(catalog: &[CommandDescriptor], key: &str) -> Option<CommandDescriptor> {
	catalog.iter().find(|c| c.key == key).copied()
}
