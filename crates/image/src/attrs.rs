//! Node attributes read and written by the image widget.

use serde::{Deserialize, Serialize};

/// Horizontal alignment of the image block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
	#[default]
	Left,
	Center,
	Right,
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
	pub width: u32,
	pub height: u32,
}

/// Persisted attributes of an image node.
///
/// Serialized in camelCase because the same attribute bag is stored in the
/// document and exchanged with the host's node view layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageAttrs {
	/// Set once the widget has auto-opened the file picker.
	pub has_trigger: bool,
	/// Upload failure message; an image with an error never re-prompts.
	pub error: Option<String>,
	pub src: Option<String>,
	pub alt: Option<String>,
	pub title: Option<String>,
	pub width: Option<u32>,
	pub height: Option<u32>,
	pub text_align: Option<TextAlign>,
	pub file_name: Option<String>,
	pub file_size: Option<u64>,
	pub file_type: Option<String>,
	pub file_ext: Option<String>,
}

impl ImageAttrs {
	/// Returns true once an uploaded source is attached.
	pub fn has_source(&self) -> bool {
		self.src.as_deref().is_some_and(|s| !s.is_empty())
	}

	/// Applies a partial update.
	pub fn apply(&mut self, patch: AttrsPatch) {
		let AttrsPatch {
			has_trigger,
			error,
			src,
			width,
			height,
			file_name,
			file_size,
			file_type,
			file_ext,
		} = patch;

		if let Some(v) = has_trigger {
			self.has_trigger = v;
		}
		if error.is_some() {
			self.error = error;
		}
		if src.is_some() {
			self.src = src;
		}
		if width.is_some() {
			self.width = width;
		}
		if height.is_some() {
			self.height = height;
		}
		if file_name.is_some() {
			self.file_name = file_name;
		}
		if file_size.is_some() {
			self.file_size = file_size;
		}
		if file_type.is_some() {
			self.file_type = file_type;
		}
		if file_ext.is_some() {
			self.file_ext = file_ext;
		}
	}
}

/// A partial attribute update; `None` fields leave the node untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrsPatch {
	pub has_trigger: Option<bool>,
	pub error: Option<String>,
	pub src: Option<String>,
	pub width: Option<u32>,
	pub height: Option<u32>,
	pub file_name: Option<String>,
	pub file_size: Option<u64>,
	pub file_type: Option<String>,
	pub file_ext: Option<String>,
}

impl AttrsPatch {
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	pub fn size(size: ImageSize) -> Self {
		Self {
			width: Some(size.width),
			height: Some(size.height),
			..Self::default()
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn attrs_round_trip_uses_camel_case() {
		let json = r#"{"hasTrigger":true,"src":"https://cdn/x.png","width":320,"textAlign":"center","fileExt":"png"}"#;
		let attrs: ImageAttrs = serde_json::from_str(json).unwrap();
		assert!(attrs.has_trigger);
		assert_eq!(attrs.width, Some(320));
		assert_eq!(attrs.text_align, Some(TextAlign::Center));
		assert_eq!(attrs.file_ext.as_deref(), Some("png"));
		assert_eq!(attrs.height, None);

		let value = serde_json::to_value(&attrs).unwrap();
		assert_eq!(value["hasTrigger"], serde_json::json!(true));
		assert_eq!(value["fileExt"], serde_json::json!("png"));
	}

	#[test]
	fn missing_attrs_default() {
		let attrs: ImageAttrs = serde_json::from_str("{}").unwrap();
		assert_eq!(attrs, ImageAttrs::default());
		assert!(!attrs.has_source());
	}

	#[test]
	fn patch_only_touches_set_fields() {
		let mut attrs = ImageAttrs {
			alt: Some("diagram".into()),
			width: Some(10),
			..ImageAttrs::default()
		};
		attrs.apply(AttrsPatch::size(ImageSize { width: 640, height: 480 }));
		assert_eq!(attrs.width, Some(640));
		assert_eq!(attrs.height, Some(480));
		assert_eq!(attrs.alt.as_deref(), Some("diagram"));
		assert!(!attrs.has_trigger);
	}

	#[test]
	fn empty_src_is_not_a_source() {
		let attrs = ImageAttrs {
			src: Some(String::new()),
			..ImageAttrs::default()
		};
		assert!(!attrs.has_source());
	}
}
