//! Placeholder/upload state machine for a single image node.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::attrs::{AttrsPatch, ImageAttrs, ImageSize, TextAlign};
use crate::file::{FileInfo, PickedFile};

/// Prefix of the error message stored on the node after a failed upload.
pub const UPLOAD_FAILED_PREFIX: &str = "Image upload failed: ";

/// Errors reported by an [`ImageUploader`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
	/// The upload could not reach its destination.
	#[error("{0}")]
	Transport(String),
	/// The destination refused the file.
	#[error("rejected with status {status}")]
	Rejected { status: u16 },
	/// The file could not be decoded as an image.
	#[error("not a decodable image: {0}")]
	Decode(String),
}

/// Host capability that stores image bytes and probes their size.
#[async_trait]
pub trait ImageUploader: Send + Sync {
	/// Stores the file and returns its public source URL.
	async fn upload(&self, file: &PickedFile) -> Result<String, UploadError>;

	/// Returns the pixel dimensions of the image.
	async fn dimensions(&self, file: &PickedFile) -> Result<ImageSize, UploadError>;
}

/// Side effects the host performs on the widget's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
	/// Open the platform file picker filtered to `image/*`.
	OpenFilePicker,
	/// Persist an attribute update on the node.
	UpdateAttrs(AttrsPatch),
}

/// What the node view should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageView {
	/// The stored upload error.
	Error(String),
	/// No source yet; clicking opens the picker.
	Placeholder { loading: bool, clickable: bool },
	/// Editable image with resize handles.
	Resizable {
		src: String,
		alt: Option<String>,
		width: Option<u32>,
		height: Option<u32>,
		align: TextAlign,
	},
	/// Read-only image.
	Static {
		src: String,
		alt: Option<String>,
		width: Option<u32>,
		height: Option<u32>,
		align: TextAlign,
	},
}

impl ImageView {
	/// Caption shown in the placeholder state.
	pub fn placeholder_label(loading: bool) -> &'static str {
		if loading { "Uploading…" } else { "Select an image" }
	}
}

/// Transient widget state; everything durable lives in [`ImageAttrs`].
#[derive(Debug, Default)]
pub struct ImageWidget {
	loading: bool,
}

impl ImageWidget {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_loading(&self) -> bool {
		self.loading
	}

	/// Derives the view from the node attributes.
	pub fn view(&self, attrs: &ImageAttrs, editable: bool) -> ImageView {
		if let Some(error) = &attrs.error {
			return ImageView::Error(error.clone());
		}

		let Some(src) = attrs.src.clone().filter(|s| !s.is_empty()) else {
			return ImageView::Placeholder {
				loading: self.loading,
				clickable: editable && !self.loading,
			};
		};

		let align = attrs.text_align.unwrap_or_default();
		if editable {
			ImageView::Resizable {
				src,
				alt: attrs.alt.clone(),
				width: attrs.width,
				height: attrs.height,
				align,
			}
		} else {
			ImageView::Static {
				src,
				alt: attrs.alt.clone(),
				width: attrs.width,
				height: attrs.height,
				align,
			}
		}
	}

	/// Returns true if the file picker may be opened for this node.
	pub fn select_file(&self, attrs: &ImageAttrs, editable: bool) -> bool {
		editable && attrs.error.is_none() && !attrs.has_source()
	}

	/// Actions to run when the node view mounts.
	///
	/// A fresh node (no source, never prompted) opens the picker once and
	/// marks itself prompted so later re-mounts stay quiet.
	pub fn on_mount(&self, attrs: &ImageAttrs, editable: bool) -> Vec<WidgetAction> {
		if attrs.has_source() || attrs.has_trigger {
			return Vec::new();
		}

		let mut actions = Vec::with_capacity(2);
		if self.select_file(attrs, editable) {
			actions.push(WidgetAction::OpenFilePicker);
		}
		actions.push(WidgetAction::UpdateAttrs(AttrsPatch {
			has_trigger: Some(true),
			..AttrsPatch::default()
		}));
		actions
	}

	/// Attribute update for a finished resize drag.
	pub fn resize(&self, size: ImageSize) -> AttrsPatch {
		AttrsPatch::size(size)
	}

	/// Uploads `file` and returns the attribute update to persist.
	///
	/// Failures are stored on the node rather than returned; the loading flag
	/// is cleared on both paths.
	pub async fn upload(&mut self, file: PickedFile, uploader: &dyn ImageUploader) -> AttrsPatch {
		self.loading = true;
		let info = FileInfo::from(&file);
		debug!(file = %file.name, size = file.size, "uploading image");

		let result = async {
			let src = uploader.upload(&file).await?;
			let size = uploader.dimensions(&file).await?;
			Ok::<_, UploadError>((src, size))
		}
		.await;

		self.loading = false;
		match result {
			Ok((src, size)) => AttrsPatch {
				src: Some(src),
				width: Some(size.width),
				height: Some(size.height),
				file_name: Some(info.file_name),
				file_size: Some(info.file_size),
				file_type: Some(info.file_type),
				file_ext: Some(info.file_ext),
				..AttrsPatch::default()
			},
			Err(e) => {
				warn!(file = %file.name, error = %e, "image upload failed");
				AttrsPatch {
					error: Some(format!("{UPLOAD_FAILED_PREFIX}{e}")),
					..AttrsPatch::default()
				}
			}
		}
	}
}
