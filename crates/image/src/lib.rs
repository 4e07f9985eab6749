//! Image placeholder widget for Scribe documents.
//!
//! An image node starts life without a `src`. On first mount the widget asks
//! the host to open a file picker, uploads the chosen file and writes the
//! result back into the node's attributes. Everything the widget knows lives
//! in [`ImageAttrs`]; the host persists those attributes and re-renders from
//! them, so the widget itself only keeps the transient loading flag.

pub mod attrs;
pub mod file;
pub mod widget;

pub use attrs::{AttrsPatch, ImageAttrs, ImageSize, TextAlign};
pub use file::{FileInfo, PickedFile, extract_file_extension, extract_filename};
pub use widget::{ImageUploader, ImageView, ImageWidget, UploadError, WidgetAction};
