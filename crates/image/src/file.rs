//! File metadata helpers.

/// A file chosen by the user in the host's file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
	/// Full file name including extension.
	pub name: String,
	/// Size in bytes.
	pub size: u64,
	/// MIME type reported by the picker.
	pub mime: String,
	pub bytes: Vec<u8>,
}

/// Metadata written into the node alongside the uploaded source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
	pub file_name: String,
	pub file_size: u64,
	pub file_type: String,
	pub file_ext: String,
}

impl From<&PickedFile> for FileInfo {
	fn from(file: &PickedFile) -> Self {
		Self {
			file_name: extract_filename(&file.name).to_string(),
			file_size: file.size,
			file_type: file.mime.clone(),
			file_ext: extract_file_extension(&file.name).to_string(),
		}
	}
}

/// Returns the file name without its final extension.
///
/// Dotfiles such as `.env` keep their full name.
pub fn extract_filename(name: &str) -> &str {
	match name.rfind('.') {
		Some(0) | None => name,
		Some(idx) => &name[..idx],
	}
}

/// Returns the final extension without the dot, or `""` when there is none.
pub fn extract_file_extension(name: &str) -> &str {
	match name.rfind('.') {
		Some(0) | None => "",
		Some(idx) => &name[idx + 1..],
	}
}
