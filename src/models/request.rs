use std::path::Path;

/// A single uploaded image as received from the HTTP layer.
///
/// Held only for the duration of one conversion; never persisted.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub name: String,
    pub size: usize,
    pub content: Vec<u8>,
    pub mime_type: Option<String>,
}

impl UploadedImage {
    pub fn new(name: String, content: Vec<u8>) -> Self {
        let size = content.len();
        Self {
            name,
            size,
            content,
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: String) -> Self {
        self.mime_type = Some(mime_type);
        self
    }

    /// Lower-cased filename extension without the leading dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }

    /// Suggested output filename: the original basename with its extension
    /// replaced by `.pdf`.
    pub fn output_filename(&self) -> String {
        let stem = Path::new(&self.name)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("converted");
        format!("{}.pdf", stem)
    }
}
