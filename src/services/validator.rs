use std::collections::HashSet;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::UploadedImage;

/// Checks upload metadata before any decoding work is attempted.
///
/// Only byte length and the declared filename are inspected, never the image
/// content, so oversized or wrong-typed payloads are rejected before any
/// decode cost is paid.
pub struct Validator {
    max_file_size_mb: usize,
    allowed_extensions: HashSet<String>,
}

impl Validator {
    pub fn new(config: &Config) -> Self {
        Self::with_limits(config.max_file_size_mb, config.allowed_extensions.clone())
    }

    /// Build a validator with explicit limits instead of a full `Config`.
    pub fn with_limits(max_file_size_mb: usize, allowed_extensions: HashSet<String>) -> Self {
        Self {
            max_file_size_mb,
            allowed_extensions,
        }
    }

    /// Validate an upload, short-circuiting on the first failed check.
    pub fn validate(&self, upload: &UploadedImage) -> AppResult<()> {
        if upload.content.is_empty() {
            warn!(file_name = %upload.name, "Rejecting empty upload");
            return Err(AppError::EmptyUpload);
        }

        let max_size_bytes = self.max_file_size_mb * 1024 * 1024;
        if upload.content.len() > max_size_bytes {
            warn!(
                file_name = %upload.name,
                file_size = upload.content.len(),
                max_size = max_size_bytes,
                "Rejecting oversized upload"
            );
            return Err(AppError::FileTooLarge {
                size: upload.content.len() / (1024 * 1024),
                limit: self.max_file_size_mb,
            });
        }

        match upload.extension() {
            Some(ext) if self.allowed_extensions.contains(&ext) => {
                debug!(file_name = %upload.name, extension = %ext, "Upload passed validation");
                Ok(())
            }
            ext => {
                warn!(
                    file_name = %upload.name,
                    extension = ext.as_deref().unwrap_or(""),
                    "Rejecting upload with unsupported extension"
                );
                Err(AppError::UnsupportedType {
                    extension: ext.unwrap_or_default(),
                    allowed: self.allowed_list(),
                })
            }
        }
    }

    fn allowed_list(&self) -> String {
        let mut extensions: Vec<&str> = self
            .allowed_extensions
            .iter()
            .map(|ext| ext.as_str())
            .collect();
        extensions.sort_unstable();
        extensions.join(", ")
    }
}
