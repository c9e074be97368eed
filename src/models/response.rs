use serde::Serialize;

/// The produced single-page PDF, returned to the HTTP layer.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl OutputDocument {
    pub fn new(filename: String, bytes: Vec<u8>) -> Self {
        Self { filename, bytes }
    }

    /// Media type the document is served as.
    pub fn content_type() -> &'static str {
        "application/pdf"
    }

    /// `Content-Disposition` value marking the document as a download.
    pub fn attachment_header(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: u64,
    pub services: ServiceStatus,
    pub rate_limiting: RateLimitStatus,
}

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub converter: bool,
}

#[derive(Debug, Serialize)]
pub struct RateLimitStatus {
    pub total_requests: u64,
    pub rejected_requests: u64,
    pub available_permits: usize,
}
