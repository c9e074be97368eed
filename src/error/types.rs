use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No image uploaded")]
    EmptyUpload,

    #[error("File size exceeds maximum limit of {limit}MB")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Unsupported file type: {extension:?}. Supported types: {allowed}")]
    UnsupportedType { extension: String, allowed: String },

    #[error("Failed to decode image: {message}")]
    DecodeError { message: String },

    #[error("Decoded image has invalid dimensions")]
    InvalidDimensions,

    #[error("Failed to encode PDF document: {message}")]
    EncodeError { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Rate limit exceeded: maximum concurrent requests reached")]
    RateLimitExceeded,

    #[error("Request timeout")]
    Timeout,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::EmptyUpload => "EMPTY_UPLOAD",
            AppError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            AppError::UnsupportedType { .. } => "UNSUPPORTED_TYPE",
            AppError::DecodeError { .. } => "DECODE_ERROR",
            AppError::InvalidDimensions => "INVALID_DIMENSIONS",
            AppError::EncodeError { .. } => "ENCODE_ERROR",
            AppError::InvalidRequest { .. } => "INVALID_REQUEST",
            AppError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            AppError::Timeout => "REQUEST_TIMEOUT",
            AppError::ConfigError { .. } => "CONFIG_ERROR",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyUpload => StatusCode::BAD_REQUEST,
            AppError::FileTooLarge { .. } => StatusCode::BAD_REQUEST,
            AppError::UnsupportedType { .. } => StatusCode::BAD_REQUEST,
            AppError::DecodeError { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidDimensions => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::EncodeError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();
        let request_id = Uuid::new_v4().to_string();
        let timestamp = chrono::Utc::now().to_rfc3339();

        // Structured logging with context
        tracing::error!(
            error_code = error_code,
            status_code = %status,
            request_id = %request_id,
            error_message = %message,
            "API error occurred"
        );

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message,
                "request_id": request_id,
                "timestamp": timestamp
            },
            "data": null
        }));

        (status, body).into_response()
    }
}

// Convert common errors to AppError
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: format!("IO error: {}", err),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal {
            message: format!("Conversion task failed: {}", err),
        }
    }
}

// Helper methods for creating specific errors
impl AppError {
    pub fn decode(message: impl Into<String>) -> Self {
        AppError::DecodeError {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        AppError::EncodeError {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        AppError::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}
