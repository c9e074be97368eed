use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{OutputDocument, UploadedImage};
use crate::services::{PageComposer, Validator};

pub async fn convert_handler(
    State(config): State<Config>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string()[..8].to_string();

    info!(request_id = %request_id, "Starting image conversion request");

    // Extract the image from the multipart form
    let upload = match extract_image_from_multipart(&mut multipart).await {
        Ok(upload) => {
            info!(
                request_id = %request_id,
                file_name = %upload.name,
                file_size = upload.size,
                "Image extracted from multipart form"
            );
            upload
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Failed to extract image from multipart");
            return Err(e);
        }
    };

    // Metadata checks happen before any decode work
    let validator = Validator::new(&config);
    validator.validate(&upload)?;

    // The conversion itself is synchronous CPU work; run it off the async
    // executor under the configured deadline.
    let composer = PageComposer::new(&config);
    let deadline = Duration::from_secs(config.request_timeout_seconds);
    let result = tokio::time::timeout(
        deadline,
        tokio::task::spawn_blocking(move || composer.compose(&upload)),
    )
    .await??;

    let document = match result {
        Ok(document) => {
            info!(
                request_id = %request_id,
                output = %document.filename,
                output_size = document.bytes.len(),
                "Image conversion completed successfully"
            );
            document
        }
        Err(e) => {
            error!(request_id = %request_id, error = %e, "Image conversion failed");
            return Err(e);
        }
    };

    let total_time = start.elapsed().as_millis() as u64;

    info!(
        request_id = %request_id,
        total_time_ms = total_time,
        "Request completed successfully"
    );

    let headers = [
        (
            header::CONTENT_TYPE,
            OutputDocument::content_type().to_string(),
        ),
        (header::CONTENT_DISPOSITION, document.attachment_header()),
    ];

    Ok((headers, document.bytes).into_response())
}

async fn extract_image_from_multipart(multipart: &mut Multipart) -> AppResult<UploadedImage> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::invalid_request(format!("Failed to read multipart field: {}", e))
    })? {
        let field_name = field.name().unwrap_or("");

        if field_name == "image" {
            let file_name = field.file_name().unwrap_or("").to_string();

            let content_type = field.content_type().map(|ct| ct.to_string());

            let data = field.bytes().await.map_err(|e| {
                AppError::invalid_request(format!("Failed to read image data: {}", e))
            })?;

            let mut upload = UploadedImage::new(file_name, data.to_vec());

            if let Some(mime_type) = content_type {
                upload = upload.with_mime_type(mime_type);
            }

            tracing::debug!(
                "Extracted upload: {} ({} bytes, type: {:?})",
                upload.name,
                upload.size,
                upload.mime_type
            );

            return Ok(upload);
        }
    }

    // No "image" field at all counts as nothing uploaded
    Err(AppError::EmptyUpload)
}
