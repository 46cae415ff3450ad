//! `POST /process-image`: upload a label photo, get nutrition facts back.
//!
//! The image arrives as a multipart form field named `File`. Its bytes go to
//! the OCR provider; the recognized text goes through the extraction engine.

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use nutrilens_core::NutritionRecord;
use nutrilens_logging::redact_sensitive_data;
use nutrilens_understanding::parse_nutrition_facts;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::GatewayState;

/// Multipart field carrying the image.
pub const IMAGE_FIELD: &str = "File";

/// Handler for `POST /process-image`.
pub async fn process_image(
    State(state): State<GatewayState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<NutritionRecord>, ApiError> {
    let request_id = Uuid::new_v4();

    let mut multipart = multipart.map_err(|e| {
        warn!(%request_id, error = %e, "Error parsing form");
        ApiError::MalformedForm
    })?;

    let upload = read_image_field(&mut multipart, request_id).await?;
    info!(
        %request_id,
        filename = %upload.filename,
        bytes = upload.content.len(),
        "Received image"
    );

    let text = state
        .ocr
        .detect_document_text(&upload.content)
        .await
        .map_err(|e| {
            warn!(
                %request_id,
                provider = state.ocr.name(),
                error = %redact_sensitive_data(&e.to_string()),
                "Error extracting text"
            );
            ApiError::ProcessingFailed
        })?;

    let record = parse_nutrition_facts(&text);
    info!(
        %request_id,
        nutrients = record.len(),
        daily_value = record.daily_value.is_some(),
        "Extracted nutrition facts"
    );
    Ok(Json(record))
}

struct Upload {
    filename: String,
    content: Bytes,
}

/// Walk the form until the image field shows up. Other fields, and a `File`
/// field that is plain text rather than an uploaded file, are skipped.
async fn read_image_field(multipart: &mut Multipart, request_id: Uuid) -> Result<Upload, ApiError> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => {
                warn!(%request_id, "No image field in form");
                return Err(ApiError::MissingFile);
            }
            Err(e) => {
                warn!(%request_id, error = %e, "Error parsing form");
                return Err(form_error(&e, ApiError::MalformedForm));
            }
        };

        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content = field.bytes().await.map_err(|e| {
            warn!(%request_id, error = %e, "Error reading file");
            form_error(&e, ApiError::ReadFailed)
        })?;

        return Ok(Upload { filename, content });
    }
}

/// Body-limit violations surface as multipart errors; report them as 413.
fn form_error(err: &MultipartError, otherwise: ApiError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        otherwise
    }
}
