use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use crate::application::error::HttpError;
use crate::infra::uploads::UploadStorageError;

use super::state::AdminState;

const SOURCE: &str = "infra::http::admin::uploads";

/// Accept a multipart image upload and answer with the public URL the
/// admin pastes into case-study image fields.
pub async fn admin_upload_image(
    State(state): State<AdminState>,
    mut multipart: Multipart,
) -> Response {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => {
                return HttpError::new(
                    SOURCE,
                    StatusCode::BAD_REQUEST,
                    "Malformed upload request",
                    err.to_string(),
                )
                .into_response();
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let Some(original_name) = field.file_name().map(str::to_owned) else {
            return HttpError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "Upload is missing a file name",
                "multipart file field without a filename",
            )
            .into_response();
        };

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(err) => {
                return HttpError::new(
                    SOURCE,
                    StatusCode::BAD_REQUEST,
                    "Upload payload could not be read",
                    err.to_string(),
                )
                .into_response();
            }
        };

        return match state.upload_storage.store(&original_name, data).await {
            Ok(stored) => Json(json!({
                "url": stored.public_url(),
                "checksum": stored.checksum,
                "size_bytes": stored.size_bytes,
            }))
            .into_response(),
            Err(UploadStorageError::UnsupportedType) => HttpError::new(
                SOURCE,
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported image type",
                format!("rejected upload `{original_name}`"),
            )
            .into_response(),
            Err(UploadStorageError::EmptyPayload) => HttpError::new(
                SOURCE,
                StatusCode::BAD_REQUEST,
                "Uploaded file is empty",
                format!("empty upload `{original_name}`"),
            )
            .into_response(),
            Err(err) => {
                error!(target = SOURCE, error = %err, "failed to store upload");
                HttpError::new(
                    SOURCE,
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store upload",
                    err.to_string(),
                )
                .into_response()
            }
        };
    }

    HttpError::new(
        SOURCE,
        StatusCode::BAD_REQUEST,
        "Upload request is missing a file",
        "no `file` field in multipart body",
    )
    .into_response()
}
