use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::{info, warn};

use crate::{
    adapters::{dto::upload_dto::UploadBatchResponse, state::AppState},
    application::error::ApplicationError,
    domain::models::{
        file::{FilePayload, UploadRequest},
        identity::Identity,
    },
};

const FILE_FIELDS: &[&str] = &["files", "file"];
const OVERWRITE_FIELD: &str = "overwrite";

fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!("Upload exceeded body limit: {}", e);
        ApplicationError::PayloadTooLarge
    } else {
        warn!("Invalid multipart data: {}", e);
        ApplicationError::BadRequest("Invalid request format".to_string())
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

pub struct UploadController;

impl UploadController {
    /// POST /api/v1/uploads
    /// Multipart: one `files` part per file, optional `overwrite` flag.
    pub async fn upload_files(
        State(app_state): State<AppState>,
        Extension(identity): Extension<Identity>,
        mut multipart: Multipart,
    ) -> Result<Json<UploadBatchResponse>, ApplicationError> {
        let mut files = Vec::new();
        let mut overwrite = false;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or("").to_string();

            if FILE_FIELDS.contains(&name.as_str()) {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await.map_err(multipart_error)?;

                // Browsers submit an empty unnamed part when nothing was selected.
                if file_name.is_empty() && content.is_empty() {
                    continue;
                }
                if file_name.is_empty() {
                    return Err(ApplicationError::BadRequest(
                        "File part without a file name".to_string(),
                    ));
                }

                files.push(FilePayload::new(file_name, content_type, content.to_vec()));
            } else if name == OVERWRITE_FIELD {
                let raw = field.text().await.map_err(multipart_error)?;
                overwrite = parse_flag(&raw);
            }
        }

        info!(
            "Upload request with {} file(s), overwrite={}, principal={:?}",
            files.len(),
            overwrite,
            identity.principal_name
        );

        let request = UploadRequest::new(files, overwrite, Some(identity));
        let result = app_state.upload_orchestrator.process(request).await?;

        Ok(Json(UploadBatchResponse::from(result)))
    }
}
