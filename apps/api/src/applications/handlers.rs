use std::time::Duration;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::intake::read_multipart;
use super::model::NewApplication;
use crate::errors::AppError;
use crate::state::AppState;

const RESUME_KEY_PREFIX: &str = "resumes";
const ROLE_FILE_KEY_PREFIX: &str = "role-files";

/// Signed resume links stay valid for ten minutes.
const SIGNED_URL_TTL: Duration = Duration::from_secs(600);

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateApplicationResponse {
    pub message: String,
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeLinkResponse {
    pub signed_url: String,
}

/// POST /applications
///
/// Uploads the mandatory resume, then the optional role-specific file, then
/// persists one metadata record referencing the stored keys. Uploads and
/// the insert run strictly in sequence; a failure partway leaves any
/// already-uploaded object behind with no record referencing it (logged,
/// not compensated).
pub async fn handle_create_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreateApplicationResponse>), AppError> {
    let submission = read_multipart(multipart).await?;

    let resume = submission
        .resume
        .ok_or_else(|| AppError::Validation("Resume is required".to_string()))?;

    let resume_path = object_key(RESUME_KEY_PREFIX, &resume.file_name);
    state
        .objects
        .upload(&state.bucket, &resume_path, resume.bytes, &resume.content_type)
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    let mut role_specific_file_path = None;
    if let Some(file) = submission.role_specific_file {
        let key = object_key(ROLE_FILE_KEY_PREFIX, &file.file_name);
        state
            .objects
            .upload(&state.bucket, &key, file.bytes, &file.content_type)
            .await
            .map_err(|e| {
                warn!("Role file upload failed; resume object '{resume_path}' is now orphaned");
                AppError::Storage(e.to_string())
            })?;
        role_specific_file_path = Some(key);
    }

    let record = NewApplication::from_fields(
        &submission.fields,
        resume_path.clone(),
        role_specific_file_path,
    )?;

    let id = state.records.insert(record).await.map_err(|e| {
        warn!("Record insert failed; uploaded object(s) under '{resume_path}' are now orphaned");
        AppError::from(e)
    })?;

    info!("Application {id} submitted (resume at '{resume_path}')");
    Ok((
        StatusCode::CREATED,
        Json(CreateApplicationResponse {
            message: "Application submitted successfully".to_string(),
            id,
        }),
    ))
}

/// GET /applications/:id/resume
///
/// Looks up the record and returns a time-boxed signed URL for its resume
/// object. Each call signs afresh; the underlying key never changes.
pub async fn handle_resume_link(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeLinkResponse>, AppError> {
    let record = state
        .records
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let signed_url = state
        .objects
        .signed_url(&state.bucket, &record.resume_path, SIGNED_URL_TTL)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to generate signed URL: {e}")))?;

    Ok(Json(ResumeLinkResponse { signed_url }))
}

/// `{prefix}/{millis}-{filename}`, with path separators stripped from the
/// client-supplied filename so it cannot nest under another prefix.
fn object_key(prefix: &str, file_name: &str) -> String {
    let safe_name: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{prefix}/{}-{safe_name}", Utc::now().timestamp_millis())
}
