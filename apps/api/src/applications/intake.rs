use std::collections::BTreeMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

pub const RESUME_FIELD: &str = "resume";
pub const ROLE_FILE_FIELD: &str = "roleSpecificFile";

/// Per-attachment cap, matching the original portal's upload policy.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Accepted type families; matched as substrings of the MIME type or the
/// lowercased filename (so `application/pdf`, `.docx`, and
/// `application/vnd.openxmlformats-officedocument.wordprocessingml.document`
/// all pass).
const ALLOWED_TYPE_FAMILIES: &[&str] = &["pdf", "doc", "docx"];

/// One received attachment, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Everything a create-application request carries: text fields keyed by
/// their wire names, plus up to two attachments.
#[derive(Debug, Default)]
pub struct IntakeSubmission {
    pub fields: BTreeMap<String, String>,
    pub resume: Option<UploadedFile>,
    pub role_specific_file: Option<UploadedFile>,
}

/// Drains the multipart stream into an [`IntakeSubmission`], enforcing the
/// attachment type and size policy. Runs to completion before any storage
/// I/O happens, so a policy violation never leaves partial uploads behind.
pub async fn read_multipart(mut multipart: Multipart) -> Result<IntakeSubmission, AppError> {
    let mut submission = IntakeSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart payload: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            RESUME_FIELD | ROLE_FILE_FIELD => {
                let file_name = field
                    .file_name()
                    .unwrap_or("attachment")
                    .to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;

                check_attachment_policy(&file_name, &content_type, bytes.len())?;

                let file = UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                };
                if name == RESUME_FIELD {
                    submission.resume = Some(file);
                } else {
                    submission.role_specific_file = Some(file);
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read '{name}': {e}")))?;
                submission.fields.insert(name, value);
            }
        }
    }

    Ok(submission)
}

fn check_attachment_policy(
    file_name: &str,
    content_type: &str,
    size: usize,
) -> Result<(), AppError> {
    if !passes_type_policy(file_name, content_type) {
        return Err(AppError::Validation(
            "Only PDF, DOC, and DOCX files are allowed".to_string(),
        ));
    }
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AppError::Validation(
            "Attachment exceeds the 10MB size limit".to_string(),
        ));
    }
    Ok(())
}

fn passes_type_policy(file_name: &str, content_type: &str) -> bool {
    let file_name = file_name.to_lowercase();
    let content_type = content_type.to_lowercase();
    ALLOWED_TYPE_FAMILIES
        .iter()
        .any(|family| content_type.contains(family) || file_name.contains(family))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_by_mime_type_passes() {
        assert!(passes_type_policy("resume", "application/pdf"));
    }

    #[test]
    fn docx_by_filename_passes() {
        assert!(passes_type_policy("resume.docx", "application/octet-stream"));
    }

    #[test]
    fn word_mime_type_passes() {
        assert!(passes_type_policy(
            "resume",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        ));
    }

    #[test]
    fn plain_text_is_rejected() {
        assert!(!passes_type_policy("resume.txt", "text/plain"));
    }

    #[test]
    fn oversize_attachment_is_rejected() {
        let err = check_attachment_policy("cv.pdf", "application/pdf", MAX_ATTACHMENT_BYTES + 1)
            .unwrap_err();
        assert!(err.to_string().contains("10MB"));
    }

    #[test]
    fn attachment_at_limit_is_accepted() {
        assert!(check_attachment_policy("cv.pdf", "application/pdf", MAX_ATTACHMENT_BYTES).is_ok());
    }
}
