use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

use crate::ack::AckReviewer;
use crate::fields::Attachment;
use crate::submission::Submission;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server rejected submission ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Success body of `POST /applications`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// One-shot submission transport for the intake service. No retries and no
/// client-side timeout are configured; a submission is sent at most once.
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: String,
    reviewer: Option<AckReviewer>,
}

impl SubmissionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            reviewer: None,
        }
    }

    /// Attaches the best-effort acknowledgement reviewer; without one the
    /// review step is skipped entirely.
    pub fn with_reviewer(mut self, reviewer: AckReviewer) -> Self {
        self.reviewer = Some(reviewer);
        self
    }

    /// Sends the assembled submission as one multipart request. The
    /// optional role file is omitted from the form entirely when absent,
    /// never sent as an empty part.
    pub async fn send(&self, submission: &Submission) -> Result<SubmitResponse, TransportError> {
        let mut form = Form::new();
        for (name, value) in submission.text_fields() {
            form = form.text(name, value.to_string());
        }
        form = form.part("resume", file_part(&submission.resume)?);
        if let Some(file) = &submission.role_specific_file {
            form = form.part("roleSpecificFile", file_part(file)?);
        }

        let response = self
            .http
            .post(format!("{}/applications", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Application submission failed".to_string());
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    pub fn spawn_acknowledgement_review(&self, role: &str, message: &str) {
        if let Some(reviewer) = &self.reviewer {
            reviewer.spawn_review(role, message);
        }
    }
}

fn file_part(file: &Attachment) -> Result<Part, TransportError> {
    Ok(Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.content_type)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = SubmissionClient::new("http://127.0.0.1:5050/");
        assert_eq!(client.base_url, "http://127.0.0.1:5050");
    }

    #[test]
    fn file_part_accepts_standard_resume_types() {
        let attachment = Attachment {
            file_name: "cv.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            bytes: b"%PDF".to_vec(),
        };
        assert!(file_part(&attachment).is_ok());
    }
}
