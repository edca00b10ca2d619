use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("an object already exists at key '{0}'")]
    KeyCollision(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Object-storage collaborator. Production implementation talks to an
/// S3-compatible endpoint; tests use [`MemoryObjectStore`].
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` with the given content type. Never
    /// overwrites: writing to an occupied key is an error.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Returns a time-boxed signed GET URL for `key`.
    async fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, StorageError>;
}

/// S3/MinIO-backed object store.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            // Conditional write: fail instead of silently replacing an
            // object that already lives at this key.
            .if_none_match("*")
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(svc) if svc.raw().status().as_u16() == 412 => {
                    StorageError::KeyCollision(key.to_string())
                }
                _ => StorageError::Backend(format!("upload of '{key}' failed: {e}")),
            })?;

        info!("Uploaded object to s3://{bucket}/{key}");
        Ok(())
    }

    async fn signed_url(
        &self,
        bucket: &str,
        key: &str,
        ttl: Duration,
    ) -> Result<String, StorageError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| StorageError::Backend(format!("invalid presigning TTL: {e}")))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Backend(format!("presigning '{key}' failed: {e}")))?;

        Ok(request.uri().to_string())
    }
}

#[cfg(test)]
pub use memory::MemoryObjectStore;


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_to_occupied_key_is_a_collision() {
        let store = MemoryObjectStore::default();
        store
            .upload("b", "resumes/1-cv.pdf", Bytes::from_static(b"x"), "application/pdf")
            .await
            .unwrap();

        let err = store
            .upload("b", "resumes/1-cv.pdf", Bytes::from_static(b"y"), "application/pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::KeyCollision(_)));
        assert_eq!(store.len(), 1, "collision must not replace the object");
    }

    #[tokio::test]
    async fn signed_url_embeds_key_and_ttl() {
        let store = MemoryObjectStore::default();
        store
            .upload("b", "resumes/1-cv.pdf", Bytes::from_static(b"x"), "application/pdf")
            .await
            .unwrap();

        let url = store
            .signed_url("b", "resumes/1-cv.pdf", Duration::from_secs(600))
            .await
            .unwrap();
        assert!(url.contains("resumes/1-cv.pdf"));
        assert!(url.contains("600"));
    }

    #[tokio::test]
    async fn signing_unknown_key_fails() {
        let store = MemoryObjectStore::default();
        let err = store
            .signed_url("b", "resumes/missing.pdf", Duration::from_secs(600))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
    }
}
