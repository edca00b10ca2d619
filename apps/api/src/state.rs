use std::sync::Arc;

use crate::applications::storage::ObjectStore;
use crate::applications::store::ApplicationStore;

/// Shared application state injected into all route handlers via Axum extractors.
/// Both collaborators sit behind trait objects so tests can substitute
/// in-memory doubles for S3 and Postgres.
#[derive(Clone)]
pub struct AppState {
    pub objects: Arc<dyn ObjectStore>,
    pub records: Arc<dyn ApplicationStore>,
    /// Single bucket holding both resume and role-file objects.
    pub bucket: String,
}
