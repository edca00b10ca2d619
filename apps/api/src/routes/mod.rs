pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::applications::handlers;
use crate::state::AppState;

/// Room for two 10 MB attachments plus text fields and multipart framing.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/applications", post(handlers::handle_create_application))
        .route(
            "/applications/:id/resume",
            get(handlers::handle_resume_link),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
