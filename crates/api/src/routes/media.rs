//! Route definitions for the media library.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::media::{self, MAX_UPLOAD_BYTES};
use crate::middleware::rate_limit;
use crate::state::AppState;

/// Routes mounted at `/media`.
///
/// ```text
/// GET    /         -> list (requires auth)
/// POST   /upload   -> upload (admin or editor, upload rate limit)
/// DELETE /{id}     -> delete (admin only)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let upload = Router::new()
        .route("/upload", post(media::upload))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::upload,
        ))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .route("/", get(media::list))
        .route("/{id}", delete(media::delete))
        .merge(upload)
}
