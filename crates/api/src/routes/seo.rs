use axum::routing::get;
use axum::Router;

use crate::handlers::seo;
use crate::state::AppState;

/// Routes mounted at `/seo`.
///
/// ```text
/// GET /home            -> home
/// GET /{kind}/{slug}   -> describe (kind: treatments, hospitals, doctors, content)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/home", get(seo::home))
        .route("/{kind}/{slug}", get(seo::describe))
}
