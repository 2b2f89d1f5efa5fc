//! Catalog treatments.

use axum::routing::get;
use axum::Router;

use crate::handlers::treatments;
use crate::state::AppState;

/// Routes mounted at `/treatments`.
///
/// ```text
/// GET    /         -> list
/// POST   /         -> create (admin or editor)
/// GET    /{slug}   -> get_by_slug
/// PATCH  /{slug}   -> update (admin or editor)
/// DELETE /{slug}   -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(treatments::list).post(treatments::create))
        .route(
            "/{slug}",
            get(treatments::get_by_slug)
                .patch(treatments::update)
                .delete(treatments::delete),
        )
}
