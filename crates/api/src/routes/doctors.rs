//! Doctor profiles.

use axum::routing::get;
use axum::Router;

use crate::handlers::doctors;
use crate::state::AppState;

/// Routes mounted at `/doctors`.
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
        .route("/", get(doctors::list).post(doctors::create))
        .route(
            "/{slug}",
            get(doctors::get_by_slug)
                .patch(doctors::update)
                .delete(doctors::delete),
        )
}
