use axum::routing::get;
use axum::Router;

use crate::handlers::packages;
use crate::state::AppState;

/// Routes mounted at `/packages`.
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
        .route("/", get(packages::list).post(packages::create))
        .route(
            "/{slug}",
            get(packages::get_by_slug)
                .patch(packages::update)
                .delete(packages::delete),
        )
}
