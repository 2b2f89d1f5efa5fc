use axum::routing::get;
use axum::Router;

use crate::handlers::hospitals;
use crate::state::AppState;

/// Routes mounted at `/hospitals`.
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
        .route("/", get(hospitals::list).post(hospitals::create))
        .route(
            "/{slug}",
            get(hospitals::get_by_slug)
                .patch(hospitals::update)
                .delete(hospitals::delete),
        )
}
