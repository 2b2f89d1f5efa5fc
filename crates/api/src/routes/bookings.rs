use axum::routing::get;
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /       -> list (requires auth)
/// GET    /{id}   -> get_by_id (requires auth)
/// PATCH  /{id}   -> update (requires auth)
/// DELETE /{id}   -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(bookings::list)).route(
        "/{id}",
        get(bookings::get_by_id)
            .patch(bookings::update)
            .delete(bookings::delete),
    )
}
