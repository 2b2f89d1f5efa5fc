use axum::routing::post;
use axum::Router;

use crate::handlers::lead;
use crate::middleware::rate_limit;
use crate::state::AppState;

/// Routes mounted at `/lead`.
///
/// ```text
/// POST /   -> create (form rate limit)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(lead::create))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::form,
        ))
}
