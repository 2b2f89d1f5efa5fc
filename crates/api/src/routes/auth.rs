//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::middleware::rate_limit;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /login    -> login (auth rate limit)
/// GET  /me       -> me (requires auth)
/// ```
pub fn router(state: &AppState) -> Router<AppState> {
    let login = Router::new()
        .route("/login", post(auth::login))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit::auth,
        ));

    Router::new().route("/me", get(auth::me)).merge(login)
}
