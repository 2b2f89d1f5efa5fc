use axum::routing::get;
use axum::Router;

use crate::handlers::currency;
use crate::state::AppState;

/// Routes mounted at `/currency`.
///
/// ```text
/// GET /   -> detect
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(currency::detect))
}
