//! Read-only routes over the generated content JSON files.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Routes mounted at `/pages`.
///
/// ```text
/// GET /articles/{locale}/{country}/{city}/{treatment}/{slug}   -> article
/// GET /treatments/{locale}/{country}/{city}/{treatment}        -> treatment
/// GET /cities/{locale}/{country}/{city}                        -> city
/// GET /related                                                 -> related
/// GET /search                                                  -> search
/// GET /countries                                               -> countries
/// GET /countries/{country}/cities                              -> cities_by_country
/// GET /treatment-types                                         -> treatment_types
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/articles/{locale}/{country}/{city}/{treatment}/{slug}",
            get(pages::article),
        )
        .route(
            "/treatments/{locale}/{country}/{city}/{treatment}",
            get(pages::treatment),
        )
        .route("/cities/{locale}/{country}/{city}", get(pages::city))
        .route("/related", get(pages::related))
        .route("/search", get(pages::search))
        .route("/countries", get(pages::countries))
        .route("/countries/{country}/cities", get(pages::cities_by_country))
        .route("/treatment-types", get(pages::treatment_types))
}
