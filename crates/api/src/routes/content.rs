//! CMS pages (pages, blog posts, stories, FAQs).

use axum::routing::get;
use axum::Router;

use crate::handlers::content;
use crate::state::AppState;

/// Routes mounted at `/content`.
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
        .route("/", get(content::list).post(content::create))
        .route(
            "/{slug}",
            get(content::get_by_slug)
                .patch(content::update)
                .delete(content::delete),
        )
}
