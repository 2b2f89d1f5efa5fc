//! Root-level XML feeds.

use axum::routing::get;
use axum::Router;

use crate::handlers::feeds;
use crate::state::AppState;

/// ```text
/// GET /rss.xml      -> rss_en
/// GET /rss-ar.xml   -> rss_ar
/// GET /sitemap.xml  -> sitemap
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rss.xml", get(feeds::rss_en))
        .route("/rss-ar.xml", get(feeds::rss_ar))
        .route("/sitemap.xml", get(feeds::sitemap))
}
