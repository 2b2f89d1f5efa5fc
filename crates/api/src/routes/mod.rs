pub mod auth;
pub mod bookings;
pub mod content;
pub mod currency;
pub mod doctors;
pub mod feeds;
pub mod health;
pub mod hospitals;
pub mod lead;
pub mod media;
pub mod packages;
pub mod pages;
pub mod seo;
pub mod treatments;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public, rate limited)
/// /auth/me                                         current user (requires auth)
///
/// /lead                                            consultation request (public, rate limited)
///
/// /bookings                                        list (requires auth)
/// /bookings/{id}                                   get, update (auth), delete (admin)
///
/// /treatments                                      list (public), create (editor)
/// /treatments/{slug}                               get (public), update (editor), delete (admin)
/// /hospitals, /doctors, /packages, /content         same shape as /treatments
///
/// /media                                           list (requires auth)
/// /media/upload                                    multipart upload (editor, rate limited)
/// /media/{id}                                      delete (admin)
///
/// /pages/...                                       generated landing pages (public)
/// /currency                                        display currency detection (public)
/// /seo/home                                        site-wide metadata and JSON-LD (public)
/// /seo/{kind}/{slug}                               page metadata and JSON-LD (public)
/// ```
pub fn api_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Authentication.
        .nest("/auth", auth::router(state))
        // Public lead capture and the booking back office.
        .nest("/lead", lead::router(state))
        .nest("/bookings", bookings::router())
        // Bilingual catalog.
        .nest("/treatments", treatments::router())
        .nest("/hospitals", hospitals::router())
        .nest("/doctors", doctors::router())
        .nest("/packages", packages::router())
        .nest("/content", content::router())
        // Media library.
        .nest("/media", media::router(state))
        // Generated SEO content and helpers.
        .nest("/pages", pages::router())
        .nest("/currency", currency::router())
        .nest("/seo", seo::router())
}
