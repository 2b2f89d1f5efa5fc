//! Shifa AlHind domain logic.
//!
//! Pure building blocks shared by the data layer and the HTTP server:
//! booking status rules, lead validation, the fixed-window rate limiter,
//! the file-backed content store, currency display, SEO metadata and
//! JSON-LD generators, and feed rendering.

pub mod booking;
pub mod content_store;
pub mod currency;
pub mod error;
pub mod feeds;
pub mod lead;
pub mod locale;
pub mod markdown;
pub mod pagination;
pub mod rate_limit;
pub mod roles;
pub mod seo;
pub mod slug;
pub mod types;
