//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::OptionalAuthUser`] -- Same, but anonymous callers are allowed.
//! - [`rbac::RequireAdmin`] -- Requires the `ADMIN` role.
//! - [`rbac::RequireEditor`] -- Requires `ADMIN` or `EDITOR`.
//! - [`rbac::RequireAuth`] -- Requires any authenticated user.
//! - [`rate_limit`] -- Fixed-window limits for forms, login and uploads.

pub mod auth;
pub mod rate_limit;
pub mod rbac;
