//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- HS256 access-token generation and validation.
//! - [`bootstrap`] -- first-admin creation on an empty users table.

pub mod bootstrap;
pub mod jwt;
pub mod password;
