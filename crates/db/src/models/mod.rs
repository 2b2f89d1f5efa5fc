//! Database entity rows and request DTOs.
//!
//! Every entity module has the row struct (`FromRow`, `Serialize`), a
//! `Create*` DTO and, for editable entities, an `Update*` DTO whose fields
//! are all optional.

pub mod booking;
pub mod content_page;
pub mod doctor;
pub mod hospital;
pub mod media;
pub mod package;
pub mod treatment;
pub mod user;
