//! First-admin creation.
//!
//! The admin API has no sign-up route. When the `users` table is empty and
//! `ADMIN_BOOTSTRAP_EMAIL` / `ADMIN_BOOTSTRAP_PASSWORD` are set, one `ADMIN`
//! account is created at startup.

use shifa_core::roles::ROLE_ADMIN;
use shifa_db::models::user::CreateUser;
use shifa_db::repositories::UserRepo;
use shifa_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::AdminBootstrap;

#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error("bootstrap admin password rejected: {0}")]
    WeakPassword(String),

    #[error("failed to hash bootstrap admin password: {0}")]
    Hash(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Create the bootstrap admin if no user exists yet.
///
/// Returns `true` when an account was created.
pub async fn ensure_admin(
    pool: &DbPool,
    bootstrap: Option<&AdminBootstrap>,
) -> Result<bool, BootstrapError> {
    let Some(bootstrap) = bootstrap else {
        return Ok(false);
    };

    if UserRepo::count(pool).await? > 0 {
        tracing::debug!("Users exist, skipping admin bootstrap");
        return Ok(false);
    }

    validate_password_strength(&bootstrap.password, MIN_PASSWORD_LENGTH)
        .map_err(BootstrapError::WeakPassword)?;
    let password_hash =
        hash_password(&bootstrap.password).map_err(|e| BootstrapError::Hash(e.to_string()))?;

    let email = bootstrap.email.trim().to_lowercase();
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: email.split('@').next().unwrap_or("admin").to_string(),
            email,
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await?;

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
    Ok(true)
}
