//! Staff account seeding.
//!
//! Registration only ever creates regular users, so the first staff account
//! comes from `ADMIN_EMAIL` / `ADMIN_PASSWORD` at startup. Seeding is
//! idempotent: an existing account with that email is promoted instead of
//! recreated, and its password is left alone.

use cinema_core::types::DbId;
use cinema_core::validation::{normalize_email, validate_email};
use cinema_db::models::user::CreateUser;
use cinema_db::repositories::UserRepo;
use sqlx::PgPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};

/// Credentials for the staff account created at startup.
#[derive(Clone)]
pub struct StaffSeed {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for StaffSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffSeed")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl StaffSeed {
    /// Read `ADMIN_EMAIL` and `ADMIN_PASSWORD`. Returns `None` unless both
    /// are set and non-blank.
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var("ADMIN_EMAIL").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        )
    }

    fn from_values(email: Option<String>, password: Option<String>) -> Option<Self> {
        let email = email.filter(|e| !e.trim().is_empty())?;
        let password = password.filter(|p| !p.is_empty())?;
        Some(Self { email, password })
    }
}

/// What [`seed_staff_user`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(DbId),
    Promoted(DbId),
    AlreadyStaff(DbId),
}

/// Ensure a staff account exists for `seed.email`.
pub async fn seed_staff_user(pool: &PgPool, seed: &StaffSeed) -> AppResult<SeedOutcome> {
    let email = normalize_email(&seed.email);
    validate_email(&email)?;

    if let Some(user) = UserRepo::find_by_email(pool, &email).await? {
        if user.is_staff {
            return Ok(SeedOutcome::AlreadyStaff(user.id));
        }
        let user = UserRepo::promote_to_staff(pool, user.id)
            .await?
            .ok_or_else(|| AppError::not_found("User", user.id))?;
        tracing::info!(user_id = user.id, "Existing user promoted to staff");
        return Ok(SeedOutcome::Promoted(user.id));
    }

    validate_password_strength(&seed.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;
    let password_hash = hash_password(&seed.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email,
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            is_staff: true,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Staff user created");
    Ok(SeedOutcome::Created(user.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_requires_both_values() {
        let seed = StaffSeed::from_values(Some("admin@cinema.com".into()), Some("secret".into()));
        assert!(seed.is_some());

        assert!(StaffSeed::from_values(None, Some("secret".into())).is_none());
        assert!(StaffSeed::from_values(Some("admin@cinema.com".into()), None).is_none());
        assert!(StaffSeed::from_values(Some("  ".into()), Some("secret".into())).is_none());
        assert!(StaffSeed::from_values(Some("admin@cinema.com".into()), Some(String::new())).is_none());
    }

    #[test]
    fn debug_output_hides_password() {
        let seed = StaffSeed {
            email: "admin@cinema.com".into(),
            password: "hunter22".into(),
        };
        let rendered = format!("{seed:?}");
        assert!(rendered.contains("admin@cinema.com"));
        assert!(!rendered.contains("hunter22"));
    }
}
