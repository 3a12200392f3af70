//! First-run admin provisioning.

use tracing::{info, warn};

use crate::domain::ports::{PasswordHasher, UserRepository};
use crate::domain::{AccountService, AdminProvisioning, Error, Password, User, Username};

use super::config::AppSettings;

/// Ensure the configured admin account exists.
///
/// Returns `Ok(None)` when no admin password is configured. An existing
/// account with the configured username is reported and never modified.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use bookshelf::bootstrap::{AppSettings, provision_admin_on_startup};
/// use bookshelf::domain::AccountService;
/// use bookshelf::outbound::hashing::{Argon2Config, Argon2PasswordHasher};
/// use bookshelf::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
///
/// # async fn run(settings: AppSettings) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookshelf")).await?;
/// let accounts = AccountService::new(
///     Arc::new(DieselUserRepository::new(pool)),
///     Arc::new(Argon2PasswordHasher::new(Argon2Config::default())?),
/// );
/// provision_admin_on_startup(&settings, &accounts).await?;
/// # Ok(())
/// # }
/// ```
pub async fn provision_admin_on_startup<R, H>(
    settings: &AppSettings,
    accounts: &AccountService<R, H>,
) -> Result<Option<User>, Error>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    let Some(raw_password) = settings.admin_password() else {
        warn!(
            username = settings.admin_username(),
            "admin password not configured; provisioning skipped"
        );
        return Ok(None);
    };

    let username = Username::new(settings.admin_username())
        .map_err(|err| Error::invalid_request(format!("admin username: {err}")))?;
    let password = Password::new(raw_password)
        .map_err(|err| Error::invalid_request(format!("admin password: {err}")))?;

    match accounts.ensure_admin(username, password).await? {
        AdminProvisioning::Created(user) => {
            info!(user_id = %user.id(), username = %user.username(), "admin account created");
            Ok(Some(user))
        }
        AdminProvisioning::Existing(user) => {
            if user.is_admin() {
                info!(username = %user.username(), "admin account already present");
            } else {
                warn!(
                    username = %user.username(),
                    "configured admin username belongs to a non-admin account"
                );
            }
            Ok(Some(user))
        }
    }
}
