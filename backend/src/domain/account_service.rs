//! Account domain service.
//!
//! Implements the authentication and account mutation driving ports over the
//! credential store and password hasher ports. Hashing is CPU bound; every
//! hasher call runs on Tokio's blocking pool.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    AccountCommand, EditUserRequest, LoginService, PasswordHasher, RegisterUserRequest,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, NewUserAccount, Password, PasswordDigest, Role, User, Username,
};

pub(crate) const UNAUTHORIZED_MESSAGE: &str = "Unauthorized access";
pub(crate) const DUPLICATE_USERNAME_MESSAGE: &str = "Username already exists";

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            debug!(%message, "user repository connection failed");
            Error::service_unavailable("user store unavailable")
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::invalid_request(DUPLICATE_USERNAME_MESSAGE)
        }
    }
}

/// Outcome of [`AccountService::ensure_admin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminProvisioning {
    /// A new admin account was inserted.
    Created(User),
    /// An account with the configured username was already present and left
    /// untouched. Its role may not be admin.
    Existing(User),
}

/// Account service implementing [`LoginService`] and [`AccountCommand`].
pub struct AccountService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> Clone for AccountService<R, H> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<R, H> AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    /// Create a service over the credential store and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }

    async fn blocking<T, F>(&self, task: F) -> Result<T, Error>
    where
        F: FnOnce(&H) -> T + Send + 'static,
        T: Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || task(hasher.as_ref()))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))
    }

    async fn hash(&self, password: Password) -> Result<PasswordDigest, Error> {
        self.blocking(move |hasher| hasher.hash(&password))
            .await?
            .map_err(|err| Error::internal(err.to_string()))
    }

    async fn verify(&self, password: Password, digest: PasswordDigest) -> Result<bool, Error> {
        self.blocking(move |hasher| hasher.verify(&password, &digest))
            .await
    }

    /// Ensure an account named `username` exists, creating it with the admin
    /// role when absent.
    ///
    /// Existing accounts are never modified, so repeated calls are idempotent.
    pub async fn ensure_admin(
        &self,
        username: Username,
        password: Password,
    ) -> Result<AdminProvisioning, Error> {
        if let Some(account) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?
        {
            return Ok(AdminProvisioning::Existing(account.into_user()));
        }

        let password_digest = self.hash(password).await?;
        let account = NewUserAccount {
            username: username.clone(),
            password_digest,
            role: Role::Admin,
        };
        match self.users.insert(&account).await {
            Ok(user) => Ok(AdminProvisioning::Created(user)),
            // Another instance provisioned the same account first.
            Err(UserPersistenceError::DuplicateUsername { .. }) => self
                .users
                .find_by_username(&username)
                .await
                .map_err(map_user_error)?
                .map(|account| AdminProvisioning::Existing(account.into_user()))
                .ok_or_else(|| Error::internal("admin account vanished during provisioning")),
            Err(other) => Err(map_user_error(other)),
        }
    }
}

#[async_trait]
impl<R, H> LoginService for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        // A name the store could never hold cannot match an account.
        let Ok(username) = Username::new(credentials.username()) else {
            return Err(Error::unauthorized(UNAUTHORIZED_MESSAGE));
        };
        let Some(account) = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?
        else {
            debug!("login rejected");
            return Err(Error::unauthorized(UNAUTHORIZED_MESSAGE));
        };

        let verified = self
            .verify(
                credentials.secret().clone(),
                account.password_digest().clone(),
            )
            .await?;
        if !verified {
            debug!("login rejected");
            return Err(Error::unauthorized(UNAUTHORIZED_MESSAGE));
        }
        Ok(account.into_user())
    }
}

#[async_trait]
impl<R, H> AccountCommand for AccountService<R, H>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let RegisterUserRequest {
            username,
            password,
            role,
        } = request;

        // Early exit only; the repository enforces uniqueness atomically.
        if self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(Error::invalid_request(DUPLICATE_USERNAME_MESSAGE));
        }

        let password_digest = self.hash(password).await?;
        let user = self
            .users
            .insert(&NewUserAccount {
                username,
                password_digest,
                role,
            })
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id(), role = %user.role(), "user registered");
        Ok(user)
    }

    async fn edit(&self, request: EditUserRequest) -> Result<User, Error> {
        let EditUserRequest {
            user_id,
            username,
            password,
        } = request;

        let holder = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_error)?;
        if holder.is_some_and(|account| account.user().id() != user_id) {
            return Err(Error::invalid_request(DUPLICATE_USERNAME_MESSAGE));
        }

        let password_digest = self.hash(password).await?;
        let user = self
            .users
            .update_credentials(user_id, &username, &password_digest)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("User not found"))?;

        info!(user_id = %user.id(), "user credentials updated");
        Ok(user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
