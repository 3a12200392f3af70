//! Port abstraction for the credential store and its errors.
use async_trait::async_trait;

use crate::domain::{NewUserAccount, PasswordDigest, User, UserAccount, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already holds the requested username.
        DuplicateUsername { username: String } => "username already taken: {username}",
    }
}

/// Credential store.
///
/// Writes are atomic: adapters perform the uniqueness check and the write in
/// one transaction and also translate unique-constraint violations into
/// [`UserPersistenceError::DuplicateUsername`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch an account, digest included, by exact username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Insert a new account and return its public view.
    async fn insert(&self, account: &NewUserAccount) -> Result<User, UserPersistenceError>;

    /// Overwrite username and digest of an existing account.
    ///
    /// Returns `Ok(None)` when no account has `id`.
    async fn update_credentials(
        &self,
        id: UserId,
        username: &Username,
        password_digest: &PasswordDigest,
    ) -> Result<Option<User>, UserPersistenceError>;
}
