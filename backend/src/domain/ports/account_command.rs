//! Driving port for account mutations: registration and credential edits.

use async_trait::async_trait;

use crate::domain::{Error, Password, Role, User, UserId, Username};

/// Request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserRequest {
    pub username: Username,
    pub password: Password,
    pub role: Role,
}

/// Request to overwrite the credentials of an existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditUserRequest {
    /// Account being edited; always the authenticated caller.
    pub user_id: UserId,
    pub username: Username,
    pub password: Password,
}

/// Driving port for account write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Hash the password and persist a new account.
    ///
    /// Fails with [`ErrorCode::InvalidRequest`](crate::domain::ErrorCode)
    /// when the username is taken.
    async fn register(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// Overwrite username and password, returning the updated record.
    ///
    /// Fails with `InvalidRequest` when the new username belongs to another
    /// account.
    async fn edit(&self, request: EditUserRequest) -> Result<User, Error>;
}
