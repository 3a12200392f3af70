//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call this port to resolve body-embedded credentials into
//! an authenticated [`User`] without importing the credential store or the
//! hasher. Handler tests substitute a mock.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Unknown usernames and wrong passwords both yield the same
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized)
    /// error. Store failures surface with their own code.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
