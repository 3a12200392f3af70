//! Port for one-way password hashing.
//!
//! Implementations are CPU bound and synchronous; callers on async executors
//! should run them on a blocking thread.

use crate::domain::{Password, PasswordDigest};

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a digest.
    pub enum PasswordHashError {
        /// The hashing algorithm rejected its input or parameters.
        Hash { message: String } => "password hashing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted digest for `password`.
    fn hash(&self, password: &Password) -> Result<PasswordDigest, PasswordHashError>;

    /// Check `password` against `digest`.
    ///
    /// Returns `false` on mismatch and on malformed digests.
    fn verify(&self, password: &Password, digest: &PasswordDigest) -> bool;
}
