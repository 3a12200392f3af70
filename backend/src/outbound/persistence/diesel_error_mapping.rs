//! Diesel and pool error translation shared by the repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{BookPersistenceError, UserPersistenceError};

use super::pool::PoolError;

/// Coarse classification of a Diesel failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection,
    /// A unique index rejected the write.
    UniqueViolation,
    /// Anything else.
    Query,
}

/// Log and classify a Diesel error. Database messages stay at `debug` level.
pub(crate) fn classify(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
            match kind {
                DatabaseErrorKind::ClosedConnection => DieselFailure::Connection,
                DatabaseErrorKind::UniqueViolation => DieselFailure::UniqueViolation,
                _ => DieselFailure::Query,
            }
        }
        DieselError::BrokenTransactionManager => {
            debug!("diesel transaction manager broken");
            DieselFailure::Connection
        }
        other => {
            debug!(error = %other, "diesel operation failed");
            DieselFailure::Query
        }
    }
}

fn pool_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

impl From<PoolError> for UserPersistenceError {
    fn from(error: PoolError) -> Self {
        Self::connection(pool_message(error))
    }
}

impl From<PoolError> for BookPersistenceError {
    fn from(error: PoolError) -> Self {
        Self::connection(pool_message(error))
    }
}

/// Map a Diesel error from a user write or read.
///
/// `username` names the account involved so a unique violation can be
/// reported as a duplicate.
pub(crate) fn map_user_diesel_error(error: DieselError, username: &str) -> UserPersistenceError {
    match classify(&error) {
        DieselFailure::Connection => UserPersistenceError::connection("database connection error"),
        DieselFailure::UniqueViolation => UserPersistenceError::duplicate_username(username),
        DieselFailure::Query => UserPersistenceError::query("database error"),
    }
}

pub(crate) fn map_book_diesel_error(error: DieselError) -> BookPersistenceError {
    match classify(&error) {
        DieselFailure::Connection => BookPersistenceError::connection("database connection error"),
        DieselFailure::UniqueViolation | DieselFailure::Query => {
            BookPersistenceError::query("database error")
        }
    }
}
