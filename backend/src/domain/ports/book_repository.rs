//! Port abstraction for book persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Book, BookChanges, BookId, NewBook};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by book repository adapters.
    pub enum BookPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "book repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "book repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books ordered by identifier.
    async fn list(&self) -> Result<Vec<Book>, BookPersistenceError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookPersistenceError>;

    /// Insert a book and return the stored record.
    async fn insert(&self, book: &NewBook) -> Result<Book, BookPersistenceError>;

    /// Apply a non-empty set of changes.
    ///
    /// Returns `Ok(None)` when the book does not exist.
    async fn update(
        &self,
        id: BookId,
        changes: &BookChanges,
    ) -> Result<Option<Book>, BookPersistenceError>;

    /// Delete a book. Returns `false` when nothing was deleted.
    async fn delete(&self, id: BookId) -> Result<bool, BookPersistenceError>;
}
