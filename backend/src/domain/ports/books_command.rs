//! Driving port for catalogue mutations.
//!
//! Callers are expected to have authenticated the request already; the port
//! itself performs no authorisation.

use async_trait::async_trait;

use crate::domain::{Book, BookChanges, BookId, Error, NewBook};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksCommand: Send + Sync {
    /// Persist a new book.
    async fn create_book(&self, book: NewBook) -> Result<Book, Error>;

    /// Apply a partial update. An empty change set performs no write and
    /// returns the stored record unchanged.
    async fn update_book(&self, id: BookId, changes: BookChanges) -> Result<Book, Error>;

    /// Remove a book, or fail with `NotFound`.
    async fn delete_book(&self, id: BookId) -> Result<(), Error>;
}
