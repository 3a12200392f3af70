//! Driving port for unauthenticated catalogue reads.

use async_trait::async_trait;

use crate::domain::{Book, BookId, Error};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksQuery: Send + Sync {
    /// Every book in the catalogue.
    async fn list_books(&self) -> Result<Vec<Book>, Error>;

    /// A single book, or a `NotFound` error.
    async fn get_book(&self, id: BookId) -> Result<Book, Error>;
}
