//! Book catalogue domain service.
//!
//! Implements [`BooksQuery`] and [`BooksCommand`] over a [`BookRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{BookPersistenceError, BookRepository, BooksCommand, BooksQuery};
use crate::domain::{Book, BookChanges, BookId, Error, NewBook};

pub(crate) const BOOK_NOT_FOUND_MESSAGE: &str = "Book not found";

fn map_book_error(error: BookPersistenceError) -> Error {
    match error {
        BookPersistenceError::Connection { message } => {
            debug!(%message, "book repository connection failed");
            Error::service_unavailable("book store unavailable")
        }
        BookPersistenceError::Query { message } => {
            Error::internal(format!("book repository error: {message}"))
        }
    }
}

fn not_found() -> Error {
    Error::not_found(BOOK_NOT_FOUND_MESSAGE)
}

/// Catalogue service shared by the read and write ports.
pub struct BookService<R> {
    books: Arc<R>,
}

impl<R> Clone for BookService<R> {
    fn clone(&self) -> Self {
        Self {
            books: Arc::clone(&self.books),
        }
    }
}

impl<R> BookService<R> {
    pub fn new(books: Arc<R>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl<R> BooksQuery for BookService<R>
where
    R: BookRepository,
{
    async fn list_books(&self) -> Result<Vec<Book>, Error> {
        self.books.list().await.map_err(map_book_error)
    }

    async fn get_book(&self, id: BookId) -> Result<Book, Error> {
        self.books
            .find_by_id(id)
            .await
            .map_err(map_book_error)?
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl<R> BooksCommand for BookService<R>
where
    R: BookRepository,
{
    async fn create_book(&self, book: NewBook) -> Result<Book, Error> {
        let created = self.books.insert(&book).await.map_err(map_book_error)?;
        info!(book_id = %created.id(), "book created");
        Ok(created)
    }

    async fn update_book(&self, id: BookId, changes: BookChanges) -> Result<Book, Error> {
        if changes.is_empty() {
            return self.get_book(id).await;
        }
        let updated = self
            .books
            .update(id, &changes)
            .await
            .map_err(map_book_error)?
            .ok_or_else(not_found)?;
        info!(book_id = %id, "book updated");
        Ok(updated)
    }

    async fn delete_book(&self, id: BookId) -> Result<(), Error> {
        if !self.books.delete(id).await.map_err(map_book_error)? {
            return Err(not_found());
        }
        info!(book_id = %id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "book_service_tests.rs"]
mod tests;
