//! PostgreSQL-backed `BookRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{BookPersistenceError, BookRepository};
use crate::domain::{Book, BookChanges, BookId, NewBook};

use super::diesel_error_mapping::map_book_diesel_error;
use super::models::{BookChangeset, BookRow, NewBookRow};
use super::pool::DbPool;
use super::schema::books;

fn row_to_book(row: BookRow) -> Result<Book, BookPersistenceError> {
    Book::try_from(row).map_err(BookPersistenceError::query)
}

/// Diesel-backed book catalogue.
#[derive(Clone)]
pub struct DieselBookRepository {
    pool: DbPool,
}

impl DieselBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for DieselBookRepository {
    async fn list(&self) -> Result<Vec<Book>, BookPersistenceError> {
        let mut conn = self.pool.get().await?;

        books::table
            .order(books::id.asc())
            .select(BookRow::as_select())
            .load::<BookRow>(&mut conn)
            .await
            .map_err(map_book_diesel_error)?
            .into_iter()
            .map(row_to_book)
            .collect()
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookPersistenceError> {
        let mut conn = self.pool.get().await?;

        books::table
            .find(id.get())
            .select(BookRow::as_select())
            .first::<BookRow>(&mut conn)
            .await
            .optional()
            .map_err(map_book_diesel_error)?
            .map(row_to_book)
            .transpose()
    }

    async fn insert(&self, book: &NewBook) -> Result<Book, BookPersistenceError> {
        let mut conn = self.pool.get().await?;
        let new_row = NewBookRow {
            title: book.title.as_ref(),
            author: book.author.as_ref(),
        };

        let row = diesel::insert_into(books::table)
            .values(&new_row)
            .returning(BookRow::as_returning())
            .get_result::<BookRow>(&mut conn)
            .await
            .map_err(map_book_diesel_error)?;
        row_to_book(row)
    }

    async fn update(
        &self,
        id: BookId,
        changes: &BookChanges,
    ) -> Result<Option<Book>, BookPersistenceError> {
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await?;
        let changeset = BookChangeset::from(changes);

        let row = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::update(books::table.find(id.get()))
                        .set(&changeset)
                        .returning(BookRow::as_returning())
                        .get_result::<BookRow>(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_book_diesel_error)?;

        row.map(row_to_book).transpose()
    }

    async fn delete(&self, id: BookId) -> Result<bool, BookPersistenceError> {
        let mut conn = self.pool.get().await?;

        let deleted = diesel::delete(books::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_book_diesel_error)?;
        Ok(deleted > 0)
    }
}
