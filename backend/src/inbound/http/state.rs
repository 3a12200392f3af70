//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and only see domain
//! ports, so they can be exercised with test doubles and no I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, BooksCommand, BooksQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub accounts: Arc<dyn AccountCommand>,
    pub books: Arc<dyn BooksQuery>,
    pub books_command: Arc<dyn BooksCommand>,
}

impl HttpState {
    pub fn new(
        login: Arc<dyn LoginService>,
        accounts: Arc<dyn AccountCommand>,
        books: Arc<dyn BooksQuery>,
        books_command: Arc<dyn BooksCommand>,
    ) -> Self {
        Self {
            login,
            accounts,
            books,
            books_command,
        }
    }
}
