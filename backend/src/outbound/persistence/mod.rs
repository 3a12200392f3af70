//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repositories are thin: they translate between Diesel row structs and
//! validated domain types and map database failures onto the port error
//! enums. Row structs and table definitions stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use bookshelf::outbound::persistence::{DbPool, DieselBookRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), bookshelf::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookshelf")).await?;
//! let books = DieselBookRepository::new(pool);
//! # let _ = books;
//! # Ok(())
//! # }
//! ```

mod diesel_book_repository;
mod diesel_error_mapping;
mod diesel_store_probe;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_book_repository::DieselBookRepository;
pub use diesel_store_probe::DieselStoreProbe;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
