//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod book_repository;
mod books_command;
mod books_query;
mod login_service;
mod password_hasher;
mod store_probe;
mod user_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, EditUserRequest, RegisterUserRequest};
#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookPersistenceError, BookRepository};
#[cfg(test)]
pub use books_command::MockBooksCommand;
pub use books_command::BooksCommand;
#[cfg(test)]
pub use books_query::MockBooksQuery;
pub use books_query::BooksQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use store_probe::MockStoreProbe;
pub use store_probe::{FixtureStoreProbe, StoreProbe, StoreProbeError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
