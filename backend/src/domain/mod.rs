//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed entities shared by the HTTP and
//! persistence adapters, the ports those adapters plug into, and the services
//! implementing the account and catalogue use-cases.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure type.
//! - User, UserAccount, Role: credential store entities.
//! - Book, BookChanges: catalogue entities.
//! - LoginCredentials: validated username/password pair used by the guards.
//! - AccountService, BookService: domain services behind the driving ports.

pub mod account_service;
pub mod auth;
pub mod book;
pub mod book_service;
pub mod error;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, AdminProvisioning};
pub use self::auth::{LoginCredentials, LoginValidationError, Password};
pub use self::book::{
    BOOK_FIELD_MAX, Book, BookAuthor, BookChanges, BookId, BookTitle, BookValidationError, NewBook,
};
pub use self::book_service::BookService;
pub use self::error::{Error, ErrorCode};
pub use self::password::PasswordDigest;
pub use self::trace_id::TraceId;
pub use self::user::{
    NewUserAccount, Role, USERNAME_MAX, User, UserAccount, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use bookshelf::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::unauthorized("Unauthorized access"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
