//! Book catalogue handlers.
//!
//! Reads are public. Writes authenticate the caller from the body before
//! touching the catalogue; any account may write.
//!
//! ```text
//! GET    /books
//! POST   /books      {"username":"bob","password":"pw1","title":"Dune","author":"Herbert"}
//! GET    /books/1
//! PUT    /books/1    {"username":"bob","password":"pw1","title":"Dune Messiah"}
//! DELETE /books/1    {"username":"bob","password":"pw1"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::book_service::BOOK_NOT_FOUND_MESSAGE;
use crate::domain::{
    BOOK_FIELD_MAX, BookAuthor, BookChanges, BookId, BookTitle, BookValidationError, Error,
    NewBook,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{BookRequest, BooksResponse, CredentialsRequest, MessageResponse};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::guards::user_auth;
use crate::inbound::http::payload::parse_body;
use crate::inbound::http::schemas::BookSchema;
use crate::inbound::http::state::HttpState;

pub(crate) const FIELDS_REQUIRED_MESSAGE: &str = "Title and author are required";
pub(crate) const BOOK_DELETED_MESSAGE: &str = "Book deleted successfully";

/// Path ids must be canonical unsigned decimals; `+1`, `01` and `-1` address
/// no book.
fn parse_book_id(raw: &str) -> Result<BookId, Error> {
    let canonical = !raw.is_empty()
        && raw.bytes().all(|byte| byte.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));
    canonical
        .then(|| raw.parse::<i32>().ok())
        .flatten()
        .map(BookId::new)
        .ok_or_else(|| Error::not_found(BOOK_NOT_FOUND_MESSAGE))
}

fn map_book_validation_error(err: BookValidationError) -> Error {
    match err {
        BookValidationError::EmptyTitle | BookValidationError::EmptyAuthor => {
            Error::invalid_request(FIELDS_REQUIRED_MESSAGE)
        }
        BookValidationError::TitleTooLong { .. } | BookValidationError::AuthorTooLong { .. } => {
            Error::invalid_request(format!(
                "Title and author must be at most {BOOK_FIELD_MAX} characters"
            ))
        }
    }
}

/// List every book.
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "All books", body = BooksResponse),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["books"],
    operation_id = "listBooks"
)]
#[get("/books")]
pub async fn list_books(state: web::Data<HttpState>) -> ApiResult<web::Json<BooksResponse>> {
    let books = state.books.list_books().await?;
    Ok(web::Json(BooksResponse { books }))
}

/// Add a book.
#[utoipa::path(
    post,
    path = "/books",
    request_body = BookRequest,
    responses(
        (status = 201, description = "Book created", body = MessageResponse),
        (status = 400, description = "Missing title or author", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["books"],
    operation_id = "createBook"
)]
#[post("/books")]
pub async fn create_book(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let request: BookRequest = parse_body(&body)?;
    user_auth(state.login.as_ref(), &request.auth).await?;

    let title = BookTitle::new(request.title.as_deref().unwrap_or_default())
        .map_err(map_book_validation_error)?;
    let author = BookAuthor::new(request.author.as_deref().unwrap_or_default())
        .map_err(map_book_validation_error)?;
    let created = state
        .books_command
        .create_book(NewBook { title, author })
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse::new(format!(
        "Book {} added!",
        created.title()
    ))))
}

/// Fetch one book.
#[utoipa::path(
    get,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book identifier")),
    responses(
        (status = 200, description = "The book", body = BookSchema),
        (status = 404, description = "No such book", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["books"],
    operation_id = "getBook"
)]
#[get("/books/{id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_book_id(&id)?;
    let book = state.books.get_book(id).await?;
    Ok(HttpResponse::Ok().json(book))
}

/// Partially update a book. Absent or empty fields keep their value.
#[utoipa::path(
    put,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book identifier")),
    request_body = BookRequest,
    responses(
        (status = 200, description = "Updated book", body = BookSchema),
        (status = 400, description = "Field too long", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 404, description = "No such book", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["books"],
    operation_id = "updateBook"
)]
#[put("/books/{id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = parse_book_id(&id)?;
    let request: BookRequest = parse_body(&body)?;
    user_auth(state.login.as_ref(), &request.auth).await?;

    let changes = BookChanges::from_raw(request.title.as_deref(), request.author.as_deref())
        .map_err(map_book_validation_error)?;
    let book = state.books_command.update_book(id, changes).await?;
    Ok(HttpResponse::Ok().json(book))
}

/// Delete a book.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    params(("id" = i32, Path, description = "Book identifier")),
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 404, description = "No such book", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["books"],
    operation_id = "deleteBook"
)]
#[delete("/books/{id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = parse_book_id(&id)?;
    let request: CredentialsRequest = parse_body(&body)?;
    user_auth(state.login.as_ref(), &request.auth).await?;

    state.books_command.delete_book(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(BOOK_DELETED_MESSAGE)))
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
