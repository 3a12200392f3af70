//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler in the inbound HTTP layer together with
//! the schema wrappers for domain types. Gated endpoints authenticate with
//! `username`/`password` fields in the request body, so the document declares
//! no security scheme.
//!
//! The document is served by Swagger UI in debug builds and printed by
//! `cargo run --bin openapi-dump`.

use crate::inbound::http::dto::{
    AccountRequest, AuthFields, BookRequest, BooksResponse, CredentialsRequest, MessageResponse,
    UserFields,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::{BookSchema, RoleSchema, UserSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        description = "Book catalogue with body-credential authentication and an admin role."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::edit,
        crate::inbound::http::books::list_books,
        crate::inbound::http::books::create_book,
        crate::inbound::http::books::get_book,
        crate::inbound::http::books::update_book,
        crate::inbound::http::books::delete_book,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        RoleSchema,
        BookSchema,
        ErrorBody,
        MessageResponse,
        BooksResponse,
        AuthFields,
        CredentialsRequest,
        UserFields,
        AccountRequest,
        BookRequest
    )),
    tags(
        (name = "users", description = "Account registration, login and edits"),
        (name = "books", description = "Book catalogue"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
