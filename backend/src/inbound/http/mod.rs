//! HTTP inbound adapter exposing the REST endpoints.

pub mod books;
pub mod dto;
pub mod error;
pub mod guards;
pub mod health;
pub(crate) mod payload;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register the account and book routes.
///
/// Health probes are registered separately because they need their own
/// application data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::register)
        .service(users::login)
        .service(users::edit)
        .service(books::list_books)
        .service(books::create_book)
        .service(books::get_book)
        .service(books::update_book)
        .service(books::delete_book);
}

/// Fallback for unmatched paths, keeping the JSON error shape.
pub async fn not_found() -> ApiResult<actix_web::HttpResponse> {
    Err(crate::domain::Error::not_found("Not found"))
}
