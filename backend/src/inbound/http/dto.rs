//! Request and response bodies for the REST endpoints.
//!
//! Credentials ride in the same body as the operation payload, so every gated
//! request embeds [`AuthFields`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::payload::{lenient_object, lenient_string};

/// Caller credentials carried in every gated request body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AuthFields {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "admin")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "admin123")]
    pub password: Option<String>,
}

/// Body of `GET /auth` and `DELETE /books/{id}`: credentials only.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CredentialsRequest {
    #[serde(flatten)]
    pub auth: AuthFields,
}

/// Account fields nested under `user`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserFields {
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "bob")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "pw1")]
    pub password: Option<String>,
    /// `user` or `admin`; defaults to `user`. Ignored by `PUT /auth`.
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "user")]
    pub role: Option<String>,
}

/// Body of `POST /auth` and `PUT /auth`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AccountRequest {
    #[serde(flatten)]
    pub auth: AuthFields,
    #[serde(default, deserialize_with = "lenient_object")]
    pub user: Option<UserFields>,
}

/// Body of `POST /books` and `PUT /books/{id}`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookRequest {
    #[serde(flatten)]
    pub auth: AuthFields,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Dune")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[schema(example = "Herbert")]
    pub author: Option<String>,
}

/// Confirmation body for writes that return no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Book deleted successfully")]
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Body of `GET /books`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BooksResponse {
    #[schema(value_type = Vec<super::schemas::BookSchema>)]
    pub books: Vec<crate::domain::Book>,
}
