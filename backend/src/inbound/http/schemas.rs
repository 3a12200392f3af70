//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their serialised shape for the generated document.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::Role`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Role)]
pub enum RoleSchema {
    #[schema(rename = "user")]
    User,
    #[schema(rename = "admin")]
    Admin,
}

/// OpenAPI schema for [`crate::domain::User`]. Credentials are not exposed.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct UserSchema {
    #[schema(example = 2)]
    id: i32,
    #[schema(example = "bob")]
    username: String,
    role: RoleSchema,
}

/// OpenAPI schema for [`crate::domain::Book`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Book)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct BookSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Dune")]
    title: String,
    #[schema(example = "Herbert")]
    author: String,
}
