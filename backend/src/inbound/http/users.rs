//! Account API handlers.
//!
//! ```text
//! POST /auth {"username":"admin","password":"admin123","user":{"username":"bob","password":"pw1","role":"user"}}
//! GET  /auth {"username":"bob","password":"pw1"}
//! PUT  /auth {"username":"bob","password":"pw1","user":{"username":"robert","password":"pw2"}}
//! ```

use actix_web::{HttpResponse, get, post, put, web};

use crate::domain::ports::{EditUserRequest, RegisterUserRequest};
use crate::domain::{Error, Password, Role, UserValidationError, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    AccountRequest, CredentialsRequest, MessageResponse, UserFields,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::guards::{admin_check, user_auth};
use crate::inbound::http::payload::parse_body;
use crate::inbound::http::schemas::UserSchema;
use crate::inbound::http::state::HttpState;

pub(crate) const FIELDS_REQUIRED_MESSAGE: &str = "Username and password are required";
pub(crate) const ROLE_MESSAGE: &str = "Role must be either 'user' or 'admin'";
pub(crate) const USER_CREATED_MESSAGE: &str = "User created successfully";

fn map_username_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::UsernameTooLong { max } => {
            Error::invalid_request(format!("Username must be at most {max} characters"))
        }
        _ => Error::invalid_request(FIELDS_REQUIRED_MESSAGE),
    }
}

/// Validate the nested `user` object shared by register and edit.
fn account_fields(user: Option<UserFields>) -> Result<(Username, Password, Option<String>), Error> {
    let fields = user.unwrap_or_default();
    let username = Username::new(fields.username.as_deref().unwrap_or_default())
        .map_err(map_username_error)?;
    let password = Password::new(fields.password.as_deref().unwrap_or_default())
        .map_err(|_| Error::invalid_request(FIELDS_REQUIRED_MESSAGE))?;
    Ok((username, password, fields.role))
}

fn parse_role(raw: Option<&str>) -> Result<Role, Error> {
    raw.map_or(Ok(Role::default()), |value| {
        value
            .parse::<Role>()
            .map_err(|_| Error::invalid_request(ROLE_MESSAGE))
    })
}

/// Register a new account. Admin only.
#[utoipa::path(
    post,
    path = "/auth",
    request_body = AccountRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Invalid input or username taken", body = ErrorBody),
        (status = 401, description = "Caller is not an authenticated admin", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/auth")]
pub async fn register(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let request: AccountRequest = parse_body(&body)?;
    admin_check(state.login.as_ref(), &request.auth).await?;

    let (username, password, role) = account_fields(request.user)?;
    let role = parse_role(role.as_deref())?;
    state
        .accounts
        .register(RegisterUserRequest {
            username,
            password,
            role,
        })
        .await?;

    Ok(HttpResponse::Created().json(MessageResponse::new(USER_CREATED_MESSAGE)))
}

/// Return the caller's own record.
#[utoipa::path(
    get,
    path = "/auth",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Authenticated account", body = UserSchema),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[get("/auth")]
pub async fn login(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let request: CredentialsRequest = parse_body(&body)?;
    let user = user_auth(state.login.as_ref(), &request.auth).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Overwrite the caller's username and password.
#[utoipa::path(
    put,
    path = "/auth",
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Updated account", body = UserSchema),
        (status = 400, description = "Invalid input or username taken", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "editUser"
)]
#[put("/auth")]
pub async fn edit(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let request: AccountRequest = parse_body(&body)?;
    let caller = user_auth(state.login.as_ref(), &request.auth).await?;

    let (username, password, _) = account_fields(request.user)?;
    let updated = state
        .accounts
        .edit(EditUserRequest {
            user_id: caller.id(),
            username,
            password,
        })
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
