//! Per-route authentication guards.
//!
//! Gated handlers call one of these first, handing over the credentials parsed
//! from the request body. Failures are uniform: the response never
//! says whether the username exists.

use crate::domain::ports::LoginService;
use crate::domain::{Error, ErrorCode, LoginCredentials, User};

use super::dto::AuthFields;

pub(crate) const USER_AUTH_MESSAGE: &str = "Unauthorized access";
pub(crate) const ADMIN_CHECK_MESSAGE: &str = "Only admins can register users";

fn rewrite_unauthorized(error: Error, message: &'static str) -> Error {
    if error.code() == ErrorCode::Unauthorized {
        Error::unauthorized(message)
    } else {
        error
    }
}

/// Resolve the caller's credentials to an account.
///
/// Missing or empty fields fail exactly like a wrong password. Store failures
/// pass through unchanged.
pub async fn user_auth(login: &dyn LoginService, auth: &AuthFields) -> Result<User, Error> {
    let credentials = LoginCredentials::try_from_parts(
        auth.username.as_deref().unwrap_or_default(),
        auth.password.as_deref().unwrap_or_default(),
    )
    .map_err(|_| Error::unauthorized(USER_AUTH_MESSAGE))?;

    login
        .authenticate(&credentials)
        .await
        .map_err(|err| rewrite_unauthorized(err, USER_AUTH_MESSAGE))
}

/// [`user_auth`] plus a check for the admin role.
pub async fn admin_check(login: &dyn LoginService, auth: &AuthFields) -> Result<User, Error> {
    let user = user_auth(login, auth)
        .await
        .map_err(|err| rewrite_unauthorized(err, ADMIN_CHECK_MESSAGE))?;
    if !user.is_admin() {
        return Err(Error::unauthorized(ADMIN_CHECK_MESSAGE));
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockLoginService;
    use crate::domain::{Role, UserId, Username};
    use rstest::rstest;

    fn auth(username: Option<&str>, password: Option<&str>) -> AuthFields {
        AuthFields {
            username: username.map(str::to_owned),
            password: password.map(str::to_owned),
        }
    }

    fn user(role: Role) -> User {
        User::new(
            UserId::new(1),
            Username::new("alice").expect("valid"),
            role,
        )
    }

    #[rstest]
    #[case(None, Some("pw"))]
    #[case(Some("alice"), None)]
    #[case(Some(""), Some("pw"))]
    #[case(Some("alice"), Some(""))]
    #[tokio::test]
    async fn incomplete_credentials_never_reach_the_store(
        #[case] username: Option<&str>,
        #[case] password: Option<&str>,
    ) {
        let mut login = MockLoginService::new();
        login.expect_authenticate().times(0);

        let err = user_auth(&login, &auth(username, password))
            .await
            .expect_err("incomplete");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), USER_AUTH_MESSAGE);
    }

    #[tokio::test]
    async fn user_auth_returns_the_account() {
        let mut login = MockLoginService::new();
        login
            .expect_authenticate()
            .withf(|creds| creds.username() == "alice" && creds.password() == "pw")
            .return_once(|_| Ok(user(Role::User)));

        let found = user_auth(&login, &auth(Some("alice"), Some("pw")))
            .await
            .expect("authenticated");
        assert_eq!(found, user(Role::User));
    }

    #[tokio::test]
    async fn store_failures_are_not_rewritten() {
        let mut login = MockLoginService::new();
        login
            .expect_authenticate()
            .return_once(|_| Err(Error::service_unavailable("user store unavailable")));

        let err = user_auth(&login, &auth(Some("alice"), Some("pw")))
            .await
            .expect_err("store down");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn admin_check_rejects_plain_users() {
        let mut login = MockLoginService::new();
        login
            .expect_authenticate()
            .return_once(|_| Ok(user(Role::User)));

        let err = admin_check(&login, &auth(Some("alice"), Some("pw")))
            .await
            .expect_err("not admin");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), ADMIN_CHECK_MESSAGE);
    }

    #[tokio::test]
    async fn admin_check_uses_its_own_message_for_bad_credentials() {
        let mut login = MockLoginService::new();
        login
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized("Unauthorized access")));

        let err = admin_check(&login, &auth(Some("admin"), Some("wrong")))
            .await
            .expect_err("bad password");
        assert_eq!(err.message(), ADMIN_CHECK_MESSAGE);
    }

    #[tokio::test]
    async fn admin_check_accepts_admins() {
        let mut login = MockLoginService::new();
        login
            .expect_authenticate()
            .return_once(|_| Ok(user(Role::Admin)));

        let found = admin_check(&login, &auth(Some("alice"), Some("pw")))
            .await
            .expect("admin");
        assert!(found.is_admin());
    }
}
