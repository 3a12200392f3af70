//! Tests for the account service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockPasswordHasher, MockUserRepository, PasswordHashError};
use crate::domain::{ErrorCode, UserAccount, UserId};

fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid username")
}

fn password(raw: &str) -> Password {
    Password::new(raw).expect("non-empty password")
}

fn stored(id: i32, name: &str, role: Role) -> UserAccount {
    UserAccount::new(
        User::new(UserId::new(id), username(name), role),
        PasswordDigest::new(format!("digest:{name}")),
    )
}

/// Hasher double: digest is `hashed:<plaintext>`, verify compares against it.
fn echo_hasher() -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .returning(|pw| Ok(PasswordDigest::new(format!("hashed:{}", pw.expose()))));
    hasher
        .expect_verify()
        .returning(|pw, digest| digest.as_str() == format!("digest:{}", pw.expose()));
    hasher
}

fn service(
    repo: MockUserRepository,
    hasher: MockPasswordHasher,
) -> AccountService<MockUserRepository, MockPasswordHasher> {
    AccountService::new(Arc::new(repo), Arc::new(hasher))
}

#[rstest]
#[case("admin", "admin", true)]
#[case("admin", "wrong", false)]
#[tokio::test]
async fn authenticate_verifies_password(
    #[case] name: &str,
    #[case] supplied: &str,
    #[case] should_succeed: bool,
) {
    let mut repo = MockUserRepository::new();
    let found = stored(1, name, Role::Admin);
    repo.expect_find_by_username()
        .withf(|candidate| candidate.as_ref() == "admin")
        .return_once(move |_| Ok(Some(found)));

    let creds = LoginCredentials::try_from_parts(name, supplied).expect("credentials shape");
    let result = service(repo, echo_hasher()).authenticate(&creds).await;

    match (should_succeed, result) {
        (true, Ok(user)) => {
            assert_eq!(user.username().as_ref(), "admin");
            assert!(user.is_admin());
        }
        (false, Err(err)) => {
            assert_eq!(err.code(), ErrorCode::Unauthorized);
            assert_eq!(err.message(), UNAUTHORIZED_MESSAGE);
        }
        (true, Err(err)) => panic!("expected success, got error: {err:?}"),
        (false, Ok(user)) => panic!("expected failure, got {user:?}"),
    }
}

#[tokio::test]
async fn unknown_username_is_indistinguishable_from_wrong_password() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().times(0);

    let creds = LoginCredentials::try_from_parts("ghost", "pw").expect("credentials shape");
    let err = service(repo, hasher)
        .authenticate(&creds)
        .await
        .expect_err("unknown user");

    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), UNAUTHORIZED_MESSAGE);
}

#[tokio::test]
async fn over_long_login_name_is_unauthorized_without_lookup() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().times(0);

    let long = "a".repeat(crate::domain::USERNAME_MAX + 1);
    let creds = LoginCredentials::try_from_parts(&long, "pw").expect("credentials shape");
    let err = service(repo, MockPasswordHasher::new())
        .authenticate(&creds)
        .await
        .expect_err("cannot exist");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn authenticate_surfaces_store_failures(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(move |_| Err(failure));

    let creds = LoginCredentials::try_from_parts("bob", "pw").expect("credentials shape");
    let err = service(repo, MockPasswordHasher::new())
        .authenticate(&creds)
        .await
        .expect_err("store failure");
    assert_eq!(err.code(), expected);
}

#[tokio::test]
async fn register_hashes_and_inserts() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|account| {
            account.username.as_ref() == "bob"
                && account.password_digest.as_str() == "hashed:pw1"
                && account.role == Role::User
        })
        .times(1)
        .return_once(|account| {
            Ok(User::new(
                UserId::new(2),
                account.username.clone(),
                account.role,
            ))
        });

    let user = service(repo, echo_hasher())
        .register(RegisterUserRequest {
            username: username("bob"),
            password: password("pw1"),
            role: Role::User,
        })
        .await
        .expect("registration succeeds");

    assert_eq!(user.id(), UserId::new(2));
    assert_eq!(user.role(), Role::User);
}

#[tokio::test]
async fn register_rejects_existing_username_without_hashing() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(|_| Ok(Some(stored(2, "bob", Role::User))));
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let err = service(repo, hasher)
        .register(RegisterUserRequest {
            username: username("bob"),
            password: password("pw1"),
            role: Role::User,
        })
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), DUPLICATE_USERNAME_MESSAGE);
}

#[tokio::test]
async fn register_maps_insert_race_to_duplicate() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_insert()
        .return_once(|_| Err(UserPersistenceError::duplicate_username("bob")));

    let err = service(repo, echo_hasher())
        .register(RegisterUserRequest {
            username: username("bob"),
            password: password("pw1"),
            role: Role::Admin,
        })
        .await
        .expect_err("duplicate");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), DUPLICATE_USERNAME_MESSAGE);
}

#[tokio::test]
async fn register_surfaces_hash_failure_as_internal() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .return_once(|_| Err(PasswordHashError::hash("bad params")));

    let err = service(repo, hasher)
        .register(RegisterUserRequest {
            username: username("bob"),
            password: password("pw1"),
            role: Role::User,
        })
        .await
        .expect_err("hash failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[tokio::test]
async fn edit_allows_keeping_own_username() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(|_| Ok(Some(stored(2, "bob", Role::User))));
    repo.expect_update_credentials()
        .withf(|id, name, digest| {
            *id == UserId::new(2) && name.as_ref() == "bob" && digest.as_str() == "hashed:new"
        })
        .times(1)
        .return_once(|id, name, _| Ok(Some(User::new(id, name.clone(), Role::User))));

    let user = service(repo, echo_hasher())
        .edit(EditUserRequest {
            user_id: UserId::new(2),
            username: username("bob"),
            password: password("new"),
        })
        .await
        .expect("edit succeeds");
    assert_eq!(user.username().as_ref(), "bob");
}

#[tokio::test]
async fn edit_rejects_username_held_by_another_account() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(|_| Ok(Some(stored(1, "admin", Role::Admin))));
    repo.expect_update_credentials().times(0);

    let err = service(repo, MockPasswordHasher::new())
        .edit(EditUserRequest {
            user_id: UserId::new(2),
            username: username("admin"),
            password: password("new"),
        })
        .await
        .expect_err("taken");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), DUPLICATE_USERNAME_MESSAGE);
}

#[tokio::test]
async fn edit_of_vanished_account_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_update_credentials()
        .return_once(|_, _, _| Ok(None));

    let err = service(repo, echo_hasher())
        .edit(EditUserRequest {
            user_id: UserId::new(9),
            username: username("carol"),
            password: password("pw"),
        })
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn ensure_admin_creates_missing_account() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username().return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|account| account.role == Role::Admin)
        .times(1)
        .return_once(|account| Ok(User::new(UserId::new(1), account.username.clone(), Role::Admin)));

    let outcome = service(repo, echo_hasher())
        .ensure_admin(username("admin"), password("admin123"))
        .await
        .expect("provisioning succeeds");
    assert!(matches!(outcome, AdminProvisioning::Created(user) if user.is_admin()));
}

#[tokio::test]
async fn ensure_admin_leaves_existing_account_untouched() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_username()
        .return_once(|_| Ok(Some(stored(1, "admin", Role::User))));
    repo.expect_insert().times(0);
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().times(0);

    let outcome = service(repo, hasher)
        .ensure_admin(username("admin"), password("admin123"))
        .await
        .expect("provisioning succeeds");
    assert!(matches!(outcome, AdminProvisioning::Existing(user) if !user.is_admin()));
}
