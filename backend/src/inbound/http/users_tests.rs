//! Handler tests for the account endpoints.

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::UserId;
use crate::inbound::http::guards::{ADMIN_CHECK_MESSAGE, USER_AUTH_MESSAGE};
use crate::inbound::http::payload::INVALID_JSON_MESSAGE;
use crate::inbound::http::test_utils::{MockPorts, json_body, sample_user};

fn register_body(user: Value) -> Value {
    json!({"username": "admin", "password": "admin123", "user": user})
}

#[actix_web::test]
async fn admin_registers_user_with_default_role() {
    let mut ports = MockPorts::default();
    ports.accept("admin", "admin123", Role::Admin);
    ports
        .accounts
        .expect_register()
        .withf(|req| {
            req.username.as_ref() == "bob" && req.password.expose() == "pw1" && req.role == Role::User
        })
        .times(1)
        .return_once(|req| Ok(sample_user(3, req.username.as_ref(), req.role)));
    let app = ports.into_app().await;

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_body(json!({"username": "bob", "password": "pw1"})))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"msg": USER_CREATED_MESSAGE}));
}

#[actix_web::test]
async fn register_passes_explicit_admin_role() {
    let mut ports = MockPorts::default();
    ports.accept("admin", "admin123", Role::Admin);
    ports
        .accounts
        .expect_register()
        .withf(|req| req.role == Role::Admin)
        .times(1)
        .return_once(|req| Ok(sample_user(3, req.username.as_ref(), req.role)));
    let app = ports.into_app().await;

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_body(
            json!({"username": "carol", "password": "pw", "role": "admin"}),
        ))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[rstest]
#[case("admin", "wrong")]
#[case("bob", "pw1")]
#[case("", "")]
#[actix_web::test]
async fn register_requires_an_admin(#[case] username: &str, #[case] password: &str) {
    let mut ports = MockPorts::default();
    ports.accept("bob", "pw1", Role::User);
    ports.accounts.expect_register().times(0);
    let app = ports.into_app().await;

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(json!({
            "username": username,
            "password": password,
            "user": {"username": "dave", "password": "pw"}
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"error": ADMIN_CHECK_MESSAGE}));
}

#[rstest]
#[case(json!(null), FIELDS_REQUIRED_MESSAGE)]
#[case(json!({"username": "bob"}), FIELDS_REQUIRED_MESSAGE)]
#[case(json!({"password": "pw"}), FIELDS_REQUIRED_MESSAGE)]
#[case(json!({"username": "  ", "password": "pw"}), FIELDS_REQUIRED_MESSAGE)]
#[case(json!({"username": "bob", "password": "pw", "role": "root"}), ROLE_MESSAGE)]
#[actix_web::test]
async fn register_rejects_invalid_account_fields(#[case] user: Value, #[case] expected: &str) {
    let mut ports = MockPorts::default();
    ports.accept("admin", "admin123", Role::Admin);
    ports.accounts.expect_register().times(0);
    let app = ports.into_app().await;

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_body(user))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"error": expected}));
}

#[actix_web::test]
async fn register_reports_over_long_username() {
    let mut ports = MockPorts::default();
    ports.accept("admin", "admin123", Role::Admin);
    ports.accounts.expect_register().times(0);
    let app = ports.into_app().await;

    let long = "u".repeat(crate::domain::USERNAME_MAX + 1);
    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_body(json!({"username": long, "password": "pw"})))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(res).await;
    assert_eq!(body["error"], "Username must be at most 50 characters");
}

#[actix_web::test]
async fn register_surfaces_duplicate_username() {
    let mut ports = MockPorts::default();
    ports.accept("admin", "admin123", Role::Admin);
    ports
        .accounts
        .expect_register()
        .return_once(|_| Err(Error::invalid_request("Username already exists")));
    let app = ports.into_app().await;

    let req = test::TestRequest::post()
        .uri("/auth")
        .set_json(register_body(json!({"username": "admin", "password": "x"})))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"error": "Username already exists"}));
}

#[actix_web::test]
async fn login_returns_own_record_without_password() {
    let mut ports = MockPorts::default();
    ports.accept("bob", "pw1", Role::User);
    let app = ports.into_app().await;

    let req = test::TestRequest::get()
        .uri("/auth")
        .set_json(json!({"username": "bob", "password": "pw1"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"id": 2, "username": "bob", "role": "user"}));
}

#[rstest]
#[case(json!({"username": "bob", "password": "nope"}))]
#[case(json!({"username": "bob"}))]
#[case(json!({"username": 7, "password": "pw1"}))]
#[case(json!([]))]
#[actix_web::test]
async fn login_rejects_bad_credentials_uniformly(#[case] payload: Value) {
    let mut ports = MockPorts::default();
    ports.accept("bob", "pw1", Role::User);
    let app = ports.into_app().await;

    let req = test::TestRequest::get()
        .uri("/auth")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"error": USER_AUTH_MESSAGE}));
}

#[actix_web::test]
async fn login_without_body_is_unauthorized() {
    let mut ports = MockPorts::default();
    ports.login.expect_authenticate().times(0);
    let app = ports.into_app().await;

    let req = test::TestRequest::get().uri("/auth").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let mut ports = MockPorts::default();
    ports.login.expect_authenticate().times(0);
    let app = ports.into_app().await;

    let req = test::TestRequest::get()
        .uri("/auth")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"error": INVALID_JSON_MESSAGE}));
}

#[actix_web::test]
async fn edit_targets_the_authenticated_caller() {
    let mut ports = MockPorts::default();
    ports.accept("bob", "pw1", Role::User);
    ports
        .accounts
        .expect_edit()
        .withf(|req| {
            req.user_id == UserId::new(2)
                && req.username.as_ref() == "robert"
                && req.password.expose() == "pw2"
        })
        .times(1)
        .return_once(|req| Ok(sample_user(req.user_id.get(), req.username.as_ref(), Role::User)));
    let app = ports.into_app().await;

    let req = test::TestRequest::put()
        .uri("/auth")
        .set_json(json!({
            "username": "bob",
            "password": "pw1",
            "user": {"username": "robert", "password": "pw2", "role": "admin"}
        }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"id": 2, "username": "robert", "role": "user"}));
}

#[actix_web::test]
async fn edit_requires_both_new_fields() {
    let mut ports = MockPorts::default();
    ports.accept("bob", "pw1", Role::User);
    ports.accounts.expect_edit().times(0);
    let app = ports.into_app().await;

    let req = test::TestRequest::put()
        .uri("/auth")
        .set_json(json!({"username": "bob", "password": "pw1", "user": {"username": "robert"}}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(res).await;
    assert_eq!(body, json!({"error": FIELDS_REQUIRED_MESSAGE}));
}

#[actix_web::test]
async fn store_outage_during_login_is_service_unavailable() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_authenticate()
        .return_once(|_| Err(Error::service_unavailable("user store unavailable")));
    let app = ports.into_app().await;

    let req = test::TestRequest::get()
        .uri("/auth")
        .set_json(json!({"username": "bob", "password": "pw1"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
