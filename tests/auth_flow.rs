mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::json;

use common::{register, send, send_request};
use todo_api::{
    auth::{
        Claims,
        jwt::{JwtKeys, encode_token, now_unix},
    },
    test_helpers::{TEST_JWT_SECRET, test_app},
};

#[tokio::test]
async fn status_banner_is_public() {
    let app = test_app().expect("app should build");

    let res = send(&app, "GET", "/", None, None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["message"], "Todo API is running");
    assert_eq!(res.body["endpoints"]["auth"], "/api/auth");
    assert_eq!(res.body["endpoints"]["todos"], "/api/todos");
    assert!(res.body["timestamp"].is_string());
    assert!(res.body["version"].is_string());
}

#[tokio::test]
async fn register_returns_user_and_token_without_password() {
    let app = test_app().expect("app should build");

    let res = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "a@b.com", "password": "secret1", "name": "A" })),
    )
    .await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.body["user"]["email"], "a@b.com");
    assert_eq!(res.body["user"]["name"], "A");
    assert!(res.body["user"]["id"].is_i64());
    assert!(res.body["token"].is_string());
    let raw = res.body.to_string();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("secret1"));
}

#[tokio::test]
async fn duplicate_registration_is_conflict() {
    let app = test_app().expect("app should build");
    register(&app, "a@b.com").await;

    let res = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "a@b.com", "password": "secret1", "name": "A" })),
    )
    .await;

    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(res.body, json!({ "error": "Email already registered" }));
}

#[tokio::test]
async fn register_reports_first_validation_failure() {
    let app = test_app().expect("app should build");

    let cases = [
        (json!({ "password": "secret1", "name": "A" }), "Valid email is required"),
        (
            json!({ "email": "a@b.com", "password": "123", "name": "A" }),
            "Password must be at least 6 characters",
        ),
        (
            json!({ "email": "a@b.com", "password": "secret1" }),
            "Name is required",
        ),
    ];

    for (payload, expected) in cases {
        let res = send(&app, "POST", "/api/auth/register", None, Some(payload)).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["error"], expected);
    }
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = test_app().expect("app should build");
    register(&app, "a@b.com").await;

    let wrong_password = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@b.com", "password": "nope-nope" })),
    )
    .await;
    let unknown_email = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "x@b.com", "password": "secret1" })),
    )
    .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
    assert_eq!(wrong_password.body["error"], "Invalid email or password");
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let app = test_app().expect("app should build");

    let res = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "a@b.com" })),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "Email and password are required");
}

#[tokio::test]
async fn login_token_opens_me() {
    let app = test_app().expect("app should build");
    register(&app, "a@b.com").await;

    let login = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "A@B.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    let token = login.body["token"].as_str().expect("token should be present");

    let me = send(&app, "GET", "/api/auth/me", Some(token), None).await;

    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["email"], "a@b.com");
    assert!(me.body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn me_rejects_missing_and_malformed_headers() {
    let app = test_app().expect("app should build");

    let missing = send(&app, "GET", "/api/auth/me", None, None).await;
    let malformed = send_request(
        &app,
        Request::builder()
            .uri("/api/auth/me")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .expect("request should build"),
    )
    .await;
    let garbage = send(&app, "GET", "/api/auth/me", Some("not-a-jwt"), None).await;

    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "Authentication required");
    assert_eq!(malformed.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        malformed.body["error"],
        "Invalid authorization format. Use: Bearer <token>"
    );
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.body["error"], "Invalid token");
}

#[tokio::test]
async fn me_rejects_expired_token() {
    let app = test_app().expect("app should build");
    let issued = now_unix() - 3 * 60 * 60;
    let token = encode_token(
        &JwtKeys::from_secret(TEST_JWT_SECRET.as_bytes()),
        &Claims {
            user_id: 1,
            email: "a@b.com".to_string(),
            iat: issued,
            exp: issued + 60,
        },
    )
    .expect("token should encode");

    let res = send(&app, "GET", "/api/auth/me", Some(&token), None).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "Token has expired");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_invalid() {
    let app = test_app().expect("app should build");
    let issued = now_unix();
    let token = encode_token(
        &JwtKeys::from_secret(b"some-other-secret"),
        &Claims {
            user_id: 1,
            email: "a@b.com".to_string(),
            iat: issued,
            exp: issued + 600,
        },
    )
    .expect("token should encode");

    let res = send(&app, "GET", "/api/auth/me", Some(&token), None).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "Invalid token");
}

#[tokio::test]
async fn malformed_json_is_reported_as_bad_request() {
    let app = test_app().expect("app should build");

    let res = send_request(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"email\": "))
            .expect("request should build"),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].is_string());
}

#[tokio::test]
async fn token_expired_seconds_ago_is_rejected() {
    let app = test_app().expect("app should build");
    let token = register(&app, "a@b.com").await;
    let live = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    let user_id = live.body["user"]["id"]
        .as_i64()
        .and_then(|id| i32::try_from(id).ok())
        .expect("user id should be an i32");
    let now = now_unix();
    let stale = encode_token(
        &JwtKeys::from_secret(TEST_JWT_SECRET.as_bytes()),
        &Claims {
            user_id,
            email: "a@b.com".to_string(),
            iat: now - 600,
            exp: now - 30,
        },
    )
    .expect("token should encode");

    let res = send(&app, "GET", "/api/auth/me", Some(&stale), None).await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "Token has expired");
}

#[tokio::test]
async fn bodyless_auth_requests_fail_field_validation() {
    let app = test_app().expect("app should build");

    let signup = send(&app, "POST", "/api/auth/register", None, None).await;
    let login = send(&app, "POST", "/api/auth/login", None, None).await;
    let form = send_request(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=a%40b.com"))
            .expect("request should build"),
    )
    .await;

    assert_eq!(signup.status, StatusCode::BAD_REQUEST);
    assert_eq!(signup.body["error"], "Valid email is required");
    assert_eq!(login.status, StatusCode::BAD_REQUEST);
    assert_eq!(login.body["error"], "Email and password are required");
    assert_eq!(form.status, StatusCode::BAD_REQUEST);
    assert_eq!(form.body["error"], "Valid email is required");
}

#[tokio::test]
async fn blank_login_email_is_invalid_credentials() {
    let app = test_app().expect("app should build");

    let res = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "   ", "password": "secret1" })),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "Invalid email or password");
}
