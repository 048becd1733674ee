//! Auth flow tests: register, login, session introspection, logout.

use lamore_integration_tests::TestContext;
use serde_json::{Value, json};

#[tokio::test]
#[ignore = "requires a running server and PostgreSQL"]
async fn register_login_me_logout_roundtrip() {
    let ctx = TestContext::new();
    let email = TestContext::unique_email("auth");

    ctx.register(&email, "Test User", "hunter2-hunter2").await;

    // Registration signs the caller in
    let me: Value = ctx
        .client
        .get(ctx.url("/api/auth/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["email"], email);
    assert_eq!(me["role"], "customer");

    // Logout clears the session
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);

    let me: Value = ctx
        .client
        .get(ctx.url("/api/auth/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(me.is_null());

    // And login restores it
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/login"))
        .json(&json!({"email": email, "password": "hunter2-hunter2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
#[ignore = "requires a running server and PostgreSQL"]
async fn wrong_password_is_unauthenticated() {
    let ctx = TestContext::new();
    let email = TestContext::unique_email("auth");
    ctx.register(&email, "Test User", "hunter2-hunter2").await;

    let fresh = TestContext::new();
    let resp = fresh
        .client
        .post(fresh.url("/api/auth/login"))
        .json(&json!({"email": email, "password": "not-the-password"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "UNAUTHENTICATED");
}

#[tokio::test]
#[ignore = "requires a running server and PostgreSQL"]
async fn duplicate_registration_is_bad_request() {
    let ctx = TestContext::new();
    let email = TestContext::unique_email("auth");
    ctx.register(&email, "Test User", "hunter2-hunter2").await;

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({"email": email, "name": "Again", "password": "hunter2-hunter2"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
#[ignore = "requires a running server and PostgreSQL"]
async fn short_password_rejected() {
    let ctx = TestContext::new();

    let resp = ctx
        .client
        .post(ctx.url("/api/auth/register"))
        .json(&json!({
            "email": TestContext::unique_email("auth"),
            "name": "Test User",
            "password": "short",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
}
