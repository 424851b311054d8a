use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::routes::{self, auth};
use service::auth::password::{mock::CountingHasher, Argon2Hasher};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::AuthService;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

struct TestApp {
    router: Router,
    repo: Arc<MockAuthRepository>,
    hasher: Arc<CountingHasher<Argon2Hasher>>,
}

fn build_app() -> TestApp {
    let repo = Arc::new(MockAuthRepository::default());
    let hasher = Arc::new(CountingHasher::new(Argon2Hasher::new(1).expect("cost 1 is valid")));
    let svc = AuthService::with_hasher(repo.clone(), hasher.clone());
    let router = routes::build_router(auth::ServerState::new(svc), cors());
    TestApp { router, repo, hasher }
}

async fn post_json(app: &TestApp, uri: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
    post_raw(app, uri, serde_json::to_vec(&body)?).await
}

async fn post_raw(app: &TestApp, uri: &str, body: Vec<u8>) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))?;
    let resp = app.router.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

fn test_user() -> Value {
    json!({"fullname": "Test User", "email": "test@example.com", "password": "password123"})
}

#[tokio::test]
async fn test_register_and_login_flow() -> anyhow::Result<()> {
    let app = build_app();

    let (status, registered) = post_json(&app, "/auth/users", test_user()).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered["email"], "test@example.com");
    assert_eq!(registered["fullname"], "Test User");
    assert!(registered["userId"].is_string());
    assert!(registered.get("password").is_none());
    assert_eq!(registered.as_object().map(|o| o.len()), Some(3));

    let (status, _) = post_json(&app, "/auth/users", test_user()).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, session) = post_json(&app, "/auth/tokens", json!({"email": "test@example.com", "password": "password123"})).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["userId"], registered["userId"]);
    assert_eq!(session["data"]["userId"], registered["userId"]);
    assert_eq!(session["data"]["email"], "test@example.com");
    assert_eq!(session["data"]["fullname"], "Test User");
    assert!(!session.to_string().contains("argon2"));
    assert!(!session.to_string().contains("password"));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_body() -> anyhow::Result<()> {
    let app = build_app();
    post_json(&app, "/auth/users", test_user()).await?;

    let (status, body) = post_json(&app, "/auth/users", json!({"fullname": "Other", "email": "test@example.com", "password": "different-pass"})).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "EmailAlreadyExists");
    assert_eq!(app.repo.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_look_the_same() -> anyhow::Result<()> {
    let app = build_app();
    post_json(&app, "/auth/users", test_user()).await?;

    let (wrong_status, wrong_body) = post_json(&app, "/auth/tokens", json!({"email": "test@example.com", "password": "wrong-password"})).await?;
    let (unknown_status, unknown_body) = post_json(&app, "/auth/tokens", json!({"email": "unknown@x.com", "password": "wrong-password"})).await?;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "InvalidCredentials");
    Ok(())
}

#[tokio::test]
async fn test_invalid_email_rejected_before_hashing() -> anyhow::Result<()> {
    let app = build_app();

    let (status, body) = post_json(&app, "/auth/users", json!({"fullname": "Test User", "email": "not-an-email", "password": "password123"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");
    assert_eq!(body["fields"][0]["field"], "email");
    assert_eq!(app.hasher.hash_calls(), 0);
    assert!(app.repo.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_register_short_password_rejected() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = post_json(&app, "/auth/users", json!({"fullname": "A", "email": "a@example.com", "password": "short"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "password");
    assert_eq!(app.hasher.hash_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_fields_rejected() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = post_json(&app, "/auth/users", json!({"email": "a@example.com"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["fields"].as_array().into_iter().flatten().filter_map(|f| f["field"].as_str()).collect();
    assert_eq!(fields, vec!["fullname", "password"]);

    let (status, _) = post_json(&app, "/auth/tokens", json!({"email": "a@example.com"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.hasher.verify_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_json_is_400() -> anyhow::Result<()> {
    let app = build_app();
    let (status, body) = post_raw(&app, "/auth/users", b"{not json".to_vec()).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "ValidationError");

    let (status, _) = post_json(&app, "/auth/users", json!({"fullname": 5, "email": "a@example.com", "password": "password123"})).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.hasher.hash_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() -> anyhow::Result<()> {
    let app = build_app();
    let (a, b) = tokio::join!(
        post_json(&app, "/auth/users", test_user()),
        post_json(&app, "/auth/users", test_user()),
    );
    let mut statuses = vec![a?.0, b?.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(app.repo.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_datastore_outage_is_500_not_conflict() -> anyhow::Result<()> {
    let app = build_app();
    app.repo.set_unavailable(true);

    let (status, body) = post_json(&app, "/auth/users", test_user()).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "InternalError");

    let (status, _) = post_json(&app, "/auth/tokens", json!({"email": "test@example.com", "password": "password123"})).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn test_health_and_openapi() -> anyhow::Result<()> {
    let app = build_app();
    let req = Request::builder().uri("/health").body(Body::empty())?;
    let resp = app.router.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await?)?;
    assert_eq!(body, json!({"status": "ok"}));

    let req = Request::builder().uri("/api-docs/openapi.json").body(Body::empty())?;
    let resp = app.router.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let doc: Value = serde_json::from_slice(&to_bytes(resp.into_body(), usize::MAX).await?)?;
    let mut paths: Vec<&str> = doc["paths"].as_object().into_iter().flat_map(|p| p.keys().map(String::as_str)).collect();
    paths.sort();
    assert_eq!(paths, vec!["/auth/tokens", "/auth/users", "/health"]);

    // the document is the only docs surface; no UI route is mounted
    let req = Request::builder().uri("/docs").body(Body::empty())?;
    let resp = app.router.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    Ok(())
}
