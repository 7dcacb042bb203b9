#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use dealership::db::repository::FullRepository;
use dealership::db::seed::{seed_defaults, DEFAULT_ADMIN_PASSWORD};
use dealership::db::LocalRepository;
use dealership::http::{create_router, AppState};
use dealership::services::TokenService;

static ENV_LOCK: Mutex<()> = Mutex::new(());

pub const TEST_SECRET: &str = "integration-test-secret";

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment so parallel tests do not observe each other's changes.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Fresh repository with the demo catalog and the admin user.
pub async fn seeded_repo() -> LocalRepository {
    let repo = LocalRepository::new();
    seed_defaults(&repo, DEFAULT_ADMIN_PASSWORD)
        .await
        .expect("seeding should succeed");
    repo
}

/// Router over a seeded repository. The repository handle shares its data
/// with the router, so tests can inspect the store directly.
pub async fn test_app() -> (Router, LocalRepository) {
    let repo = seeded_repo().await;
    let shared: Arc<dyn FullRepository> = Arc::new(repo.clone());
    let state = AppState::new(shared, TokenService::new(TEST_SECRET, 1).unwrap());
    (create_router(state), repo)
}

/// Send one request and decode the JSON response (`Value::Null` when empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Log in as the seeded admin and return the bearer token.
pub async fn admin_token(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(serde_json::json!({"username": "admin", "password": DEFAULT_ADMIN_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "login failed: {}", body);
    body["access_token"]
        .as_str()
        .expect("access_token in login response")
        .to_string()
}
