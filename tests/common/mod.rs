#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use classroom_api::config::AppConfig;
use classroom_api::database::Database;
use classroom_api::routes::app_with_config;
use classroom_api::AppState;

/// In-process application bound to the database named by DATABASE_URL
pub struct TestApp {
    pub db: Database,
    router: Router,
}

/// Connects and applies the schema, or returns None when no database is configured.
pub async fn setup() -> Result<Option<TestApp>> {
    let _ = dotenvy::dotenv();
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return Ok(None);
    };

    let config = AppConfig::development();
    let db = Database::connect(&url, &config.database)
        .await
        .context("failed to connect to test database")?;
    db.migrate().await.context("failed to apply schema")?;

    let router = app_with_config(AppState::new(db.clone()), &config);
    Ok(Some(TestApp { db, router }))
}

impl TestApp {
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
        send(self.router(), method, uri, body).await
    }

    pub async fn get(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Result<(StatusCode, Value)> {
        self.request(Method::DELETE, uri, None).await
    }

    /// Create a user and return its id
    pub async fn create_user(&self, first_name: &str) -> Result<i64> {
        let (status, body) = self
            .post("/users", serde_json::json!({ "first_name": first_name, "last_name": "Tester" }))
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "create user failed: {} {}", status, body);
        body["data"]["id"].as_i64().context("created user has no id")
    }
}

pub async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = router.oneshot(builder.body(body)?).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

/// Letters-only name that is unique per call, for fields validated as alphabetic
pub fn unique_name(prefix: &str) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(12)
        .map(|c| match c.to_digit(16) {
            Some(d) => (b'A' + d as u8) as char,
            None => c,
        })
        .collect();
    format!("{}{}", prefix.to_uppercase(), suffix)
}

/// Digits-only value that is unique per call
pub fn unique_phone() -> String {
    let n = Uuid::new_v4().as_u128() % 10_000_000_000;
    format!("9{:010}", n)
}
