use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// `--url`, then CLASSROOM_API_URL, then the local default
pub fn resolve_base_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("CLASSROOM_API_URL").ok())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

pub fn timeout_from_env() -> Duration {
    let ms = std::env::var("CLASSROOM_API_TIMEOUT_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    Duration::from_millis(ms)
}

/// One HTTP client shared by every command
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url).with_context(|| format!("invalid API URL '{}'", base_url))?;
        // Url::join replaces the last segment unless the base ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    pub fn url(&self, path: &str) -> anyhow::Result<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Value>) -> anyhow::Result<Value> {
        self.request(Method::POST, path, body).await
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<Value> {
        self.request(Method::DELETE, path, None).await
    }

    async fn request(&self, method: Method, path: &str, body: Option<Value>) -> anyhow::Result<Value> {
        let url = self.url(path)?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;

        let status = response.status();
        let text = response.text().await?;
        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status.is_success() {
            Ok(value)
        } else {
            Err(error_from(status, &value))
        }
    }
}

fn error_from(status: StatusCode, body: &Value) -> anyhow::Error {
    match body.get("message").and_then(Value::as_str) {
        Some(message) => anyhow!("{} ({})", message, status),
        None => anyhow!("request failed with {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_paths_onto_base() {
        let client = ApiClient::new("http://localhost:8000", Duration::from_millis(10)).unwrap();
        assert_eq!(client.url("users").unwrap().as_str(), "http://localhost:8000/users");
        assert_eq!(
            client.url("/users/restore?id=3").unwrap().as_str(),
            "http://localhost:8000/users/restore?id=3"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let client = ApiClient::new("http://host/api", Duration::from_millis(10)).unwrap();
        assert_eq!(client.url("subjects").unwrap().as_str(), "http://host/api/subjects");
    }

    #[test]
    fn rejects_invalid_base() {
        assert!(ApiClient::new("not a url", Duration::from_millis(10)).is_err());
    }

    #[test]
    fn flag_wins_over_default() {
        assert_eq!(resolve_base_url(Some("http://x:1".to_string())), "http://x:1");
    }

    #[test]
    fn server_message_is_surfaced() {
        let err = error_from(StatusCode::NOT_FOUND, &json!({"error": true, "message": "User not found!"}));
        assert!(err.to_string().starts_with("User not found!"));
        let err = error_from(StatusCode::BAD_GATEWAY, &Value::Null);
        assert!(err.to_string().contains("502"));
    }
}
