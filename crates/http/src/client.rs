//! JSON HTTP client with timed fetch.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::HttpConfig;
use crate::error::HttpError;

/// Client for the fetch / JSON GET / JSON POST helpers.
#[derive(Clone)]
pub struct JsonClient {
    client: Client,
    config: HttpConfig,
}

impl JsonClient {
    pub fn new(config: HttpConfig) -> Self {
        let client = Client::builder()
            .timeout(config.client_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                Client::new()
            });

        Self { client, config }
    }

    /// Create client from environment variables (see [`HttpConfig::from_env`]).
    pub fn from_env() -> Self {
        Self::new(HttpConfig::from_env())
    }

    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// [`fetch_with_timeout`](Self::fetch_with_timeout) with the configured
    /// `fetch_timeout` (5 seconds unless overridden).
    pub async fn fetch(&self, url: &str) -> Result<Response, HttpError> {
        self.fetch_with_timeout(url, self.config.fetch_timeout).await
    }

    /// Races a GET against a timer.
    ///
    /// Returns the response as-is when it arrives first; the status code is
    /// not interpreted. When the timer wins, the in-flight request is dropped
    /// and [`HttpError::Timeout`] is returned.
    pub async fn fetch_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<Response, HttpError> {
        match tokio::time::timeout(timeout, self.client.get(url).send()).await {
            Ok(result) => result.map_err(|e| self.classify(e)),
            Err(_) => {
                tracing::warn!(
                    url = %url,
                    timeout_ms = timeout.as_millis() as u64,
                    "Fetch timed out"
                );
                Err(HttpError::Timeout(timeout))
            }
        }
    }

    /// GETs `url` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Non-success status, transport failure and undecodable bodies each
    /// map to their own [`HttpError`] variant; all are logged.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let result = self.try_get_json(url).await;
        if let Err(e) = &result {
            tracing::error!(url = %url, error = %e, "Failed to fetch JSON");
        }
        result
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::status(status));
        }

        response.json().await.map_err(|e| self.classify(e))
    }

    /// POSTs `body` as JSON and decodes the JSON response.
    ///
    /// The response status is not checked: an error status with a JSON body
    /// is returned as `Ok`. Only transport and decode failures are errors.
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let result = self.try_post_json(url, body).await;
        if let Err(e) = &result {
            tracing::error!(url = %url, error = %e, "Failed to post JSON");
        }
        result
    }

    async fn try_post_json<B, T>(&self, url: &str, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // `json` sets `Content-Type: application/json`
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        response.json().await.map_err(|e| self.classify(e))
    }

    /// [`get_json`](Self::get_json) collapsed to `None` on any failure.
    pub async fn get_json_opt<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        self.get_json(url).await.ok()
    }

    /// [`post_json`](Self::post_json) collapsed to `None` on any failure.
    pub async fn post_json_opt<B, T>(&self, url: &str, body: &B) -> Option<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_json(url, body).await.ok()
    }

    fn classify(&self, err: reqwest::Error) -> HttpError {
        HttpError::from_reqwest(err, self.config.client_timeout)
    }
}

impl Default for JsonClient {
    fn default() -> Self {
        Self::new(HttpConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::Json;
    use serde::Deserialize;
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "snipkit_http=debug".into()),
            )
            .with_test_writer()
            .try_init();
    }

    async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        Json(json!({ "content_type": content_type, "body": body }))
    }

    async fn spawn_server() -> SocketAddr {
        init_test_tracing();

        let router = axum::Router::new()
            .route("/json", get(|| async { Json(json!({"ok": true, "items": [1, 2]})) }))
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
            .route("/text", get(|| async { "plain text" }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    "late"
                }),
            )
            .route(
                "/teapot",
                get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }),
            )
            .route("/echo", post(echo))
            .route(
                "/reject",
                post(|| async {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({"error": "bad input"})),
                    )
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    async fn closed_port() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Listing {
        ok: bool,
        items: Vec<u32>,
    }

    #[tokio::test]
    async fn test_fetch_returns_response_without_checking_status() {
        let addr = spawn_server().await;
        let client = JsonClient::default();

        let response = client.fetch(&format!("http://{}/teapot", addr)).await.unwrap();
        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        assert_eq!(response.text().await.unwrap(), "short and stout");
    }

    #[tokio::test]
    async fn test_fetch_with_timeout_times_out() {
        let addr = spawn_server().await;
        let client = JsonClient::default();

        let err = client
            .fetch_with_timeout(&format!("http://{}/slow", addr), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(matches!(err, HttpError::Timeout(d) if d == Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_fetch_uses_configured_timeout() {
        let addr = spawn_server().await;
        let client =
            JsonClient::new(HttpConfig::default().with_fetch_timeout(Duration::from_millis(30)));

        let err = client.fetch(&format!("http://{}/slow", addr)).await.unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let addr = spawn_server().await;
        let client = JsonClient::default();
        let url = format!("http://{}/json", addr);

        let value: Value = client.get_json(&url).await.unwrap();
        assert_eq!(value, json!({"ok": true, "items": [1, 2]}));

        let typed: Listing = client.get_json(&url).await.unwrap();
        assert_eq!(
            typed,
            Listing {
                ok: true,
                items: vec![1, 2]
            }
        );
    }

    #[tokio::test]
    async fn test_get_json_non_success_status() {
        let addr = spawn_server().await;
        let client = JsonClient::default();

        let err = client
            .get_json::<Value>(&format!("http://{}/missing", addr))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_get_json_decode_failure() {
        let addr = spawn_server().await;
        let client = JsonClient::default();

        let err = client
            .get_json::<Value>(&format!("http://{}/text", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Decode(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_get_json_transport_failure() {
        let addr = closed_port().await;
        let client = JsonClient::default();

        let err = client
            .get_json::<Value>(&format!("http://{}/json", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, HttpError::Transport(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_get_json_invalid_url() {
        let client = JsonClient::default();
        let err = client.get_json::<Value>("not a url").await.unwrap_err();
        assert!(matches!(err, HttpError::InvalidRequest(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_get_json_opt_collapses_failures() {
        let addr = spawn_server().await;
        let client = JsonClient::default();

        let found: Option<Value> = client.get_json_opt(&format!("http://{}/json", addr)).await;
        assert!(found.is_some());
        let missing: Option<Value> = client
            .get_json_opt(&format!("http://{}/missing", addr))
            .await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_post_json_sends_json_content_type() {
        let addr = spawn_server().await;
        let client = JsonClient::default();

        let reply: Value = client
            .post_json(&format!("http://{}/echo", addr), &json!({"name": "crab"}))
            .await
            .unwrap();
        assert_eq!(reply["content_type"], json!("application/json"));
        assert_eq!(reply["body"], json!({"name": "crab"}));
    }

    #[tokio::test]
    async fn test_post_json_does_not_check_status() {
        let addr = spawn_server().await;
        let client = JsonClient::default();

        let reply: Value = client
            .post_json(&format!("http://{}/reject", addr), &json!({}))
            .await
            .unwrap();
        assert_eq!(reply, json!({"error": "bad input"}));
    }

    #[tokio::test]
    async fn test_post_json_transport_failure() {
        let addr = closed_port().await;
        let client = JsonClient::default();

        let reply: Option<Value> = client
            .post_json_opt(&format!("http://{}/echo", addr), &json!({"a": 1}))
            .await;
        assert!(reply.is_none());
    }
}
