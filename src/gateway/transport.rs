//! API transport abstractions: HTTP and offline.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{FolioError, Result};
use crate::i18n::Locale;

/// Per-request values read from client storage at request time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Sent as `?lang=` on reads.
    pub locale: Locale,
    /// Sent as `Authorization: Bearer` when present.
    pub token: Option<String>,
}

/// Transport layer for the portfolio API.
///
/// Implementations return the raw JSON body; envelope unwrapping is the
/// gateway's job. Every failure is reported as `FolioError::Transport`.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GET `path` with the locale as a query parameter.
    async fn get(&self, path: &str, ctx: &RequestContext) -> Result<Value>;

    /// POST `body` as JSON to `path`.
    async fn post(&self, path: &str, body: &Value, ctx: &RequestContext) -> Result<Value>;

    /// Returns the transport type identifier ("http" or "offline").
    fn transport_type(&self) -> &str;
}

/// HTTP transport backed by reqwest.
pub struct HttpTransport {
    base_url: String,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| FolioError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: reqwest::RequestBuilder, ctx: &RequestContext) -> Result<Value> {
        let request = match &ctx.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FolioError::Transport(format!("HTTP request timed out: {}", e))
            } else {
                FolioError::Transport(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(FolioError::Transport(format!(
                "HTTP {} from API: {}",
                status, body
            )));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| FolioError::Transport(format!("Failed to parse API response: {}", e)))
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str, ctx: &RequestContext) -> Result<Value> {
        let request = self
            .http
            .get(self.url(path))
            .query(&[("lang", ctx.locale.code())]);
        self.send(request, ctx).await
    }

    async fn post(&self, path: &str, body: &Value, ctx: &RequestContext) -> Result<Value> {
        let request = self.http.post(self.url(path)).json(body);
        self.send(request, ctx).await
    }

    fn transport_type(&self) -> &str {
        "http"
    }
}

/// Transport that fails every request, so the gateway serves fixtures only.
pub struct OfflineTransport;

#[async_trait]
impl ApiTransport for OfflineTransport {
    async fn get(&self, path: &str, _ctx: &RequestContext) -> Result<Value> {
        Err(FolioError::Transport(format!("offline: GET {}", path)))
    }

    async fn post(&self, path: &str, _body: &Value, _ctx: &RequestContext) -> Result<Value> {
        Err(FolioError::Transport(format!("offline: POST {}", path)))
    }

    fn transport_type(&self) -> &str {
        "offline"
    }
}
