/// HTTP transport for the demo server.
///
/// Talks to the server with the synchronous `ureq` client:
///
/// - `POST /api/query` — run the selected agents for a query
/// - `GET /api/agents` — list the agents the server offers
/// - `GET /api/health` — liveness plus agent count
///
/// The server reports application errors with a 4xx/5xx status *and* a JSON
/// body (`{"status": "error", "error": "..."}`). Those bodies are decoded
/// and returned as ordinary responses so the page can show the server's
/// message; only unreachable servers and undecodable bodies are errors.
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::{QueryRequest, QueryResponse};
use crate::config::schema::QueryConfig;

/// Sends a query and returns the decoded response.
///
/// Implemented by [`HttpTransport`] for the real server; tests substitute
/// in-memory implementations.
pub trait Transport {
    fn send(&self, request: &QueryRequest) -> Result<QueryResponse>;
}

/// Response body from `GET /api/agents`.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentsResponse {
    pub agents: Vec<String>,
    #[serde(default)]
    pub count: usize,
}

/// Response body from `GET /api/health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub agents_available: Option<usize>,
}

/// Synchronous client for the demo server.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Self {
        Self {
            // "localhost" may resolve to ::1 first while the server binds
            // IPv4 only.
            base_url: base_url
                .trim_end_matches('/')
                .replace("://localhost", "://127.0.0.1"),
            timeout: None,
        }
    }

    /// Build a transport from the resolved config. A `timeout_ms` of `0`
    /// leaves requests without a timeout.
    pub fn from_config(config: &QueryConfig) -> Self {
        let mut transport = Self::new(&config.endpoint);
        if config.timeout_ms > 0 {
            transport.timeout = Some(Duration::from_millis(config.timeout_ms));
        }
        transport
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> ureq::Request {
        let request = ureq::get(&self.url(path));
        match self.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    /// `GET /api/agents`.
    pub fn agents(&self) -> Result<AgentsResponse> {
        let resp = self
            .get("/api/agents")
            .call()
            .context("agent list request failed")?;
        resp.into_json().context("failed to parse agent list")
    }

    /// `GET /api/health`.
    pub fn health(&self) -> Result<HealthResponse> {
        let resp = self
            .get("/api/health")
            .call()
            .context("health request failed")?;
        resp.into_json().context("failed to parse health response")
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let mut req = ureq::post(&self.url("/api/query"));
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        match req.send_json(request) {
            Ok(resp) => resp.into_json().context("failed to parse query response"),
            Err(ureq::Error::Status(code, resp)) => resp
                .into_json()
                .with_context(|| format!("server returned HTTP {code}")),
            Err(err) => Err(err).context("query request failed"),
        }
    }
}
