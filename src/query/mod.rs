//! Query submitter for the agent demo page.
//!
//! Reads the query text and checked agents from a [`DemoPage`], sends one
//! `POST /api/query` through a [`Transport`], and renders either the agent
//! results or an error panel into the page's results section.
//!
//! Submissions are tracked with a [`CancelToken`]: starting a new
//! submission invalidates the previous one, so a late response can never
//! overwrite newer results.

pub mod page;
pub mod transport;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use page::{
    AgentCheckbox, CancelToken, DemoPage, KeyPress, Outcome, ResultsSection, SubmitControl,
    Submission,
};
pub use transport::{AgentsResponse, HealthResponse, HttpTransport, Transport};

/// Fallback panel text when the server reports a failure without a message.
pub const GENERIC_SERVER_ERROR: &str = "An error occurred";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub agents: Vec<String>,
}

/// Response body from `POST /api/query`.
///
/// `results` keeps the server's key order, which is the order agents are
/// rendered in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub results: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl QueryResponse {
    /// A successful response carrying `results`.
    pub fn success(results: Map<String, Value>) -> Self {
        Self {
            status: "success".to_string(),
            results,
            ..Self::default()
        }
    }

    /// An application-level failure with an optional message.
    pub fn failure(error: Option<&str>) -> Self {
        Self {
            status: "error".to_string(),
            error: error.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// The server's error text, or the generic fallback.
    pub fn error_message(&self) -> &str {
        match self.error.as_deref() {
            Some(msg) if !msg.is_empty() => msg,
            _ => GENERIC_SERVER_ERROR,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation notices
// ---------------------------------------------------------------------------

/// Blocking notices raised before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    EmptyQuery,
    NoAgents,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyQuery => write!(f, "Please enter a query"),
            Self::NoAgents => write!(f, "Please select at least one agent"),
        }
    }
}

impl std::error::Error for Notice {}
