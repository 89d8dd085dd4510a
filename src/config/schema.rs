/// Configuration schema and defaults for agentdeck.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[query]`, `[copy]`, `[nav]`, and `[logging]`.
///
/// Every field has a sensible built-in default. Users only need to set the
/// values they want to override.
use serde::{Deserialize, Serialize};

use crate::copy::CopyPolicy;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level agentdeck configuration.
///
/// Maps directly to the `~/.agentdeck/config.toml` and `.agentdeck.toml`
/// file schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub query: QueryConfig,
    pub copy: CopyConfig,
    pub nav: NavConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [query]
// ---------------------------------------------------------------------------

/// Settings for the query submitter and its HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Base URL of the demo server. `/api/query` is appended.
    pub endpoint: String,
    /// Request timeout in milliseconds. `0` disables the timeout.
    pub timeout_ms: u64,
    /// Agents checked by default when the CLI gets no `--agent` flag.
    pub agents: Vec<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5001".to_string(),
            timeout_ms: 0,
            agents: vec![
                "bbc_news".to_string(),
                "techcrunch".to_string(),
                "crypto".to_string(),
                "stocks".to_string(),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// [copy]
// ---------------------------------------------------------------------------

/// Settings for the code copy helper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Which code blocks receive a copy control: `broad` or `narrow`.
    pub policy: CopyPolicy,
    /// How long "Copied!" / "Failed to copy" stays on the control.
    pub feedback_ms: u64,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            policy: CopyPolicy::default(),
            feedback_ms: 2000,
        }
    }
}

// ---------------------------------------------------------------------------
// [nav]
// ---------------------------------------------------------------------------

/// Settings for the menu collapser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Path of the persisted section state. `~` is expanded.
    pub state_path: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            state_path: "~/.agentdeck/nav-state.json".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Diagnostic log settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether diagnostic events are written at all.
    pub enabled: bool,
    /// Path to the log file. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.agentdeck/agentdeck.log".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl DeckConfig {
    /// Annotated default config written by `agentdeck config init`.
    pub fn default_toml() -> String {
        r#"# agentdeck configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (AGENTDECK_*)
#   2. Project config (.agentdeck.toml in current directory)
#   3. User global config (~/.agentdeck/config.toml)
#   4. Built-in defaults

[query]
endpoint = "http://127.0.0.1:5001"
timeout_ms = 0   # 0 = wait for the server indefinitely
agents = ["bbc_news", "techcrunch", "crypto", "stocks"]

[copy]
policy = "broad"   # broad | narrow (only "Terminal" blocks)
feedback_ms = 2000

[nav]
state_path = "~/.agentdeck/nav-state.json"

[logging]
enabled = true
path = "~/.agentdeck/agentdeck.log"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
