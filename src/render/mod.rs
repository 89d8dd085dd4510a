//! Result formatter: turns the `/api/query` results map into HTML.
//!
//! Rendering is a pure function of the response. Each agent key is parsed
//! into an [`AgentKind`], which owns the header icon and selects the
//! [`DataFormatter`] for the agent's items. Keys the page doesn't know get a
//! neutral icon and a "not recognized" line instead of an error.

pub mod escape;
pub mod formatters;
mod page;

use serde::Deserialize;
use serde_json::{Map, Value};

pub use escape::escape_html;
pub use formatters::{CryptoFormatter, DataFormatter, NewsFormatter, StockFormatter};
pub use page::render_document;

use escape::{field_text, is_truthy};
use formatters::paragraph;

// ---------------------------------------------------------------------------
// Agent kinds
// ---------------------------------------------------------------------------

/// The agents the demo server knows about, plus a catch-all for anything
/// else the response contains.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AgentKind {
    BbcNews,
    TechCrunch,
    Crypto,
    Stocks,
    Other(String),
}

impl AgentKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "bbc_news" => Self::BbcNews,
            "techcrunch" => Self::TechCrunch,
            "crypto" => Self::Crypto,
            "stocks" => Self::Stocks,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::BbcNews => "bbc_news",
            Self::TechCrunch => "techcrunch",
            Self::Crypto => "crypto",
            Self::Stocks => "stocks",
            Self::Other(key) => key,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::BbcNews => "📰",
            Self::TechCrunch => "💻",
            Self::Crypto => "₿",
            Self::Stocks => "📈",
            Self::Other(_) => "🤖",
        }
    }

    /// Formatter for this agent's items, or `None` for unknown agents.
    pub fn formatter(&self) -> Option<&'static dyn DataFormatter> {
        match self {
            Self::BbcNews | Self::TechCrunch => Some(&NewsFormatter),
            Self::Crypto => Some(&CryptoFormatter),
            Self::Stocks => Some(&StockFormatter),
            Self::Other(_) => None,
        }
    }

    /// Whether this is one of the four agents the demo server ships.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Agent results
// ---------------------------------------------------------------------------

/// One agent's entry in the results map.
///
/// Every field is optional and untyped because the server passes agent
/// output through verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentResult {
    pub agent: Option<Value>,
    pub status: Option<Value>,
    pub message: Option<Value>,
    pub data: Option<Value>,
}

impl AgentResult {
    /// Interpret a raw results-map value.
    ///
    /// A bare array is taken as the data of a successful agent; anything that
    /// isn't an object renders as an agent with unknown status.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Array(items) => Self {
                status: Some(Value::String("success".to_string())),
                data: Some(Value::Array(items.clone())),
                ..Self::default()
            },
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
            _ => Self::default(),
        }
    }

    /// Status text, `"unknown"` when missing or falsy.
    pub fn status_text(&self) -> String {
        match &self.status {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(v) if is_truthy(Some(v)) => v.to_string(),
            _ => "unknown".to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_text() == "success"
    }

    /// Items to format, when `data` is a non-empty array.
    pub fn items(&self) -> Option<&[Value]> {
        match &self.data {
            Some(Value::Array(items)) if !items.is_empty() => Some(items),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render every agent in the results map, in the map's order.
pub fn render_results(results: &Map<String, Value>) -> String {
    results
        .iter()
        .map(|(key, value)| render_agent(key, &AgentResult::from_value(value)))
        .collect()
}

/// Render a single agent block: header with icon, name and status badge,
/// then the error, the formatted data, or a placeholder line.
pub fn render_agent(key: &str, result: &AgentResult) -> String {
    let kind = AgentKind::from_key(key);
    let status = result.status_text();
    let status_class = if result.is_success() {
        "status-success"
    } else {
        "status-error"
    };
    let name = if is_truthy(result.agent.as_ref()) {
        field_text(result.agent.as_ref())
    } else {
        escape_html(key)
    };

    let mut html = String::from("<div class=\"agent-result\">\n");
    html.push_str(&format!(
        "<h3>{} {} <span class=\"status-badge {}\">{}</span></h3>\n",
        kind.icon(),
        name,
        status_class,
        escape_html(&status),
    ));

    if status == "error" {
        let message = if is_truthy(result.message.as_ref()) {
            field_text(result.message.as_ref())
        } else {
            "Unknown error".to_string()
        };
        html.push_str(&format!("<div class=\"error-message\">{message}</div>\n"));
    } else if let Some(items) = result.items() {
        match kind.formatter() {
            Some(formatter) => html.push_str(&formatter.format(items)),
            None => html.push_str(&paragraph("Data format not recognized")),
        }
    } else {
        html.push_str(&paragraph("No data available"));
    }

    html.push_str("</div>\n");
    html
}

/// Render the error panel shown in place of results.
pub fn render_error(message: &str) -> String {
    format!(
        "<div class=\"error-message\"><strong>Error:</strong> {}</div>\n",
        escape_html(message)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn agent_kind_round_trips_keys() {
        for key in ["bbc_news", "techcrunch", "crypto", "stocks", "weather"] {
            assert_eq!(AgentKind::from_key(key).key(), key);
        }
        assert!(AgentKind::from_key("crypto").is_known());
        assert!(!AgentKind::from_key("weather").is_known());
    }

    #[test]
    fn icons_by_kind() {
        assert_eq!(AgentKind::from_key("bbc_news").icon(), "📰");
        assert_eq!(AgentKind::from_key("techcrunch").icon(), "💻");
        assert_eq!(AgentKind::from_key("crypto").icon(), "₿");
        assert_eq!(AgentKind::from_key("stocks").icon(), "📈");
        assert_eq!(AgentKind::from_key("weather").icon(), "🤖");
    }

    #[test]
    fn display_name_falls_back_to_key() {
        let html = render_agent("crypto", &AgentResult::from_value(&json!({"status": "success"})));
        assert!(html.contains("<h3>₿ crypto "));

        let html = render_agent(
            "crypto",
            &AgentResult::from_value(&json!({"agent": "Crypto Agent", "status": "success"})),
        );
        assert!(html.contains("<h3>₿ Crypto Agent "));
    }

    #[test]
    fn error_status_shows_message_or_fallback() {
        let html = render_agent(
            "stocks",
            &AgentResult::from_value(&json!({"status": "error", "message": "API limit"})),
        );
        assert!(html.contains("status-badge status-error\">error</span>"));
        assert!(html.contains("<div class=\"error-message\">API limit</div>"));

        let html = render_agent("stocks", &AgentResult::from_value(&json!({"status": "error"})));
        assert!(html.contains("Unknown error"));
    }

    #[test]
    fn empty_data_shows_placeholder() {
        let html = render_agent(
            "bbc_news",
            &AgentResult::from_value(&json!({"status": "success", "data": []})),
        );
        assert!(html.contains("<p>No data available</p>"));
        assert!(html.contains("status-badge status-success"));
    }

    #[test]
    fn missing_status_is_unknown_and_error_styled() {
        let html = render_agent("bbc_news", &AgentResult::from_value(&json!({})));
        assert!(html.contains("status-badge status-error\">unknown</span>"));
        assert!(html.contains("No data available"));
    }

    #[test]
    fn unknown_agent_with_data_is_not_recognized() {
        let html = render_results(&results(json!({
            "weather": {"status": "success", "data": [{"city": "Oslo"}]}
        })));
        assert!(html.contains("🤖"));
        assert!(html.contains("Data format not recognized"));
    }

    #[test]
    fn bare_array_counts_as_success_data() {
        let html = render_results(&results(json!({
            "crypto": [{"name": "Bitcoin", "symbol": "BTC", "price": "$50,000", "change_24h": "-2.5%"}]
        })));
        assert!(html.contains("<span class=\"negative\">-2.5%</span>"));
    }

    #[test]
    fn results_render_in_map_order() {
        let html = render_results(&results(json!({
            "stocks": {"status": "success", "data": []},
            "bbc_news": {"status": "success", "data": []},
            "crypto": {"status": "success", "data": []}
        })));
        let stocks = html.find("📈").unwrap();
        let news = html.find("📰").unwrap();
        let crypto = html.find("₿").unwrap();
        assert!(stocks < news && news < crypto);
        assert_eq!(html.matches("<div class=\"agent-result\">").count(), 3);
    }

    #[test]
    fn error_panel_escapes_message() {
        let html = render_error("<script>alert(1)</script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
