/// Rendering tests over whole `/api/query` responses.
///
/// Each test feeds a response shaped like the demo server's output through
/// the same path the page and the `render` command use.
use serde_json::{Map, Value, json};

use agentdeck::cli::render_response_text;
use agentdeck::render::{AgentKind, AgentResult, render_agent, render_results};

fn results(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

// ---------------------------------------------------------------------------
// Whole responses
// ---------------------------------------------------------------------------

#[test]
fn mixed_response_renders_every_agent_in_server_order() {
    let map = results(json!({
        "stocks": {"agent": "Stocks", "status": "success", "data": [
            {"symbol": "AAPL", "name": "Apple Inc.", "price": "$189.10", "change": "+1.2%"}
        ]},
        "bbc_news": {"agent": "BBC News", "status": "success", "data": [
            {"title": "Markets rally", "url": "https://bbc.co.uk/news/1"},
            {"title": "Rain expected"}
        ]},
        "crypto": {"agent": "Crypto", "status": "error", "message": "Rate limited"}
    }));

    let html = render_results(&map);

    assert_eq!(count(&html, "<div class=\"agent-result\">"), 3);
    let stocks = html.find("📈 Stocks").unwrap();
    let news = html.find("📰 BBC News").unwrap();
    let crypto = html.find("₿ Crypto").unwrap();
    assert!(stocks < news && news < crypto);

    assert_eq!(count(&html, "<li class=\"data-item\">"), 3);
    assert_eq!(count(&html, "Read more →"), 1);
    assert!(html.contains("<div class=\"error-message\">Rate limited</div>"));
    assert!(html.contains("<span class=\"status-badge status-error\">error</span>"));
}

#[test]
fn negative_crypto_change_is_marked_negative() {
    let map = results(json!({
        "crypto": {"status": "success", "data": [
            {"name": "Bitcoin", "symbol": "BTC", "price": "$64,000", "change_24h": "-2.5%", "market_cap": "$1.2T"}
        ]}
    }));

    let html = render_results(&map);

    assert!(html.contains("<span class=\"negative\">-2.5%</span>"));
    assert!(html.contains("Bitcoin (BTC)"));
    assert!(html.contains("MCap: $1.2T"));
}

#[test]
fn missing_stock_change_reads_na_and_stays_positive() {
    let map = results(json!({
        "stocks": {"status": "success", "data": [
            {"symbol": "MSFT", "name": "Microsoft", "price": "$410.00", "note": "Market closed"}
        ]}
    }));

    let html = render_results(&map);

    assert!(html.contains("<span class=\"positive\">N/A</span>"));
    assert!(html.contains("<div class=\"stock-note\">Market closed</div>"));
}

#[test]
fn markup_in_item_fields_is_escaped() {
    let map = results(json!({
        "techcrunch": {"agent": "TechCrunch", "status": "success", "data": [
            {"title": "<script>alert(1)</script>", "url": "https://example.com/?a=1&b=\"2\""}
        ]}
    }));

    let html = render_results(&map);

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(html.contains("href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));
}

#[test]
fn unknown_agent_gets_neutral_icon_and_placeholder() {
    let map = results(json!({
        "weather": {"agent": "Weather", "status": "success", "data": [{"temp": 21}]}
    }));

    let html = render_results(&map);

    assert!(html.contains("🤖 Weather"));
    assert!(html.contains("<p>Data format not recognized</p>"));
    assert!(!html.contains("data-item"));
}

#[test]
fn bare_array_result_is_treated_as_success_data() {
    let map = results(json!({
        "bbc_news": [{"title": "Headline"}]
    }));

    let html = render_results(&map);

    assert!(html.contains("status-success"));
    assert!(html.contains("<strong>Headline</strong>"));
}

#[test]
fn empty_results_render_nothing() {
    assert_eq!(render_results(&Map::new()), "");
}

// ---------------------------------------------------------------------------
// Single agents
// ---------------------------------------------------------------------------

#[test]
fn agent_name_falls_back_to_key() {
    let result = AgentResult::from_value(&json!({"status": "success"}));
    let html = render_agent("crypto", &result);
    assert!(html.contains("₿ crypto"));
    assert!(html.contains("<p>No data available</p>"));
}

#[test]
fn error_without_message_reads_unknown_error() {
    let result = AgentResult::from_value(&json!({"agent": "Stocks", "status": "error"}));
    let html = render_agent("stocks", &result);
    assert!(html.contains("<div class=\"error-message\">Unknown error</div>"));
}

#[test]
fn known_kinds_all_have_formatters() {
    for key in ["bbc_news", "techcrunch", "crypto", "stocks"] {
        let kind = AgentKind::from_key(key);
        assert!(kind.is_known(), "{key}");
        assert!(kind.formatter().is_some(), "{key}");
        assert_eq!(kind.key(), key);
    }
    assert!(AgentKind::from_key("weather").formatter().is_none());
}

// ---------------------------------------------------------------------------
// Saved responses
// ---------------------------------------------------------------------------

#[test]
fn saved_error_response_renders_error_panel() {
    let html = render_response_text(r#"{"status":"error"}"#).unwrap();
    assert!(html.contains("<strong>Error:</strong> An error occurred"));
}

#[test]
fn saved_success_response_renders_results() {
    let raw = r#"{
        "query": "bitcoin price",
        "status": "success",
        "results": {"crypto": {"agent": "Crypto", "status": "success", "data": []}}
    }"#;
    let html = render_response_text(raw).unwrap();
    assert!(html.contains("₿ Crypto"));
    assert!(html.contains("<p>No data available</p>"));
    assert!(!html.contains("<ul class=\"data-list\">"));
}
