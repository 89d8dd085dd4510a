use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::escape::{escape_html, field_text, is_truthy, parse_leading_float};

/// Placeholder shown when a change or market cap is missing.
const NOT_AVAILABLE: &str = "N/A";

/// Trait for agent data formatters.
///
/// Each formatter understands the item shape of one family of agents and
/// renders a whole `data` sequence as an ordered list, one `<li>` per item
/// in input order.
pub trait DataFormatter {
    fn name(&self) -> &'static str;

    /// Render a single item as the inner markup of its `<li>`.
    fn format_item(&self, item: &Value) -> String;

    fn format(&self, items: &[Value]) -> String {
        let mut html = String::from("<ul class=\"data-list\">\n");
        for item in items {
            html.push_str("<li class=\"data-item\">");
            html.push_str(&self.format_item(item));
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
        html
    }
}

/// Decode an item leniently: a value that isn't an object of the expected
/// shape renders with every field absent.
fn decode<T: DeserializeOwned + Default>(item: &Value) -> T {
    serde_json::from_value(item.clone()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Price change polarity
// ---------------------------------------------------------------------------

/// CSS class for a price change: `negative` only when the value parses to a
/// number below zero. The literal `"N/A"` and unparsable text stay positive.
pub fn change_class(change: &Value) -> &'static str {
    let number = match change {
        Value::String(s) if s == NOT_AVAILABLE => None,
        Value::String(s) => parse_leading_float(s),
        Value::Number(n) => n.as_f64(),
        other => parse_leading_float(&other.to_string()),
    };
    match number {
        Some(n) if n < 0.0 => "negative",
        _ => "positive",
    }
}

/// The change field with the `"N/A"` fallback applied to falsy values.
fn change_or_na(change: Option<&Value>) -> Value {
    match change {
        Some(v) if is_truthy(Some(v)) => v.clone(),
        _ => Value::String(NOT_AVAILABLE.to_string()),
    }
}

// ---------------------------------------------------------------------------
// News (bbc_news, techcrunch)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct NewsItem {
    pub title: Option<Value>,
    pub url: Option<Value>,
}

/// Headline list with an optional "Read more" link per article.
pub struct NewsFormatter;

impl DataFormatter for NewsFormatter {
    fn name(&self) -> &'static str {
        "news"
    }

    fn format_item(&self, item: &Value) -> String {
        let article: NewsItem = decode(item);
        let mut html = format!("<strong>{}</strong>", field_text(article.title.as_ref()));
        if is_truthy(article.url.as_ref()) {
            html.push_str(&format!(
                " <a href=\"{}\" target=\"_blank\">Read more →</a>",
                field_text(article.url.as_ref())
            ));
        }
        html
    }
}

// ---------------------------------------------------------------------------
// Crypto
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CryptoItem {
    pub name: Option<Value>,
    pub symbol: Option<Value>,
    pub price: Option<Value>,
    pub change_24h: Option<Value>,
    pub market_cap: Option<Value>,
}

/// Coin rows: name and symbol, price, colored 24h change, market cap.
pub struct CryptoFormatter;

impl DataFormatter for CryptoFormatter {
    fn name(&self) -> &'static str {
        "crypto"
    }

    fn format_item(&self, item: &Value) -> String {
        let coin: CryptoItem = decode(item);
        let change = change_or_na(coin.change_24h.as_ref());
        let market_cap = match coin.market_cap {
            Some(ref v) if is_truthy(Some(v)) => field_text(Some(v)),
            _ => NOT_AVAILABLE.to_string(),
        };

        format!(
            "<div class=\"crypto-item\">\
             <span><strong>{} ({})</strong></span>\
             <span>{}</span>\
             <span class=\"{}\">{}</span>\
             <span class=\"market-cap\">MCap: {}</span>\
             </div>",
            field_text(coin.name.as_ref()),
            field_text(coin.symbol.as_ref()),
            field_text(coin.price.as_ref()),
            change_class(&change),
            field_text(Some(&change)),
            market_cap,
        )
    }
}

// ---------------------------------------------------------------------------
// Stocks
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct StockItem {
    pub symbol: Option<Value>,
    pub name: Option<Value>,
    pub price: Option<Value>,
    pub change: Option<Value>,
    pub note: Option<Value>,
}

/// Ticker rows: symbol and name, price, colored change, optional note.
pub struct StockFormatter;

impl DataFormatter for StockFormatter {
    fn name(&self) -> &'static str {
        "stocks"
    }

    fn format_item(&self, item: &Value) -> String {
        let stock: StockItem = decode(item);
        let change = change_or_na(stock.change.as_ref());

        let mut html = format!(
            "<div class=\"stock-item\">\
             <span><strong>{}</strong> - {}</span>\
             <span>{}</span>\
             <span class=\"{}\">{}</span>\
             </div>",
            field_text(stock.symbol.as_ref()),
            field_text(stock.name.as_ref()),
            field_text(stock.price.as_ref()),
            change_class(&change),
            field_text(Some(&change)),
        );
        if is_truthy(stock.note.as_ref()) {
            html.push_str(&format!(
                "<div class=\"stock-note\">{}</div>",
                field_text(stock.note.as_ref())
            ));
        }
        html
    }
}

/// Escaped plain paragraph, used for the fixed status lines.
pub(super) fn paragraph(text: &str) -> String {
    format!("<p>{}</p>\n", escape_html(text))
}
