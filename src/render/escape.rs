//! Text helpers shared by the formatters: HTML escaping, JSON truthiness,
//! and the lenient leading-number parse used for price-change polarity.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Leading float in the style of JavaScript's `parseFloat`: optional
/// whitespace, sign, then `Infinity` or a decimal with optional exponent.
static LEADING_FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?)(Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("leading float regex is valid")
});

/// Neutralize HTML-special characters so text can be placed in element
/// content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a JSON field for markup.
///
/// Strings are escaped; any other value is written as its JSON text. An
/// absent field renders as nothing.
pub fn field_text(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(s)) => escape_html(s),
        Some(other) => other.to_string(),
    }
}

/// JavaScript-style truthiness, used wherever the page falls back with `||`.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Parse the leading number of `text`, ignoring anything after it
/// (`"-2.5%"` → `-2.5`). Returns `None` when no number leads the string.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let caps = LEADING_FLOAT_RE.captures(text)?;
    let negative = &caps[1] == "-";
    let magnitude = match &caps[2] {
        "Infinity" => f64::INFINITY,
        digits => digits.parse::<f64>().ok()?,
    };
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("it's"), "it&#39;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn field_text_passes_non_strings_through() {
        assert_eq!(field_text(Some(&json!("<b>"))), "&lt;b&gt;");
        assert_eq!(field_text(Some(&json!(42.5))), "42.5");
        assert_eq!(field_text(Some(&json!(true))), "true");
        assert_eq!(field_text(None), "");
    }

    #[test]
    fn truthiness_follows_javascript() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&json!(null))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(is_truthy(Some(&json!("N/A"))));
        assert!(is_truthy(Some(&json!(-1.5))));
        assert!(is_truthy(Some(&json!([]))));
    }

    #[test]
    fn leading_float_handles_suffixes_and_signs() {
        assert_eq!(parse_leading_float("-2.5%"), Some(-2.5));
        assert_eq!(parse_leading_float("+1.25%"), Some(1.25));
        assert_eq!(parse_leading_float("  3e2 units"), Some(300.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_leading_float("N/A"), None);
        assert_eq!(parse_leading_float("$-3"), None);
        assert_eq!(parse_leading_float(""), None);
    }
}
