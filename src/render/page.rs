//! Standalone page wrapper for rendered fragments.
//!
//! The demo site's own stylesheet isn't available outside the browser, so
//! `--page` output carries a compact copy of the classes the formatters use.

use super::escape::escape_html;

const PAGE_HEAD: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{TITLE}}</title>
<style>
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; margin: 2rem; color: #222; }
.agent-result { border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
.status-badge { font-size: 0.75em; padding: 2px 8px; border-radius: 10px; margin-left: 6px; }
.status-success { background: #d4edda; color: #155724; }
.status-error { background: #f8d7da; color: #721c24; }
.error-message { background: #fdecea; color: #a61b1b; padding: 0.75rem; border-radius: 6px; }
.data-list { list-style: none; padding: 0; }
.data-item { padding: 0.5rem 0; border-bottom: 1px solid #eee; }
.crypto-item, .stock-item { display: flex; gap: 1rem; flex-wrap: wrap; }
.positive { color: #1a7f37; }
.negative { color: #cf222e; }
.market-cap, .stock-note { font-size: 0.9em; color: #666; }
.stock-note { margin-top: 5px; }
</style>
</head>
<body>
<section id="resultsSection">
<div id="resultsContainer">
"##;

const PAGE_TAIL: &str = "</div>\n</section>\n</body>\n</html>\n";

/// Wrap a rendered fragment in a self-contained HTML document.
pub fn render_document(title: &str, fragment: &str) -> String {
    let mut html = PAGE_HEAD.replace("{{TITLE}}", &escape_html(title));
    html.push_str(fragment);
    html.push_str(PAGE_TAIL);
    html
}
