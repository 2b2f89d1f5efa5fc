//! Minimal markdown-to-HTML conversion for generated page bodies.
//!
//! Covers only what the content pipeline emits: `#`/`##`/`###` headers,
//! bold, italic, inline links, blank-line paragraph breaks and pipe-table
//! rows. Input is trusted pipeline output and is not escaped.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static H3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^### (.*)$").expect("valid regex"));
static H2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^## (.*)$").expect("valid regex"));
static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^# (.*)$").expect("valid regex"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));
static TABLE_ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\|(.+)\|").expect("valid regex"));

/// Render `content` to an HTML fragment. Empty input renders to `""`.
pub fn render_markdown(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let html = H3_RE.replace_all(content, "<h3>$1</h3>");
    let html = H2_RE.replace_all(&html, "<h2>$1</h2>");
    let html = H1_RE.replace_all(&html, "<h1>$1</h1>");
    let html = BOLD_RE.replace_all(&html, "<strong>$1</strong>");
    let html = ITALIC_RE.replace_all(&html, "<em>$1</em>");
    let html = LINK_RE.replace_all(&html, r#"<a href="$2">$1</a>"#);
    let html = html.replace("\n\n", "</p><p>");
    let html = TABLE_ROW_RE.replace_all(&html, |caps: &Captures<'_>| table_row(&caps[0]));

    if html.starts_with("<h1>") || html.starts_with("<h2>") {
        html.into_owned()
    } else {
        format!("<p>{html}</p>")
    }
}

fn table_row(row: &str) -> String {
    let cells: String = row
        .split('|')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("<td>{c}</td>"))
        .collect();
    format!("<tr>{cells}</tr>")
}
