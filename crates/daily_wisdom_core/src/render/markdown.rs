//! Markdown rendering adapter.
//!
//! # Responsibility
//! - Render article markdown to display HTML via `pulldown-cmark`.
//! - Derive a short plain-text preview for list/notification surfaces.
//!
//! # Invariants
//! - Raw HTML embedded in markdown is escaped, never passed through.
//! - Links with script-capable schemes are neutralised to `#`.

use once_cell::sync::Lazy;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;
const UNSAFE_URL_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static LIST_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*(?:[-+]|\d+[.)])\s+").expect("valid list marker regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Renders markdown to sanitized HTML.
pub fn render_markdown_html(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(content, options).map(sanitize_event);
    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: neutralise_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: neutralise_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn neutralise_url(url: CowStr<'_>) -> CowStr<'_> {
    let lowered = url.trim().to_ascii_lowercase();
    if UNSAFE_URL_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
    {
        CowStr::Borrowed("#")
    } else {
        url
    }
}

/// Derives a plain-text preview of at most 100 chars.
///
/// Returns `None` when nothing readable remains after stripping markup.
pub fn derive_preview(content: &str) -> Option<String> {
    let without_links = MARKDOWN_LINK_RE.replace_all(content, "$1");
    let without_markers = LIST_MARKER_RE.replace_all(&without_links, " ");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_markers, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{derive_preview, render_markdown_html};

    #[test]
    fn renders_emphasis_and_paragraphs() {
        let html = render_markdown_html("**Bold** and *soft*\n\nSecond");
        assert!(html.contains("<strong>Bold</strong>"));
        assert!(html.contains("<em>soft</em>"));
        assert_eq!(html.matches("<p>").count(), 2);
    }

    #[test]
    fn renders_parenthesis_ordered_lists() {
        let html = render_markdown_html("1) first\n2) second");
        assert!(html.contains("<ol>"));
        assert!(html.contains("<li>second</li>"));
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_markdown_html("<script>alert(1)</script>\n\ntext <b>x</b>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn script_links_are_neutralised() {
        let html = render_markdown_html("[click](javascript:alert(1)) [ok](https://example.com)");
        assert!(!html.contains("javascript:"));
        assert!(html.contains("href=\"#\""));
        assert!(html.contains("href=\"https://example.com\""));
    }

    #[test]
    fn preview_strips_markup_and_limits_length() {
        let preview = derive_preview("# Title\n\n- [link](https://x.io)\n**bold** `code`")
            .expect("preview should exist");
        assert_eq!(preview, "Title link bold code");

        let long = "word ".repeat(60);
        assert_eq!(derive_preview(&long).unwrap().chars().count(), 100);
        assert_eq!(derive_preview("** __ ##"), None);
    }
}
