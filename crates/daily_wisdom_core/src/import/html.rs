//! Saved article page to markdown conversion.
//!
//! # Responsibility
//! - Extract title, author and body from one article HTML page.
//! - Emit body blocks as the markdown subset the reader renders.
//!
//! # Invariants
//! - Footer content and `<script>`/`<style>` bodies never reach the output.
//! - Blocks keep document order and are joined by one blank line.
//! - Inline whitespace is collapsed; list items stay one per line.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static TAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*)>|<!--.*?-->|<![^>]*>"#)
        .expect("valid tag regex")
});
static CLASS_ATTR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).expect("valid class regex")
});
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid entity regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const NO_SPACE_AFTER_MARKER: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}'];

/// Fields extracted from one page. Any of them may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedArticle {
    pub title: String,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    None,
    Title,
    Author,
    Paragraph,
    Heading,
    ListItem,
    Term,
    Definition,
}

impl Capture {
    fn allows_emphasis(self) -> bool {
        !matches!(self, Self::None | Self::Title | Self::Author)
    }
}

#[derive(Debug, Default)]
struct ListFrame {
    ordered: bool,
    counter: usize,
    lines: Vec<String>,
}

#[derive(Debug)]
struct PageParser {
    title: String,
    author: String,
    blocks: Vec<String>,
    current: String,
    capture: Capture,
    lists: Vec<ListFrame>,
    footer_depth: usize,
    skip_depth: usize,
    trim_next: bool,
    after_marker: bool,
}

/// Converts one saved article page into its extracted fields.
pub fn parse_article_html(html: &str) -> ImportedArticle {
    let mut parser = PageParser::new();
    let mut cursor = 0;
    for caps in TAG_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        parser.text(&html[cursor..whole.start()]);
        cursor = whole.end();
        if let Some(name) = caps.get(2) {
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let attrs = caps.get(3).map_or("", |m| m.as_str());
            let name = name.as_str().to_ascii_lowercase();
            if closing {
                parser.end_tag(&name);
            } else {
                parser.start_tag(&name, attrs);
            }
        }
    }
    parser.text(&html[cursor..]);
    parser.finish()
}

impl PageParser {
    fn new() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            blocks: Vec::new(),
            current: String::new(),
            capture: Capture::None,
            lists: Vec::new(),
            footer_depth: 0,
            skip_depth: 0,
            trim_next: false,
            after_marker: false,
        }
    }

    fn in_footer(&self) -> bool {
        self.footer_depth > 0
    }

    fn begin(&mut self, capture: Capture) {
        self.current.clear();
        self.capture = capture;
        self.trim_next = false;
        self.after_marker = false;
    }

    fn take_current(&mut self) -> String {
        let text = collapse(&self.current);
        self.current.clear();
        self.capture = Capture::None;
        text
    }

    fn push_block(&mut self, block: String) {
        if !block.is_empty() && !self.in_footer() {
            self.blocks.push(block);
        }
    }

    fn start_tag(&mut self, name: &str, attrs: &str) {
        if self.skip_depth > 0 && !matches!(name, "script" | "style") {
            return;
        }
        match name {
            "script" | "style" => self.skip_depth += 1,
            "footer" => {
                self.flush_open_block();
                self.footer_depth += 1;
            }
            "h1" | "h2" if self.title.is_empty() => self.begin(Capture::Title),
            "h2" | "h3" | "h4" | "h5" | "h6" => self.begin(Capture::Heading),
            "p" if has_class(attrs, "author") => self.begin(Capture::Author),
            "p" => self.begin(Capture::Paragraph),
            "ul" | "ol" => {
                if self.capture == Capture::ListItem {
                    let pending = self.take_current();
                    self.push_list_line(pending);
                }
                self.lists.push(ListFrame {
                    ordered: name == "ol",
                    ..ListFrame::default()
                });
            }
            "li" => self.begin(Capture::ListItem),
            "dt" => self.begin(Capture::Term),
            "dd" => self.begin(Capture::Definition),
            "br" => self.current.push(' '),
            "em" | "i" => self.open_marker("*"),
            "strong" | "b" if self.capture != Capture::Term => self.open_marker("**"),
            _ => {}
        }
    }

    fn end_tag(&mut self, name: &str) {
        if self.skip_depth > 0 && !matches!(name, "script" | "style") {
            return;
        }
        match name {
            "script" | "style" => self.skip_depth = self.skip_depth.saturating_sub(1),
            "footer" => self.footer_depth = self.footer_depth.saturating_sub(1),
            "h1" | "h2" if self.capture == Capture::Title => {
                self.title = self.take_current();
            }
            "h2" | "h3" | "h4" | "h5" | "h6" if self.capture == Capture::Heading => {
                let text = self.take_current();
                self.push_block(bold(&text));
            }
            "p" if self.capture == Capture::Author => {
                let text = self.take_current();
                if !self.in_footer() {
                    self.author = strip_by_prefix(&text).to_string();
                }
            }
            "p" if self.capture == Capture::Paragraph => {
                let text = self.take_current();
                self.push_block(text);
            }
            "li" if self.capture == Capture::ListItem => {
                let text = self.take_current();
                self.push_list_line(text);
            }
            "ul" | "ol" => {
                let Some(frame) = self.lists.pop() else {
                    return;
                };
                if frame.lines.is_empty() {
                    return;
                }
                match self.lists.last_mut() {
                    Some(outer) => outer
                        .lines
                        .extend(frame.lines.into_iter().map(|line| format!("  {line}"))),
                    None => {
                        let block = frame.lines.join("\n");
                        self.push_block(block);
                    }
                }
            }
            "dt" if self.capture == Capture::Term => {
                let text = self.take_current();
                self.push_block(bold(&text));
            }
            "dd" if self.capture == Capture::Definition => {
                let text = self.take_current();
                self.push_block(text);
            }
            "em" | "i" => self.close_marker("*"),
            "strong" | "b" if self.capture != Capture::Term => self.close_marker("**"),
            _ => {}
        }
    }

    fn text(&mut self, raw: &str) {
        if raw.is_empty() || self.skip_depth > 0 || self.capture == Capture::None {
            return;
        }
        let decoded = decode_entities(raw);
        let mut data = decoded.as_str();
        if self.trim_next {
            data = data.trim_start();
            if data.is_empty() {
                return;
            }
            self.trim_next = false;
        }
        if self.after_marker {
            if let Some(first) = data.chars().next() {
                if !first.is_whitespace() && !NO_SPACE_AFTER_MARKER.contains(&first) {
                    self.current.push(' ');
                }
                self.after_marker = false;
            }
        }
        self.current.push_str(data);
    }

    fn open_marker(&mut self, marker: &str) {
        if !self.capture.allows_emphasis() {
            return;
        }
        if self.current.chars().last().is_some_and(|c| !c.is_whitespace()) {
            self.current.push(' ');
        }
        self.current.push_str(marker);
        self.trim_next = true;
        self.after_marker = false;
    }

    fn close_marker(&mut self, marker: &str) {
        if !self.capture.allows_emphasis() {
            return;
        }
        let trailing_ws = self.current.len() - self.current.trim_end().len();
        self.current.truncate(self.current.len() - trailing_ws);
        self.current.push_str(marker);
        if trailing_ws > 0 {
            self.current.push(' ');
        }
        self.trim_next = false;
        self.after_marker = trailing_ws == 0;
    }

    fn push_list_line(&mut self, text: String) {
        if text.is_empty() || self.in_footer() {
            return;
        }
        let Some(frame) = self.lists.last_mut() else {
            self.blocks.push(format!("- {text}"));
            return;
        };
        if frame.ordered {
            frame.counter += 1;
            frame.lines.push(format!("{}) {text}", frame.counter));
        } else {
            frame.lines.push(format!("- {text}"));
        }
    }

    fn flush_open_block(&mut self) {
        match self.capture {
            Capture::Paragraph | Capture::Definition => {
                let text = self.take_current();
                self.push_block(text);
            }
            Capture::Term | Capture::Heading => {
                let text = self.take_current();
                self.push_block(bold(&text));
            }
            _ => {}
        }
    }

    fn finish(mut self) -> ImportedArticle {
        self.flush_open_block();
        ImportedArticle {
            title: self.title,
            author: self.author,
            content: self.blocks.join("\n\n"),
        }
    }
}

fn bold(text: &str) -> String {
    if text.is_empty() {
        String::new()
    } else {
        format!("**{text}**")
    }
}

fn collapse(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").trim().to_string()
}

fn strip_by_prefix(text: &str) -> &str {
    match text.get(..3) {
        Some(prefix) if prefix.eq_ignore_ascii_case("by ") => text[3..].trim(),
        _ => text,
    }
}

fn has_class(attrs: &str, wanted: &str) -> bool {
    CLASS_ATTR_RE.captures(attrs).is_some_and(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .is_some_and(|m| m.as_str().split_whitespace().any(|c| c == wanted))
    })
}

/// Decodes the HTML entities that appear in article pages.
pub fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let body = &caps[1];
            let decoded = match body {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "amp" => Some('&'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                "rsquo" | "lsquo" => Some('\''),
                "rdquo" | "ldquo" => Some('"'),
                "mdash" => Some('\u{2014}'),
                "ndash" => Some('\u{2013}'),
                "hellip" => Some('\u{2026}'),
                _ => numeric_entity(body),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

fn numeric_entity(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::{decode_entities, parse_article_html};

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>ignored</title><style>p { color: red; }</style></head>
<body><article>
  <h1>Quantify</h1>
  <p class="author">By Keith Braithwaite</p>
  <p>"Fast" is not a
     requirement. <em>Numbers</em> are.</p>
  <h3>How</h3>
  <ul><li>Ask for <strong>ranges</strong></li><li>Ask for percentiles</li></ul>
  <ol><li>first</li><li>second</li></ol>
  <dl><dt>Latency</dt><dd>Time to answer.</dd></dl>
  <footer><p>Licensed content</p><ul><li>nav</li></ul></footer>
</article>
<script>var p = "<p>not content</p>";</script>
</body></html>"#;

    #[test]
    fn extracts_title_author_and_blocks() {
        let article = parse_article_html(PAGE);
        assert_eq!(article.title, "Quantify");
        assert_eq!(article.author, "Keith Braithwaite");
        assert_eq!(
            article.content,
            "\"Fast\" is not a requirement. *Numbers* are.\n\n\
             **How**\n\n\
             - Ask for **ranges**\n- Ask for percentiles\n\n\
             1) first\n2) second\n\n\
             **Latency**\n\n\
             Time to answer."
        );
    }

    #[test]
    fn h2_is_title_only_when_no_title_yet() {
        let article = parse_article_html("<h2>Stand Up!</h2><p>Body</p><h2>Part two</h2>");
        assert_eq!(article.title, "Stand Up!");
        assert_eq!(article.content, "Body\n\n**Part two**");
        assert!(article.author.is_empty());
    }

    #[test]
    fn emphasis_spacing_is_normalised() {
        let article = parse_article_html("<p>a<em> b </em>c and <b>d</b>.</p>");
        assert_eq!(article.content, "a *b* c and **d**.");
    }

    #[test]
    fn nested_lists_are_indented() {
        let article = parse_article_html("<ul><li>outer<ul><li>inner</li></ul></li></ul>");
        assert_eq!(article.content, "- outer\n  - inner");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp; &#39;c&#x27; &bogus;"), "a <b> & 'c' &bogus;");
    }
}
