//! HTML to marked-up text
//!
//! Walks the parse tree built by html5ever instead of stripping tags with
//! patterns, so unclosed, misnested and stray tags resolve the same way a
//! browser would resolve them.

use super::TextSource;
use crate::error::ParseError;
use crate::text::clean_whitespace;
use ego_tree::NodeRef;
use scraper::{Html, Node};
use std::io::Read;

/// Elements whose content is never shown to a reader
const SKIPPED: &[&str] = &["head", "script", "style", "title", "noscript", "template"];

/// Elements that start and end a paragraph
const BLOCKS: &[&str] = &[
    "p", "div", "section", "article", "aside", "header", "footer", "main", "nav",
    "blockquote", "ul", "ol", "li", "dl", "dt", "dd", "table", "tr", "figure",
    "figcaption", "hr", "pre", "address",
];

/// Decoder for standalone (X)HTML files
#[derive(Debug, Default)]
pub struct HtmlSource;

impl HtmlSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for HtmlSource {
    fn extract_text(&self, reader: &mut dyn Read) -> Result<String, ParseError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(html_to_text(&String::from_utf8_lossy(&data)))
    }

    fn format_name(&self) -> &str {
        "HTML"
    }

    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm", "xhtml"]
    }
}

/// Convert an HTML document to text.
///
/// Headings become `## ` lines, block elements are separated by a blank line,
/// `<em>`/`<i>` are wrapped in `*` and `<strong>`/`<b>` in `**`. Entities are
/// decoded by the parser.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();
    walk(document.tree.root(), &mut out, false);
    clean_whitespace(&out)
}

fn walk(node: NodeRef<Node>, out: &mut String, preformatted: bool) {
    match node.value() {
        Node::Text(text) => {
            if preformatted {
                out.push_str(text);
            } else {
                // Source line breaks are insignificant outside <pre>
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
            }
        }
        Node::Element(element) => {
            let name = element.name();
            if SKIPPED.contains(&name) {
                return;
            }

            match name {
                "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                    out.push_str("\n\n## ");
                    walk_children(node, out, false);
                    out.push_str("\n\n");
                }
                "br" => out.push('\n'),
                "em" | "i" => wrap(node, out, "*", preformatted),
                "strong" | "b" => wrap(node, out, "**", preformatted),
                _ if BLOCKS.contains(&name) => {
                    out.push_str("\n\n");
                    walk_children(node, out, preformatted || name == "pre");
                    out.push_str("\n\n");
                }
                _ => walk_children(node, out, preformatted),
            }
        }
        Node::Document | Node::Fragment => walk_children(node, out, preformatted),
        _ => {}
    }
}

fn walk_children(node: NodeRef<Node>, out: &mut String, preformatted: bool) {
    for child in node.children() {
        walk(child, out, preformatted);
    }
}

fn wrap(node: NodeRef<Node>, out: &mut String, marker: &str, preformatted: bool) {
    out.push_str(marker);
    walk_children(node, out, preformatted);
    out.push_str(marker);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_paragraphs_and_emphasis() {
        let html = r#"<html><head><title>Skip me</title><style>p { color: red }</style></head>
            <body>
                <h1>Chapter One</h1>
                <p>It was a <em>dark</em> night &amp; <strong>cold</strong>.</p>
                <script>var x = 1;</script>
                <p>Line<br/>break</p>
            </body></html>"#;

        assert_eq!(
            html_to_text(html),
            "## Chapter One\n\nIt was a *dark* night & **cold**.\n\nLine\nbreak"
        );
    }

    #[test]
    fn test_source_line_breaks_fold_to_spaces() {
        let html = "<p>one\n   two\tthree</p>";
        assert_eq!(html_to_text(html), "one two three");
    }

    #[test]
    fn test_malformed_markup_recovers() {
        let html = "<p>first<p>second <b>bold <i>both</b> tail</i><div>third";
        let text = html_to_text(html);
        let paragraphs: Vec<_> = text.split("\n\n").collect();

        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0], "first");
        assert!(paragraphs[1].starts_with("second **bold *both"));
        assert_eq!(paragraphs[2], "third");
    }

    #[test]
    fn test_preformatted_keeps_lines() {
        let html = "<pre>line one\nline two</pre>";
        assert_eq!(html_to_text(html), "line one\nline two");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("<html><body>  </body></html>"), "");
    }
}
