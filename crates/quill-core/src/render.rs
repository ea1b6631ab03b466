//! Markdown to HTML conversion.
//!
//! The produced HTML is embedded in the page shell unescaped. That is
//! intentional and matches the trust model: only signed-in users can
//! author document content.

use pulldown_cmark::{html, Options, Parser};

/// Convert a full markdown document to an HTML fragment.
///
/// Covers the CommonMark core (headings, lists, emphasis, links, code
/// blocks) plus tables and strikethrough.
#[must_use]
pub fn markdown_to_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options);

    let mut out = String::with_capacity(text.len() * 2);
    html::push_html(&mut out, parser);
    out
}
