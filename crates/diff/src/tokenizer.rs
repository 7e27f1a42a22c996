use std::sync::LazyLock;

use derive_more::Display;
use regex::Regex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Hardcoded pattern, always compiles
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)(\w+)([^>]*?)(/?)>").expect("TAG_RE: hardcoded regex is valid")
});

/// The kind of an HTML token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenKind {
    /// A tag such as `<p>`, `</li>` or `<br/>`
    #[display(fmt = "tag")]
    Tag,

    /// Text between two tags
    #[display(fmt = "text")]
    Text,
}

/// A single token of an HTML fragment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HtmlToken {
    /// Whether this is a tag or a text token
    pub kind: TokenKind,

    /// The exact source text of the token
    pub raw: String,

    /// Lowercased tag name (empty for text tokens)
    pub tag_name: String,

    /// The tag starts with `</`
    pub is_closing: bool,

    /// The tag ends with `/>` or is a `br`
    pub is_self_closing: bool,
}

impl HtmlToken {
    /// Create a text token
    pub fn text(raw: &str) -> Self {
        Self {
            kind: TokenKind::Text,
            raw: raw.to_string(),
            tag_name: String::new(),
            is_closing: false,
            is_self_closing: false,
        }
    }

    /// Create a tag token
    pub fn tag(raw: &str, tag_name: &str, is_closing: bool, is_self_closing: bool) -> Self {
        let tag_name = tag_name.to_lowercase();
        let is_self_closing = is_self_closing || tag_name == "br";
        Self {
            kind: TokenKind::Tag,
            raw: raw.to_string(),
            tag_name,
            is_closing,
            is_self_closing,
        }
    }

    /// Check if this token is text
    pub fn is_text(&self) -> bool {
        self.kind == TokenKind::Text
    }

    /// Check if this token is a tag
    pub fn is_tag(&self) -> bool {
        self.kind == TokenKind::Tag
    }

    /// Check if this token opens an element (not closing, not self-closing)
    pub fn is_opening(&self) -> bool {
        self.is_tag() && !self.is_closing && !self.is_self_closing
    }
}

/// Split an HTML fragment into tag and text tokens.
///
/// Tags are found by pattern matching only; well-formedness is never checked.
/// Concatenating the `raw` field of every token reproduces `html` exactly.
pub fn tokenize(html: &str) -> Vec<HtmlToken> {
    let mut tokens = Vec::new();
    let mut last_end = 0;

    for caps in TAG_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        if whole.start() > last_end {
            tokens.push(HtmlToken::text(&html[last_end..whole.start()]));
        }

        let is_closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let tag_name = caps.get(2).map_or("", |m| m.as_str());
        let is_self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty());

        tokens.push(HtmlToken::tag(
            whole.as_str(),
            tag_name,
            is_closing,
            is_self_closing,
        ));
        last_end = whole.end();
    }

    if last_end < html.len() {
        tokens.push(HtmlToken::text(&html[last_end..]));
    }

    tokens
}

/// Heading level for `h1`..`h6`
pub(crate) fn heading_level(tag_name: &str) -> Option<usize> {
    match tag_name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}
