use std::sync::LazyLock;

use regex::Regex;

use crate::entities::decode_entities;
use crate::tokenizer::{heading_level, tokenize, HtmlToken};

// Hardcoded pattern, always compiles
static EXCESS_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("EXCESS_NEWLINES_RE: hardcoded regex is valid"));

/// Walks tokens and writes the plain-text projection
#[derive(Debug, Default)]
struct TextProjector {
    out: String,
    /// One counter per open `<ol>`
    ordered_counters: Vec<usize>,
    in_blockquote: bool,
}

impl TextProjector {
    fn feed(&mut self, token: &HtmlToken) {
        if token.is_text() {
            self.out.push_str(&decode_entities(&token.raw));
        } else if token.is_closing {
            self.close(&token.tag_name);
        } else if token.is_self_closing {
            self.out.push('\n');
        } else {
            self.open(&token.tag_name);
        }
    }

    fn open(&mut self, tag_name: &str) {
        if let Some(level) = heading_level(tag_name) {
            self.out.push_str(&"#".repeat(level));
            self.out.push(' ');
            return;
        }

        match tag_name {
            "li" => {
                if self.in_blockquote {
                    self.out.push_str("> ");
                }
                match self.ordered_counters.last_mut() {
                    Some(n) => {
                        self.out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    None => self.out.push_str("- "),
                }
            }
            "ol" => self.ordered_counters.push(1),
            "blockquote" => {
                self.in_blockquote = true;
                self.out.push_str("> ");
            }
            _ => {}
        }
    }

    fn close(&mut self, tag_name: &str) {
        if heading_level(tag_name).is_some() {
            self.out.push_str("\n\n");
            return;
        }

        match tag_name {
            "p" | "div" => self.out.push_str("\n\n"),
            "li" | "ul" => self.out.push('\n'),
            "ol" => {
                self.ordered_counters.pop();
                self.out.push('\n');
            }
            "blockquote" => {
                self.in_blockquote = false;
                self.out.push('\n');
            }
            _ => {}
        }
    }

    fn finish(self) -> String {
        EXCESS_NEWLINES_RE
            .replace_all(&self.out, "\n\n")
            .trim()
            .to_string()
    }
}

/// Extract a plain-text projection of an HTML fragment that keeps its block
/// structure visible.
///
/// Headings become `# `-prefixed lines, list items get `- ` or `N. ` markers,
/// blockquotes get `> ` and paragraphs are separated by a blank line.
pub fn extract_text_from_html(html: &str) -> String {
    let mut projector = TextProjector::default();
    for token in tokenize(html) {
        projector.feed(&token);
    }
    projector.finish()
}
