use std::collections::HashSet;

use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::decode_entities;
use crate::tokenizer::{heading_level, tokenize};

/// Minimum share of shared words for two blocks to count as the same block
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

const BLOCK_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "li",
    "ul",
    "ol",
    "blockquote",
    "div",
];

fn is_block_tag(tag_name: &str) -> bool {
    BLOCK_TAGS.contains(&tag_name)
}

/// A top-level block element and its text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HtmlBlock {
    pub tag: String,
    pub text: String,
}

impl HtmlBlock {
    pub fn new(tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            text: text.into(),
        }
    }

    fn is_heading(&self) -> bool {
        heading_level(&self.tag).is_some()
    }

    fn word_set(&self) -> HashSet<String> {
        self.text
            .split_whitespace()
            .map(|w| w.to_lowercase())
            .collect()
    }
}

/// How a block changed between two documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BlockChangeType {
    /// The block only exists in the proposed document
    #[display(fmt = "added")]
    Added,

    /// The block only exists in the original document
    #[display(fmt = "removed")]
    Removed,

    /// The block was matched but its text differs
    #[display(fmt = "modified")]
    Modified,

    /// The block was matched and its text is identical
    #[display(fmt = "unchanged")]
    Unchanged,
}

/// One entry of a block-level diff
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BlockChange {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub change_type: BlockChangeType,

    /// The proposed block's tag, or the original's for removals
    pub tag: String,

    /// Empty for added blocks
    pub original_text: String,

    /// Empty for removed blocks
    pub proposed_text: String,
}

impl BlockChange {
    fn added(block: &HtmlBlock) -> Self {
        Self {
            change_type: BlockChangeType::Added,
            tag: block.tag.clone(),
            original_text: String::new(),
            proposed_text: block.text.clone(),
        }
    }

    fn removed(block: &HtmlBlock) -> Self {
        Self {
            change_type: BlockChangeType::Removed,
            tag: block.tag.clone(),
            original_text: block.text.clone(),
            proposed_text: String::new(),
        }
    }

    fn matched(original: &HtmlBlock, proposed: &HtmlBlock) -> Self {
        let change_type = if original.text == proposed.text {
            BlockChangeType::Unchanged
        } else {
            BlockChangeType::Modified
        };
        Self {
            change_type,
            tag: proposed.tag.clone(),
            original_text: original.text.clone(),
            proposed_text: proposed.text.clone(),
        }
    }

    /// Check if this entry represents a change
    pub fn has_changes(&self) -> bool {
        self.change_type != BlockChangeType::Unchanged
    }
}

/// Extract the top-level block elements of an HTML document.
///
/// Nested block elements belong to their outermost ancestor. Text outside
/// any block is dropped, and blocks whose trimmed text is empty are skipped.
pub fn extract_blocks(html: &str) -> Vec<HtmlBlock> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut current_tag = String::new();
    let mut text = String::new();

    let mut flush = |tag: &mut String, text: &mut String| {
        let trimmed = text.trim();
        if !tag.is_empty() && !trimmed.is_empty() {
            blocks.push(HtmlBlock::new(tag.as_str(), trimmed));
        }
        tag.clear();
        text.clear();
    };

    for token in tokenize(html) {
        if token.is_text() {
            if depth > 0 {
                text.push_str(&decode_entities(&token.raw));
            }
            continue;
        }

        if depth > 0 && (token.is_self_closing || is_block_tag(&token.tag_name)) {
            separate_words(&mut text);
        }

        if !is_block_tag(&token.tag_name) || token.is_self_closing {
            continue;
        }

        if !token.is_closing {
            if depth == 0 {
                current_tag = token.tag_name.clone();
                text.clear();
            }
            depth += 1;
        } else if depth == 1 && token.tag_name == current_tag {
            flush(&mut current_tag, &mut text);
            depth = 0;
        } else if depth > 1 {
            depth -= 1;
        }
    }

    // Unclosed last block
    flush(&mut current_tag, &mut text);

    blocks
}

fn separate_words(text: &mut String) {
    if !text.is_empty() && !text.ends_with(char::is_whitespace) {
        text.push(' ');
    }
}

/// Aligns the blocks of two documents with a similarity-gated LCS
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockAligner {
    similarity_threshold: f64,
}

impl Default for BlockAligner {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl BlockAligner {
    /// Set the minimum word overlap (0.0 to 1.0) for two blocks to match
    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Classify every block of both documents
    pub fn detect(&self, original_html: &str, proposed_html: &str) -> Vec<BlockChange> {
        let original = extract_blocks(original_html);
        let proposed = extract_blocks(proposed_html);
        let changes = self.align(&original, &proposed);

        log::debug!(
            "block diff: {} original blocks, {} proposed blocks, {} changed",
            original.len(),
            proposed.len(),
            changes.iter().filter(|c| c.has_changes()).count()
        );

        changes
    }

    /// Classify already extracted blocks
    pub fn align(&self, original: &[HtmlBlock], proposed: &[HtmlBlock]) -> Vec<BlockChange> {
        let pairs = self.lcs_pairs(original, proposed);
        let mut changes = Vec::with_capacity(original.len().max(proposed.len()));
        let (mut oi, mut pi) = (0, 0);

        for (a, b) in pairs {
            changes.extend(original[oi..a].iter().map(BlockChange::removed));
            changes.extend(proposed[pi..b].iter().map(BlockChange::added));
            changes.push(BlockChange::matched(&original[a], &proposed[b]));
            oi = a + 1;
            pi = b + 1;
        }

        changes.extend(original[oi..].iter().map(BlockChange::removed));
        changes.extend(proposed[pi..].iter().map(BlockChange::added));
        changes
    }

    /// Whether two blocks may be aligned with each other
    fn blocks_match(&self, a: &HtmlBlock, b: &HtmlBlock) -> bool {
        let compatible = a.tag == b.tag || (a.is_heading() && b.is_heading());
        compatible && self.similar_enough(a, b)
    }

    fn similar_enough(&self, a: &HtmlBlock, b: &HtmlBlock) -> bool {
        let a_words = a.word_set();
        let b_words = b.word_set();
        let larger = a_words.len().max(b_words.len());
        if larger == 0 {
            return true;
        }
        let shared = a_words.intersection(&b_words).count();
        shared as f64 / larger as f64 >= self.similarity_threshold
    }

    /// Matched index pairs in increasing order
    fn lcs_pairs(&self, original: &[HtmlBlock], proposed: &[HtmlBlock]) -> Vec<(usize, usize)> {
        let (m, n) = (original.len(), proposed.len());
        let mut matches = vec![vec![false; n]; m];
        let mut dp = vec![vec![0usize; n + 1]; m + 1];

        for i in 1..=m {
            for j in 1..=n {
                matches[i - 1][j - 1] = self.blocks_match(&original[i - 1], &proposed[j - 1]);
                dp[i][j] = if matches[i - 1][j - 1] {
                    dp[i - 1][j - 1] + 1
                } else {
                    dp[i - 1][j].max(dp[i][j - 1])
                };
            }
        }

        let mut pairs = Vec::with_capacity(dp[m][n]);
        let (mut i, mut j) = (m, n);
        while i > 0 && j > 0 {
            if matches[i - 1][j - 1] {
                pairs.push((i - 1, j - 1));
                i -= 1;
                j -= 1;
            } else if dp[i - 1][j] >= dp[i][j - 1] {
                i -= 1;
            } else {
                j -= 1;
            }
        }

        pairs.reverse();
        pairs
    }
}

/// Block-level diff of two HTML documents with the default threshold
pub fn detect_block_changes(original_html: &str, proposed_html: &str) -> Vec<BlockChange> {
    BlockAligner::default().detect(original_html, proposed_html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_of_any_level_match() {
        let aligner = BlockAligner::default();
        assert!(aligner.blocks_match(&HtmlBlock::new("h1", "Intro"), &HtmlBlock::new("h3", "Intro")));
        assert!(!aligner.blocks_match(&HtmlBlock::new("p", "Intro"), &HtmlBlock::new("h3", "Intro")));
    }

    #[test]
    fn similarity_is_case_insensitive() {
        let aligner = BlockAligner::default();
        assert!(aligner.similar_enough(&HtmlBlock::new("p", "HELLO World"), &HtmlBlock::new("p", "hello world")));
    }

    #[test]
    fn threshold_is_inclusive() {
        // 2 of 4 words shared
        let a = HtmlBlock::new("p", "one two three four");
        let b = HtmlBlock::new("p", "one two five six");
        assert!(BlockAligner::default().similar_enough(&a, &b));
        assert!(!BlockAligner::default().similarity_threshold(0.6).similar_enough(&a, &b));
    }

    #[test]
    fn lcs_pairs_are_ordered() {
        let original = vec![
            HtmlBlock::new("p", "alpha"),
            HtmlBlock::new("p", "beta"),
            HtmlBlock::new("p", "gamma"),
        ];
        let proposed = vec![
            HtmlBlock::new("p", "beta"),
            HtmlBlock::new("p", "delta"),
            HtmlBlock::new("p", "gamma"),
        ];
        assert_eq!(BlockAligner::default().lcs_pairs(&original, &proposed), vec![(1, 0), (2, 2)]);
    }
}
