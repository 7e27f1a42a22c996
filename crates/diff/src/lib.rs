// HTML-aware diff library
// This crate diffs HTML documents as structured text, highlights the changes
// in each document's own markup, and aligns documents block by block.

mod annotate;
mod block_diff;
mod entities;
mod extract;
mod html_diff;
mod text_diff;
mod tokenizer;

pub use annotate::{annotate, Side};
pub use block_diff::{
    detect_block_changes, extract_blocks, BlockAligner, BlockChange, BlockChangeType, HtmlBlock,
    DEFAULT_SIMILARITY_THRESHOLD,
};
pub use entities::{decode_entities, escape_html};
pub use extract::extract_text_from_html;
pub use html_diff::{compute_html_diff, DiffResult, DiffStats};
pub use text_diff::{
    normalize_text, DiffGranularity, DiffOptions, DiffSegment, SegmentType, TextDiff,
    WhitespaceMode,
};
pub use tokenizer::{tokenize, HtmlToken, TokenKind};

pub use similar::Algorithm;
