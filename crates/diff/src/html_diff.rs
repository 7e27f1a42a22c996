#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::annotate::{annotate, Side};
use crate::extract::extract_text_from_html;
use crate::text_diff::{normalize_text, DiffOptions, DiffSegment, SegmentType, TextDiff};

/// Word counts per segment type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffStats {
    /// Words only in the proposed text
    pub additions: usize,

    /// Words only in the original text
    pub deletions: usize,

    /// Words in both texts
    pub unchanged: usize,
}

impl DiffStats {
    /// Count whitespace-delimited words per segment type
    pub fn from_segments(segments: &[DiffSegment]) -> Self {
        let mut stats = Self::default();
        for segment in segments {
            let words = segment.word_count();
            match segment.segment_type {
                SegmentType::Added => stats.additions += words,
                SegmentType::Removed => stats.deletions += words,
                SegmentType::Unchanged => stats.unchanged += words,
            }
        }
        stats
    }

    /// Total number of counted words
    pub fn total(&self) -> usize {
        self.additions + self.deletions + self.unchanged
    }
}

/// The result of diffing two HTML documents
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DiffResult {
    /// The original HTML with removals wrapped in `diff-removed` spans
    pub original_annotated_html: String,

    /// The proposed HTML with additions wrapped in `diff-added` spans
    pub proposed_annotated_html: String,

    /// The text diff in document order
    pub segments: Vec<DiffSegment>,

    pub stats: DiffStats,
}

impl DiffResult {
    /// Check if the diff has any changes
    pub fn has_changes(&self) -> bool {
        self.segments
            .iter()
            .any(|s| s.segment_type != SegmentType::Unchanged)
    }

    /// The normalized original text, rebuilt from the segments
    pub fn original_text(&self) -> String {
        self.segments
            .iter()
            .filter(|s| s.in_original())
            .map(|s| s.value.as_str())
            .collect()
    }

    /// The normalized proposed text, rebuilt from the segments
    pub fn proposed_text(&self) -> String {
        self.segments
            .iter()
            .filter(|s| s.in_proposed())
            .map(|s| s.value.as_str())
            .collect()
    }
}

/// Diff two HTML documents (or plain strings).
///
/// Both documents are projected to structured text, diffed, and the diff is
/// projected back onto each document's own markup.
pub fn compute_html_diff(original_html: &str, proposed_html: &str, options: &DiffOptions) -> DiffResult {
    let original_text = normalize_text(&extract_text_from_html(original_html), options.whitespace);
    let proposed_text = normalize_text(&extract_text_from_html(proposed_html), options.whitespace);

    let segments = TextDiff::diff_normalized(&original_text, &proposed_text, options);
    let stats = DiffStats::from_segments(&segments);

    log::debug!(
        "html diff ({} granularity, {} whitespace): {} segments, +{} -{} ={}",
        options.granularity,
        options.whitespace,
        segments.len(),
        stats.additions,
        stats.deletions,
        stats.unchanged
    );

    DiffResult {
        original_annotated_html: annotate(original_html, &segments, Side::Original),
        proposed_annotated_html: annotate(proposed_html, &segments, Side::Proposed),
        segments,
        stats,
    }
}
