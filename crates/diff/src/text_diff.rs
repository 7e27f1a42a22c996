use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{bail, Result};
use derive_more::Display;
use regex::Regex;
use similar::{Algorithm, ChangeTag, TextDiff as SimilarTextDiff};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::html_diff::{compute_html_diff, DiffResult};

// Hardcoded patterns, always compile
static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN_RE: hardcoded regex is valid"));
static EXCESS_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("EXCESS_NEWLINES_RE: hardcoded regex is valid"));

/// How whitespace is treated before diffing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WhitespaceMode {
    /// Diff the extracted text exactly as it is
    #[display(fmt = "strict")]
    Strict,

    /// Collapse whitespace runs and trim every line first
    #[default]
    #[display(fmt = "relaxed")]
    Relaxed,
}

impl FromStr for WhitespaceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "relaxed" => Ok(Self::Relaxed),
            other => bail!("unknown whitespace mode: {other:?} (expected \"strict\" or \"relaxed\")"),
        }
    }
}

/// The unit the diff algorithm works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiffGranularity {
    /// Words and whitespace runs
    #[default]
    #[display(fmt = "word")]
    Word,

    /// Individual characters, best for short strings
    #[display(fmt = "character")]
    Character,
}

impl FromStr for DiffGranularity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" => Ok(Self::Word),
            "character" | "char" => Ok(Self::Character),
            other => bail!("unknown diff granularity: {other:?} (expected \"word\" or \"character\")"),
        }
    }
}

/// The role of a run of text in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SegmentType {
    /// Only in the proposed text
    #[display(fmt = "added")]
    Added,

    /// Only in the original text
    #[display(fmt = "removed")]
    Removed,

    /// In both texts
    #[display(fmt = "unchanged")]
    Unchanged,
}

impl From<ChangeTag> for SegmentType {
    fn from(tag: ChangeTag) -> Self {
        match tag {
            ChangeTag::Insert => Self::Added,
            ChangeTag::Delete => Self::Removed,
            ChangeTag::Equal => Self::Unchanged,
        }
    }
}

/// A contiguous run of text sharing one [`SegmentType`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffSegment {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub segment_type: SegmentType,
    pub value: String,
}

impl DiffSegment {
    pub fn new(segment_type: SegmentType, value: impl Into<String>) -> Self {
        Self {
            segment_type,
            value: value.into(),
        }
    }

    /// Number of whitespace-delimited words in this segment
    pub fn word_count(&self) -> usize {
        self.value.split_whitespace().count()
    }

    /// Whether this segment belongs to the original text
    pub fn in_original(&self) -> bool {
        self.segment_type != SegmentType::Added
    }

    /// Whether this segment belongs to the proposed text
    pub fn in_proposed(&self) -> bool {
        self.segment_type != SegmentType::Removed
    }
}

/// Options for an HTML diff
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DiffOptions {
    pub whitespace: WhitespaceMode,
    pub granularity: DiffGranularity,
    pub algorithm: Algorithm,
    /// Deadline handed to the diff algorithm; past it the result is still
    /// correct but may not be minimal
    pub timeout: Option<Duration>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            whitespace: WhitespaceMode::Relaxed,
            granularity: DiffGranularity::Word,
            algorithm: Algorithm::Myers,
            timeout: Some(Duration::from_secs(5)),
        }
    }
}

impl DiffOptions {
    pub fn whitespace(mut self, whitespace: WhitespaceMode) -> Self {
        self.whitespace = whitespace;
        self
    }

    pub fn granularity(mut self, granularity: DiffGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Diff two HTML documents with these options
    pub fn compute(&self, original_html: &str, proposed_html: &str) -> DiffResult {
        compute_html_diff(original_html, proposed_html, self)
    }
}

/// Normalize text the way the diff sees it.
///
/// In relaxed mode every line has its whitespace runs collapsed to one space
/// and is trimmed, runs of three or more newlines become two and the whole
/// text is trimmed. Strict mode returns the text unchanged.
pub fn normalize_text(text: &str, mode: WhitespaceMode) -> String {
    match mode {
        WhitespaceMode::Strict => text.to_string(),
        WhitespaceMode::Relaxed => {
            let lines: Vec<String> = text
                .split('\n')
                .map(|line| WHITESPACE_RUN_RE.replace_all(line, " ").trim().to_string())
                .collect();
            EXCESS_NEWLINES_RE
                .replace_all(&lines.join("\n"), "\n\n")
                .trim()
                .to_string()
        }
    }
}

/// Wrapper around text diff operations
pub struct TextDiff;

impl TextDiff {
    /// Diff two extracted texts into segments.
    ///
    /// Concatenating the unchanged and removed segments gives the normalized
    /// original; the unchanged and added segments give the normalized proposed.
    pub fn diff(original_text: &str, proposed_text: &str, options: &DiffOptions) -> Vec<DiffSegment> {
        let original = normalize_text(original_text, options.whitespace);
        let proposed = normalize_text(proposed_text, options.whitespace);
        Self::diff_normalized(&original, &proposed, options)
    }

    /// Diff two texts that are already normalized
    pub(crate) fn diff_normalized(
        original: &str,
        proposed: &str,
        options: &DiffOptions,
    ) -> Vec<DiffSegment> {
        let mut config = SimilarTextDiff::configure();
        config.algorithm(options.algorithm);
        if let Some(timeout) = options.timeout {
            config.timeout(timeout);
        }

        let diff = match options.granularity {
            DiffGranularity::Word => config.diff_words(original, proposed),
            DiffGranularity::Character => config.diff_chars(original, proposed),
        };

        let mut segments: Vec<DiffSegment> = Vec::new();
        for change in diff.iter_all_changes() {
            let segment_type = SegmentType::from(change.tag());
            match segments.last_mut() {
                Some(last) if last.segment_type == segment_type => {
                    last.value.push_str(change.value());
                }
                _ => segments.push(DiffSegment::new(segment_type, change.value())),
            }
        }

        segments
    }
}
