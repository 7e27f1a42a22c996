use derive_more::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entities::{decode_entities, push_escaped, push_escaped_char};
use crate::text_diff::{DiffSegment, SegmentType};
use crate::tokenizer::tokenize;

/// Which document of a diff is being annotated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// The original document, removals are highlighted
    #[display(fmt = "original")]
    Original,

    /// The proposed document, additions are highlighted
    #[display(fmt = "proposed")]
    Proposed,
}

impl Side {
    /// The segment type this side highlights
    pub fn highlighted(self) -> SegmentType {
        match self {
            Side::Original => SegmentType::Removed,
            Side::Proposed => SegmentType::Added,
        }
    }

    /// CSS class of the highlight span
    pub fn css_class(self) -> &'static str {
        match self {
            Side::Original => "diff-removed",
            Side::Proposed => "diff-added",
        }
    }

    fn includes(self, segment: &DiffSegment) -> bool {
        match self {
            Side::Original => segment.in_original(),
            Side::Proposed => segment.in_proposed(),
        }
    }
}

/// The reference text of one side, with segment boundaries
struct FlatText {
    chars: Vec<char>,
    /// Exclusive end offset (in chars) of every segment
    ends: Vec<usize>,
    highlighted: Vec<bool>,
}

impl FlatText {
    fn new(segments: &[DiffSegment], side: Side) -> Self {
        let mut chars = Vec::new();
        let mut ends = Vec::new();
        let mut highlighted = Vec::new();

        for segment in segments.iter().filter(|s| side.includes(s)) {
            if segment.value.is_empty() {
                continue;
            }
            chars.extend(segment.value.chars());
            ends.push(chars.len());
            highlighted.push(segment.segment_type == side.highlighted());
        }

        Self {
            chars,
            ends,
            highlighted,
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    /// Index of the segment covering `offset`
    fn segment_at(&self, offset: usize) -> usize {
        self.ends.partition_point(|&end| end <= offset)
    }
}

/// A run of matched characters that belong to one segment
struct Run<'a> {
    out: &'a mut String,
    class: &'static str,
    text: String,
    segment: Option<usize>,
    highlighted: bool,
}

impl<'a> Run<'a> {
    fn new(out: &'a mut String, class: &'static str) -> Self {
        Self {
            out,
            class,
            text: String::new(),
            segment: None,
            highlighted: false,
        }
    }

    fn push(&mut self, c: char, segment: usize, highlighted: bool) {
        if self.segment != Some(segment) {
            self.flush();
            self.segment = Some(segment);
            self.highlighted = highlighted;
        }
        self.text.push(c);
    }

    fn flush(&mut self) {
        if !self.text.is_empty() {
            if self.highlighted {
                self.out.push_str("<span class=\"");
                self.out.push_str(self.class);
                self.out.push_str("\">");
                push_escaped(self.out, &self.text);
                self.out.push_str("</span>");
            } else {
                push_escaped(self.out, &self.text);
            }
            self.text.clear();
        }
        self.segment = None;
    }

    /// Emit unmatched source text, closing the current run first
    fn push_raw(&mut self, text: &str) {
        self.flush();
        push_escaped(self.out, text);
    }

    fn push_raw_char(&mut self, c: char) {
        self.flush();
        push_escaped_char(self.out, c);
    }
}

/// Re-project diff segments onto one side's HTML.
///
/// Tags are copied verbatim. Text is matched character by character against
/// the side's flattened segment text; runs belonging to a highlighted segment
/// are wrapped in `<span class="diff-removed">` (original) or
/// `<span class="diff-added">` (proposed). All text is escaped exactly once.
///
/// Matching is greedy. A source character that does not match advances only
/// the reference cursor, which skips the structural markers inserted by text
/// extraction. Unmatched source whitespace is emitted as is, since
/// normalization only ever drops whitespace.
pub fn annotate(source_html: &str, segments: &[DiffSegment], side: Side) -> String {
    let flat = FlatText::new(segments, side);
    let mut out = String::with_capacity(source_html.len() + source_html.len() / 4);
    let mut pos = 0;

    for token in tokenize(source_html) {
        if token.is_tag() {
            out.push_str(&token.raw);
            continue;
        }

        let text = decode_entities(&token.raw);
        let mut run = Run::new(&mut out, side.css_class());
        let mut chars = text.char_indices().peekable();

        while let Some(&(idx, c)) = chars.peek() {
            if pos >= flat.len() {
                log::trace!(
                    "reference text exhausted on {} side, {} source bytes left unmatched",
                    side,
                    text.len() - idx
                );
                run.push_raw(&text[idx..]);
                break;
            }

            if c == flat.chars[pos] {
                let segment = flat.segment_at(pos);
                run.push(c, segment, flat.highlighted[segment]);
                pos += 1;
                chars.next();
            } else if c.is_whitespace() {
                run.push_raw_char(c);
                chars.next();
            } else {
                run.flush();
                pos += 1;
            }
        }

        run.flush();
    }

    out
}
