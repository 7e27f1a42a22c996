use html_diff::{
    compute_html_diff, decode_entities, detect_block_changes, escape_html, extract_blocks,
    extract_text_from_html, normalize_text, tokenize, BlockChangeType, DiffGranularity,
    DiffOptions, WhitespaceMode,
};
use proptest::prelude::*;

/// Loosely HTML-shaped strings, including broken markup
fn html_like() -> impl Strategy<Value = String> {
    let markup = prop::sample::select(vec![
        "<p>",
        "</p>",
        "<h2>",
        "</h2>",
        "<ol>",
        "</ol>",
        "<ul>",
        "</ul>",
        "<li>",
        "</li>",
        "<blockquote>",
        "</blockquote>",
        "<br>",
        "<b>",
        "&amp;",
        "&lt;",
        "\n  ",
    ])
    .prop_map(str::to_string);
    let piece = prop_oneof![
        2 => markup,
        1 => "[a-z#0-9.>< -]{1,8}",
    ];
    prop::collection::vec(piece, 0..24).prop_map(|pieces| pieces.concat())
}

fn paragraphs() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::collection::vec("[a-e]{1,2}", 1..5).prop_map(|words| words.join(" ")),
        0..8,
    )
}

fn to_html(paragraphs: &[String]) -> String {
    paragraphs.iter().map(|p| format!("<p>{}</p>", p)).collect()
}

fn options() -> impl Strategy<Value = DiffOptions> {
    (
        prop_oneof![Just(WhitespaceMode::Relaxed), Just(WhitespaceMode::Strict)],
        prop_oneof![Just(DiffGranularity::Word), Just(DiffGranularity::Character)],
    )
        .prop_map(|(whitespace, granularity)| {
            DiffOptions::default()
                .whitespace(whitespace)
                .granularity(granularity)
        })
}

proptest! {
    #[test]
    fn tokenization_is_lossless(html in any::<String>()) {
        let joined: String = tokenize(&html).iter().map(|t| t.raw.as_str()).collect();
        prop_assert_eq!(joined, html);
    }

    #[test]
    fn html_like_tokenization_is_lossless(html in html_like()) {
        let joined: String = tokenize(&html).iter().map(|t| t.raw.as_str()).collect();
        prop_assert_eq!(joined, html);
    }

    #[test]
    fn escape_round_trips(text in any::<String>()) {
        prop_assert_eq!(decode_entities(&escape_html(&text)), text);
    }

    #[test]
    fn identical_inputs_have_no_changes(html in html_like(), options in options()) {
        let result = compute_html_diff(&html, &html, &options);
        prop_assert_eq!(result.stats.additions, 0);
        prop_assert_eq!(result.stats.deletions, 0);
        prop_assert!(!result.has_changes());
    }

    #[test]
    fn segments_rebuild_normalized_texts(
        original in html_like(),
        proposed in html_like(),
        options in options(),
    ) {
        let result = compute_html_diff(&original, &proposed, &options);
        prop_assert_eq!(
            result.original_text(),
            normalize_text(&extract_text_from_html(&original), options.whitespace)
        );
        prop_assert_eq!(
            result.proposed_text(),
            normalize_text(&extract_text_from_html(&proposed), options.whitespace)
        );
    }

    #[test]
    fn annotated_output_only_adds_highlight_markup(original in ".{0,40}", proposed in ".{0,40}") {
        let original_html = format!("<p>{}</p>", escape_html(&original));
        let proposed_html = format!("<p>{}</p>", escape_html(&proposed));
        let result = compute_html_diff(&original_html, &proposed_html, &DiffOptions::default());

        let stripped = result
            .original_annotated_html
            .replace("<span class=\"diff-removed\">", "")
            .replace("</span>", "")
            .replace("<p>", "")
            .replace("</p>", "");
        prop_assert!(!stripped.contains('<'));

        let stripped = result
            .proposed_annotated_html
            .replace("<span class=\"diff-added\">", "")
            .replace("</span>", "")
            .replace("<p>", "")
            .replace("</p>", "");
        prop_assert!(!stripped.contains('<'));
    }

    #[test]
    fn every_block_is_accounted_for_once(original in paragraphs(), proposed in paragraphs()) {
        let original_html = to_html(&original);
        let proposed_html = to_html(&proposed);
        let changes = detect_block_changes(&original_html, &proposed_html);

        let original_seen: Vec<String> = changes
            .iter()
            .filter(|c| c.change_type != BlockChangeType::Added)
            .map(|c| c.original_text.clone())
            .collect();
        let proposed_seen: Vec<String> = changes
            .iter()
            .filter(|c| c.change_type != BlockChangeType::Removed)
            .map(|c| c.proposed_text.clone())
            .collect();

        let original_blocks: Vec<String> =
            extract_blocks(&original_html).into_iter().map(|b| b.text).collect();
        let proposed_blocks: Vec<String> =
            extract_blocks(&proposed_html).into_iter().map(|b| b.text).collect();

        prop_assert_eq!(original_seen, original_blocks);
        prop_assert_eq!(proposed_seen, proposed_blocks);

        for change in &changes {
            match change.change_type {
                BlockChangeType::Added => {
                    prop_assert!(change.original_text.is_empty());
                }
                BlockChangeType::Removed => {
                    prop_assert!(change.proposed_text.is_empty());
                }
                BlockChangeType::Unchanged => {
                    prop_assert_eq!(&change.original_text, &change.proposed_text);
                }
                BlockChangeType::Modified => {
                    prop_assert_ne!(&change.original_text, &change.proposed_text);
                }
            }
        }
    }
}
