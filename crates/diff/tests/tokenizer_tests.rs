use html_diff::{tokenize, TokenKind};
use pretty_assertions::assert_eq;

fn joined(html: &str) -> String {
    tokenize(html).iter().map(|t| t.raw.as_str()).collect()
}

#[test]
fn test_empty_input() {
    assert!(tokenize("").is_empty());
}

#[test]
fn test_tags_and_text() {
    let tokens = tokenize("<p class=\"intro\">Hi<br/>there</p>");

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Tag,
            TokenKind::Text,
            TokenKind::Tag,
            TokenKind::Text,
            TokenKind::Tag
        ]
    );

    assert_eq!(tokens[0].tag_name, "p");
    assert_eq!(tokens[0].raw, "<p class=\"intro\">");
    assert!(tokens[0].is_opening());

    assert_eq!(tokens[1].raw, "Hi");
    assert!(tokens[1].tag_name.is_empty());

    assert_eq!(tokens[2].tag_name, "br");
    assert!(tokens[2].is_self_closing);
    assert!(!tokens[2].is_closing);

    assert_eq!(tokens[4].tag_name, "p");
    assert!(tokens[4].is_closing);
}

#[test]
fn test_br_without_slash_is_self_closing() {
    let tokens = tokenize("a<br>b");
    assert_eq!(tokens.len(), 3);
    assert!(tokens[1].is_self_closing);
    assert!(!tokens[1].is_opening());
}

#[test]
fn test_self_closing_slash() {
    let tokens = tokenize("<hr/><img src=\"a.png\" />");
    assert_eq!(tokens.len(), 2);
    assert!(tokens.iter().all(|t| t.is_self_closing));
    assert_eq!(tokens[1].tag_name, "img");
}

#[test]
fn test_stray_angle_brackets_are_text() {
    let tokens = tokenize("a < b > c");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_text());
}

#[test]
fn test_comments_are_text() {
    let tokens = tokenize("<!-- note --><p>x</p>");
    assert!(tokens[0].is_text());
    assert_eq!(tokens[0].raw, "<!-- note -->");
}

#[test]
fn test_malformed_html_is_lossless() {
    for html in [
        "<p>unclosed <b>bold",
        "</div></div>text<p",
        "<ul><li>one<li>two</ul>",
        "<<p>>",
        "text only",
        "<P CLASS=x>Upper</P>",
    ] {
        assert_eq!(joined(html), html);
    }
}
