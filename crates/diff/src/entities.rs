use std::sync::LazyLock;

use regex::{Captures, Regex};

// Hardcoded pattern, always compiles
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("ENTITY_RE: hardcoded regex is valid")
});

/// Decode HTML character references to literal characters.
///
/// Only `&nbsp; &amp; &lt; &gt; &quot; &#39; &#x27;` and numeric references are
/// recognised. Unknown named references such as `&copy;` are left untouched.
/// Decoding is a single pass, so `&amp;lt;` becomes `&lt;`.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY_RE
        .replace_all(text, |caps: &Captures| {
            let whole = &caps[0];
            match decode_reference(&caps[1]) {
                Some(c) => c.to_string(),
                None => whole.to_string(),
            }
        })
        .into_owned()
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Escape the five characters that are unsafe inside HTML text and attributes.
///
/// Every piece of document text embedded in annotated output goes through
/// this exactly once.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    push_escaped(&mut escaped, text);
    escaped
}

pub(crate) fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        push_escaped_char(out, c);
    }
}

pub(crate) fn push_escaped_char(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_references() {
        assert_eq!(decode_entities("&#65;&#x42;&#X43;"), "ABC");
        assert_eq!(decode_entities("it&#x27;s"), "it's");
        assert_eq!(decode_entities("it&#39;s"), "it's");
    }

    #[test]
    fn invalid_code_points_are_kept() {
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#99999999999;"), "&#99999999999;");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(decode_entities("&copy; 2024"), "&copy; 2024");
        assert_eq!(decode_entities("a & b"), "a & b");
    }
}
