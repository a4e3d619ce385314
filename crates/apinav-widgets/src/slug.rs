#![forbid(unsafe_code)]

//! Heading anchors in the markdown slugger format.
//!
//! Lowercase, trim, drop inline HTML tags and punctuation, then turn every
//! whitespace character into `-`. Repeated headings are not deduplicated;
//! the document side produces the same anchors.

const PUNCTUATION: &str = "\\'!\"#$%&()*+,./:;<=>?@[]^`{|}~";

fn is_stripped(ch: char) -> bool {
    PUNCTUATION.contains(ch)
        || ('\u{2000}'..='\u{206F}').contains(&ch)
        || ('\u{2E00}'..='\u{2E7F}').contains(&ch)
}

/// Remove `<tag ...>`, `</tag>` and `<!...>` sequences.
fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('<') {
        let after = &rest[start + 1..];
        let opens_tag = after
            .chars()
            .next()
            .is_some_and(|c| c == '!' || c == '/' || c.is_ascii_alphabetic());
        match after.find('>') {
            Some(end) if opens_tag => {
                out.push_str(&rest[..start]);
                rest = &after[end + 1..];
            }
            _ => {
                out.push_str(&rest[..=start]);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Anchor slug for a heading.
#[must_use]
pub fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    strip_tags(lowered.trim())
        .chars()
        .filter(|&c| !is_stripped(c))
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect()
}

/// Content id of a heading attached to `prefix` (`overview`, a tag id, ...).
#[must_use]
pub fn heading_content_id(prefix: &str, heading: &str) -> String {
    format!("{prefix}--{}", slug(heading))
}
