//! Heading extraction from note text.
//!
//! ATX-style headings only: a line counts as a heading iff it begins with one
//! to six `#` characters immediately followed by whitespace and then the
//! heading text. Setext headings and fenced code blocks are deliberately not
//! modeled; a `#` line inside a fence is treated like any other heading line.

use crate::{Heading, NoteId};
use once_cell::sync::Lazy;
use regex::Regex;

static ATX_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("valid heading pattern"));

/// Extract every ATX heading from `text`, in ascending line order.
///
/// `position` is the zero-based line index. Pure function; duplicate heading
/// text is preserved as-is.
#[must_use]
pub fn extract_headings(text: &str, note: &NoteId) -> Vec<Heading> {
    let mut headings = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if let Some(captures) = ATX_HEADING.captures(line) {
            // Group 1 is the marker run; its length is the level.
            #[allow(clippy::cast_possible_truncation)]
            let level = captures[1].len() as u8;
            headings.push(Heading {
                text: captures[2].trim_end().to_string(),
                level,
                position: index,
                note: note.clone(),
            });
        }
    }
    headings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> NoteId {
        NoteId::from("A.md")
    }

    #[test]
    fn test_extracts_all_levels_in_order() {
        let text = "# One\nbody\n## Two\n### Three\n#### Four\n##### Five\n###### Six\n";
        let headings = extract_headings(text, &note());
        assert_eq!(headings.len(), 6);
        let levels: Vec<u8> = headings.iter().map(|h| h.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6]);
        let positions: Vec<usize> = headings.iter().map(|h| h.position).collect();
        assert_eq!(positions, vec![0, 2, 3, 4, 5, 6]);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_requires_whitespace_after_markers() {
        let headings = extract_headings("#NotAHeading\n#also#not\n", &note());
        assert!(headings.is_empty());
    }

    #[test]
    fn test_seven_hashes_is_not_a_heading() {
        let headings = extract_headings("####### Too deep\n", &note());
        assert!(headings.is_empty());
    }

    #[test]
    fn test_heading_text_keeps_inner_hashes() {
        let headings = extract_headings("## C# in depth\n", &note());
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].text, "C# in depth");
        assert_eq!(headings[0].level, 2);
    }

    #[test]
    fn test_duplicate_heading_text_preserved() {
        let headings = extract_headings("## Notes\ntext\n## Notes\n", &note());
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].text, headings[1].text);
        assert_ne!(headings[0].position, headings[1].position);
    }

    #[test]
    fn test_empty_and_headingless_text() {
        assert!(extract_headings("", &note()).is_empty());
        assert!(extract_headings("just prose\nmore prose\n", &note()).is_empty());
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        let headings = extract_headings("## Intro   \n", &note());
        assert_eq!(headings[0].text, "Intro");
    }
}
