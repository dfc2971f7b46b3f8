//! Wiki-link scanning and in-place text rewriting.
//!
//! Links are matched with a small literal scanner rather than a regex, so
//! heading text containing regex metacharacters needs no escaping: all
//! comparisons are plain string equality. Two surface syntaxes are matched
//! independently:
//!
//! - direct: `[[Note#Heading]]` or `[[Note#Heading|alias]]`
//! - query-block (pre-escaped): `\[\[Note#Heading\]\]`, with the alias
//!   separator accepted as either `|` or `\|`
//!
//! Rewriting preserves the token's escape style and its alias segment
//! verbatim, separator included. Tokens never span lines.

const PLAIN_OPEN: &[u8] = b"[[";
const PLAIN_CLOSE: &[u8] = b"]]";
const ESCAPED_OPEN: &[u8] = br"\[\[";
const ESCAPED_CLOSE: &[u8] = br"\]\]";
const ESCAPED_PIPE: &[u8] = br"\|";

/// One wiki link with a heading anchor, located in a larger text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpan<'a> {
    /// Byte offset of the token's first byte (the opener).
    pub start: usize,
    /// Byte offset one past the token's last byte (the closer).
    pub end: usize,
    /// Whether the token uses the query-block escaped form.
    pub escaped: bool,
    /// Target note name as written in the link (a basename).
    pub note: &'a str,
    /// Heading anchor text, everything after the first `#`.
    pub heading: &'a str,
    /// Display-alias segment, verbatim and including its `|` or `\|`
    /// separator, when present.
    pub alias: Option<&'a str>,
}

/// One confirmed move projected to link-string terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule<'a> {
    /// Note basename the stale links reference.
    pub old_note: &'a str,
    /// Note basename rewritten links should reference.
    pub new_note: &'a str,
    /// Heading anchor the stale links carry.
    pub old_heading: &'a str,
    /// Heading anchor rewritten links should carry.
    pub new_heading: &'a str,
}

/// Scan `text` for every wiki link that carries a heading anchor.
///
/// Links without a `#` fragment are not heading references and are skipped.
/// Malformed candidates (no closer before end of line) are ignored.
#[must_use]
pub fn scan_links(text: &str) -> Vec<LinkSpan<'_>> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let (escaped, open_len) = if bytes[i..].starts_with(ESCAPED_OPEN) {
            (true, ESCAPED_OPEN.len())
        } else if bytes[i..].starts_with(PLAIN_OPEN) {
            (false, PLAIN_OPEN.len())
        } else {
            i += 1;
            continue;
        };
        match parse_token(text, i, open_len, escaped) {
            Some(span) => {
                i = span.end;
                // An empty heading means the target had no usable anchor.
                if !span.heading.is_empty() {
                    spans.push(span);
                }
            },
            None => i += 1,
        }
    }
    spans
}

fn parse_token(text: &str, start: usize, open_len: usize, escaped: bool) -> Option<LinkSpan<'_>> {
    let bytes = text.as_bytes();
    let body_start = start + open_len;
    let close = if escaped { ESCAPED_CLOSE } else { PLAIN_CLOSE };

    let mut sep: Option<(usize, usize)> = None; // (offset, len)
    let mut close_at: Option<usize> = None;
    let mut j = body_start;
    while j < bytes.len() {
        if bytes[j] == b'\n' {
            return None;
        }
        if bytes[j..].starts_with(close) {
            close_at = Some(j);
            break;
        }
        if sep.is_none() {
            if escaped && bytes[j..].starts_with(ESCAPED_PIPE) {
                sep = Some((j, ESCAPED_PIPE.len()));
                j += ESCAPED_PIPE.len();
                continue;
            }
            if bytes[j] == b'|' {
                sep = Some((j, 1));
                j += 1;
                continue;
            }
        }
        j += 1;
    }
    let close_at = close_at?;

    let target_end = sep.map_or(close_at, |(offset, _)| offset);
    let target = &text[body_start..target_end];
    let alias = sep.map(|(offset, _)| &text[offset..close_at]);
    let (note, heading) = match target.find('#') {
        Some(hash) => (&target[..hash], &target[hash + 1..]),
        None => (target, ""),
    };

    Some(LinkSpan {
        start,
        end: close_at + close.len(),
        escaped,
        note,
        heading,
        alias,
    })
}

/// Rewrite every link in `text` matched by one of `rules`.
///
/// Returns the new text and the number of link tokens replaced, or `None`
/// when no link matched (the text is unchanged). The first matching rule
/// wins per link.
#[must_use]
pub fn rewrite_text(text: &str, rules: &[RewriteRule<'_>]) -> Option<(String, usize)> {
    let spans = scan_links(text);
    let mut output = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut replaced = 0;

    for span in &spans {
        let Some(rule) = rules
            .iter()
            .find(|r| r.old_note == span.note && r.old_heading == span.heading)
        else {
            continue;
        };
        output.push_str(&text[cursor..span.start]);
        push_token(&mut output, span, rule);
        cursor = span.end;
        replaced += 1;
    }

    if replaced == 0 {
        return None;
    }
    output.push_str(&text[cursor..]);
    Some((output, replaced))
}

fn push_token(output: &mut String, span: &LinkSpan<'_>, rule: &RewriteRule<'_>) {
    let (open, close) = if span.escaped {
        (r"\[\[", r"\]\]")
    } else {
        ("[[", "]]")
    };
    output.push_str(open);
    output.push_str(rule.new_note);
    output.push('#');
    output.push_str(rule.new_heading);
    if let Some(alias) = span.alias {
        output.push_str(alias);
    }
    output.push_str(close);
}
