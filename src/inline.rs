use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::block::Span;

// `.` stops at line breaks, so bold never spans lines.
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// Split block text into plain, bold and inline code spans.
///
/// Single left-to-right pass: whichever of the two patterns matches
/// earliest in the remaining text wins, bold on a tie. Markers are
/// dropped; their content is kept verbatim.
pub fn format_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let bold = BOLD.captures(rest);
        let code = CODE.captures(rest);

        let (caps, is_code) = match (bold, code) {
            (Some(b), Some(c)) => {
                if start_of(&c) < start_of(&b) {
                    (c, true)
                } else {
                    (b, false)
                }
            }
            (Some(b), None) => (b, false),
            (None, Some(c)) => (c, true),
            (None, None) => break,
        };

        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if whole.start() > 0 {
            spans.push(Span::Text(rest[..whole.start()].to_string()));
        }
        let inner = inner.as_str().to_string();
        spans.push(if is_code {
            Span::Code(inner)
        } else {
            Span::Bold(inner)
        });
        rest = &rest[whole.end()..];
    }

    if !rest.is_empty() {
        spans.push(Span::Text(rest.to_string()));
    }

    spans
}

fn start_of(caps: &Captures) -> usize {
    caps.get(0).map_or(usize::MAX, |m| m.start())
}
