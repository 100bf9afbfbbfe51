use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Block, Span};
use crate::highlight::tokenize;
use crate::inline::format_inline;

/// A fenced code block: optional language tag, one optional line break,
/// then the body up to the next fence.
static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```([A-Za-z0-9_]*)\n?(.*?)```").unwrap());
static UNORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*•]\s+").unwrap());
static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9]+[.、]\s+").unwrap());

const CALLOUT_GLYPH: char = '⚠';
const QUOTE_PREFIX: &str = "> ";

/// Parse lesson markup into a list of blocks
pub fn parse(content: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut last = 0;

    for caps in FENCE.captures_iter(content) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        parse_lines(&content[last..whole.start()], &mut blocks);

        let language = caps
            .get(1)
            .map(|m| m.as_str())
            .filter(|lang| !lang.is_empty())
            .map(str::to_string);
        blocks.push(Block::CodeBlock {
            language,
            tokens: tokenize(body.as_str()),
        });
        last = whole.end();
    }
    parse_lines(&content[last..], &mut blocks);

    log::debug!(
        "parsed {} blocks ({} code)",
        blocks.len(),
        blocks
            .iter()
            .filter(|b| matches!(b, Block::CodeBlock { .. }))
            .count()
    );
    blocks
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Blank,
    Callout,
    Quote,
    UnorderedItem,
    OrderedItem,
    /// A fence with no partner; never starts a code block, only ends a paragraph
    StrayFence,
    Text,
}

/// Classify a line. Checks run in a fixed order so overlapping shapes
/// resolve the same way every time.
fn classify(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with(CALLOUT_GLYPH) {
        LineKind::Callout
    } else if trimmed.starts_with(QUOTE_PREFIX) {
        LineKind::Quote
    } else if UNORDERED_MARKER.is_match(line) {
        LineKind::UnorderedItem
    } else if ORDERED_MARKER.is_match(line) {
        LineKind::OrderedItem
    } else if trimmed.starts_with("```") {
        LineKind::StrayFence
    } else {
        LineKind::Text
    }
}

/// Scan the lines of a fence-free partition. `i` only moves forward.
fn parse_lines(text: &str, blocks: &mut Vec<Block>) {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut i = 0;

    while i < lines.len() {
        let kind = classify(lines[i]);
        match kind {
            LineKind::Blank => {
                i += 1;
            }
            LineKind::Callout => {
                blocks.push(Block::Callout {
                    content: format_inline(lines[i].trim()),
                });
                i += 1;
            }
            LineKind::Quote => {
                let end = run_end(&lines, i, kind);
                let quoted: Vec<&str> = lines[i..end].iter().map(|l| strip_quote(l)).collect();
                log::trace!("blockquote over lines {}..{}", i, end);
                blocks.push(Block::Blockquote {
                    content: format_inline(&quoted.join("\n")),
                });
                i = end;
            }
            LineKind::UnorderedItem | LineKind::OrderedItem => {
                let end = run_end(&lines, i, kind);
                let marker = if kind == LineKind::UnorderedItem {
                    &*UNORDERED_MARKER
                } else {
                    &*ORDERED_MARKER
                };
                let items = list_items(&lines[i..end], marker);
                log::trace!("{} list items over lines {}..{}", items.len(), i, end);
                blocks.push(if kind == LineKind::UnorderedItem {
                    Block::UnorderedList { items }
                } else {
                    Block::OrderedList { items }
                });
                i = end;
            }
            LineKind::StrayFence | LineKind::Text => {
                // The first line always belongs to the paragraph, whatever it is.
                let end = run_end(&lines, i + 1, LineKind::Text).max(i + 1);
                blocks.push(Block::Paragraph {
                    content: format_inline(&lines[i..end].join("\n")),
                });
                i = end;
            }
        }
    }
}

/// Index one past the contiguous run of `kind` lines starting at `start`.
fn run_end(lines: &[&str], start: usize, kind: LineKind) -> usize {
    let mut end = start;
    while end < lines.len() && classify(lines[end]) == kind {
        end += 1;
    }
    end
}

fn strip_quote(line: &str) -> &str {
    let trimmed = line.trim();
    trimmed.strip_prefix(QUOTE_PREFIX).unwrap_or(trimmed)
}

fn list_items(lines: &[&str], marker: &Regex) -> Vec<Vec<Span>> {
    lines
        .iter()
        .map(|line| {
            let rest = marker.find(line).map_or(*line, |m| &line[m.end()..]);
            format_inline(rest)
        })
        .collect()
}
