use crate::block::{Block, Span, Token};
use crate::config::Config;

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    out.push('\n');

    for block in blocks {
        emit_block(block, config, &mut out);
    }

    out
}

fn emit_block(block: &Block, config: &Config, out: &mut String) {
    match block {
        Block::Paragraph { content } => {
            spans_to_typst(content, out);
            out.push_str("\n\n");
        }
        Block::UnorderedList { items } => list_to_typst(items, "-", out),
        Block::OrderedList { items } => list_to_typst(items, "+", out),
        Block::Blockquote { content } => {
            out.push_str("#quote(block: true)[");
            spans_to_typst(content, out);
            out.push_str("]\n\n");
        }
        Block::Callout { content } => {
            out.push_str(&format!(
                "#block(fill: rgb({}), stroke: rgb({}), inset: 8pt, radius: 4pt, width: 100%)[",
                typst_string(&config.callout.fill),
                typst_string(&config.callout.stroke),
            ));
            spans_to_typst(content, out);
            out.push_str("]\n\n");
        }
        Block::CodeBlock { language, tokens } => {
            // Keep code blocks together when possible
            out.push_str("#block(breakable: false)[\n");
            if let Some(lang) = language.as_deref().filter(|_| config.code.show_language) {
                out.push_str("#text(size: 0.8em, fill: luma(110))[");
                escape_text(lang, out);
                out.push_str("]\n");
            }
            out.push_str(&format!(
                "#block(fill: rgb({}), inset: 8pt, radius: 4pt, width: 100%)[\n",
                typst_string(&config.code.background),
            ));
            tokens_to_typst(tokens, config, out);
            out.push_str("\n]\n]\n\n");
        }
    }
}

fn list_to_typst(items: &[Vec<Span>], prefix: &str, out: &mut String) {
    // Wrap list to keep together when small, allow breaks when large
    let keep_together = items.len() <= 5;
    if keep_together {
        out.push_str("#block(breakable: false)[\n");
    }
    for item in items {
        out.push_str(prefix);
        out.push(' ');
        spans_to_typst(item, out);
        out.push('\n');
    }
    if keep_together {
        out.push_str("]\n");
    }
    out.push('\n');
}

fn spans_to_typst(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(text) => escape_text(text, out),
            Span::Bold(text) => {
                out.push('*');
                escape_text(text, out);
                out.push('*');
            }
            Span::Code(text) => {
                // Code spans never contain backticks
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for (n, line) in text.split('\n').enumerate() {
        if n > 0 {
            out.push_str(" \\\n");
        }
        escape_line(line, out);
    }
}

fn escape_line(line: &str, out: &mut String) {
    // A line opening with `12. ` would start an enum item
    let marker_dot = enum_marker_dot(line);

    // Escape special Typst characters
    for (i, ch) in line.char_indices() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '-' | '+'
            | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            '.' if marker_dot == Some(i) => out.push_str("\\."),
            _ => out.push(ch),
        }
    }
}

/// Byte offset of the `.` in a leading `<digits>.` followed by whitespace or
/// the end of the line.
fn enum_marker_dot(line: &str) -> Option<usize> {
    let indent = line.len() - line.trim_start().len();
    let rest = &line[indent..];
    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let after = rest[digits..].strip_prefix('.')?;
    if digits > 0 && (after.is_empty() || after.starts_with(char::is_whitespace)) {
        Some(indent + digits)
    } else {
        None
    }
}

/// Emit tokens as coloured raw text, hiding leading and trailing blank lines
/// of the body. Lines are joined with explicit line breaks.
fn tokens_to_typst(tokens: &[Token], config: &Config, out: &mut String) {
    let body: String = tokens.iter().map(|t| t.text.as_str()).collect();
    let shown_start = body.len() - body.trim_start_matches('\n').len();
    let shown_end = body.trim_end_matches('\n').len().max(shown_start);

    let mut offset = 0;
    for token in tokens {
        let (start, end) = (offset, offset + token.text.len());
        offset = end;

        let (from, to) = (start.max(shown_start), end.min(shown_end));
        if from >= to {
            continue;
        }
        let visible = &token.text[from - start..to - start];

        for (n, line) in visible.split('\n').enumerate() {
            if n > 0 {
                out.push_str("#linebreak()\n");
            }
            if line.is_empty() {
                continue;
            }
            match token.class {
                Some(class) => out.push_str(&format!(
                    "#text(fill: rgb({}), raw({}))",
                    typst_string(config.theme.color_for(class)),
                    typst_string(line),
                )),
                None => out.push_str(&format!("#raw({})", typst_string(line))),
            }
        }
    }
}

/// Quote a value as a Typst string literal.
fn typst_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' | '\\' => {
                quoted.push('\\');
                quoted.push(ch);
            }
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
