use crate::block::{Block, Span};

/// Write blocks back to lesson markup, one blank line between blocks.
pub fn to_markup(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(block_to_markup)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn block_to_markup(block: &Block) -> String {
    match block {
        Block::Paragraph { content } | Block::Callout { content } => spans_to_markup(content),
        Block::Blockquote { content } => spans_to_markup(content)
            .split('\n')
            .map(|line| format!("> {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::UnorderedList { items } => items
            .iter()
            .map(|item| format!("- {}", spans_to_markup(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::OrderedList { items } => items
            .iter()
            .enumerate()
            .map(|(n, item)| format!("{}. {}", n + 1, spans_to_markup(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Block::CodeBlock { language, tokens } => {
            let mut out = String::from("```");
            if let Some(lang) = language {
                out.push_str(lang);
            }
            out.push('\n');
            for token in tokens {
                out.push_str(&token.text);
            }
            out.push_str("```");
            out
        }
    }
}

fn spans_to_markup(spans: &[Span]) -> String {
    let mut out = String::new();
    for span in spans {
        let marker = match span {
            Span::Text(_) => "",
            Span::Bold(_) => "**",
            Span::Code(_) => "`",
        };
        out.push_str(marker);
        out.push_str(span.text());
        out.push_str(marker);
    }
    out
}
