use serde::Serialize;

/// Parsed lesson section, in source order.
pub type Document = Vec<Block>;

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    /// Content between `**` markers, stored verbatim
    Bold(String),
    /// Content between backticks, stored verbatim
    Code(String),
}

impl Span {
    /// The span's content without its markers.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Code(text) => text,
        }
    }
}

/// Lexical class of a highlighted code token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Comment,
    String,
    Decorator,
    Number,
    Keyword,
    /// `True`, `False` and `None`
    Boolean,
    Builtin,
    /// Identifier directly followed by an opening parenthesis
    Function,
    /// Capitalized, type-like name
    Class,
}

/// A slice of a code block body. `class` is `None` for plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub text: String,
    pub class: Option<TokenClass>,
}

impl Token {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    pub fn classified(text: impl Into<String>, class: TokenClass) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
        }
    }
}

/// Block-level elements parsed from lesson markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph {
        content: Vec<Span>,
    },
    UnorderedList {
        items: Vec<Vec<Span>>,
    },
    OrderedList {
        items: Vec<Vec<Span>>,
    },
    /// Quote lines joined with `\n` before inline formatting
    Blockquote {
        content: Vec<Span>,
    },
    /// Single-line warning callout, glyph included
    Callout {
        content: Vec<Span>,
    },
    CodeBlock {
        language: Option<String>,
        tokens: Vec<Token>,
    },
}

impl Block {
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::UnorderedList { .. } => "unordered_list",
            Block::OrderedList { .. } => "ordered_list",
            Block::Blockquote { .. } => "blockquote",
            Block::Callout { .. } => "callout",
            Block::CodeBlock { .. } => "code_block",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_text_drops_markers() {
        assert_eq!(Span::Bold("b".to_string()).text(), "b");
        assert_eq!(Span::Code("c".to_string()).text(), "c");
    }

    #[test]
    fn token_constructors() {
        assert_eq!(Token::plain(" ").class, None);
        let kw = Token::classified("def", TokenClass::Keyword);
        assert_eq!(kw.class, Some(TokenClass::Keyword));
    }
}
