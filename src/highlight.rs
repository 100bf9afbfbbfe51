//! Pattern-based highlighting for fenced code bodies.
//!
//! The tokenizer is purely lexical. Every entry of [`PATTERNS`] is searched
//! in the unconsumed suffix; the match starting earliest wins and ties go to
//! the entry declared first. This is not regex alternation, which would pick
//! whichever alternative matches at the first position any of them can.
//!
//! Word boundaries and word characters are ASCII, so `é1` still yields a
//! number token.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::block::{Token, TokenClass};

const KEYWORDS: &[&str] = &[
    "def", "class", "if", "elif", "else", "for", "while", "return", "import", "from", "as", "try",
    "except", "finally", "raise", "with", "yield", "lambda", "pass", "break", "continue", "and",
    "or", "not", "in", "is", "global", "nonlocal", "assert", "del", "async", "await",
];

const LITERALS: &[&str] = &["True", "False", "None"];

const BUILTINS: &[&str] = &[
    "print",
    "len",
    "range",
    "int",
    "str",
    "float",
    "list",
    "dict",
    "set",
    "tuple",
    "type",
    "input",
    "open",
    "sorted",
    "enumerate",
    "zip",
    "map",
    "filter",
    "sum",
    "min",
    "max",
    "abs",
    "round",
    "isinstance",
    "hasattr",
    "getattr",
    "setattr",
    "super",
    "property",
    "staticmethod",
    "classmethod",
];

/// A lexical class and the regex defining it. When `group` is set, only
/// that capture group becomes the token.
struct Pattern {
    class: TokenClass,
    regex: Regex,
    group: usize,
}

impl Pattern {
    fn new(class: TokenClass, pattern: &str) -> Self {
        Self::with_group(class, pattern, 0)
    }

    fn with_group(class: TokenClass, pattern: &str, group: usize) -> Self {
        Self {
            class,
            regex: Regex::new(pattern).unwrap(),
            group,
        }
    }

    /// Byte range of the earliest match in `haystack`.
    fn find(&self, haystack: &str) -> Option<(usize, usize)> {
        if self.group == 0 {
            return self.regex.find(haystack).map(|m| (m.start(), m.end()));
        }
        let caps = self.regex.captures(haystack)?;
        caps.get(self.group).map(|m| (m.start(), m.end()))
    }
}

fn word_list(words: &[&str]) -> String {
    format!(r"(?-u:\b)(?:{})(?-u:\b)", words.join("|"))
}

/// Pattern table in priority order.
static PATTERNS: Lazy<Vec<Pattern>> = Lazy::new(|| {
    vec![
        Pattern::new(TokenClass::Comment, r"#[^\n]*"),
        Pattern::new(TokenClass::String, r#"(?s)""".*?"""|'''.*?'''"#),
        Pattern::new(TokenClass::String, r#""(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#),
        Pattern::new(TokenClass::Decorator, r"@[A-Za-z0-9_]+"),
        Pattern::new(TokenClass::Number, r"(?-u:\b)[0-9]+\.?[0-9]*(?-u:\b)"),
        Pattern::new(TokenClass::Keyword, &word_list(KEYWORDS)),
        Pattern::new(TokenClass::Boolean, &word_list(LITERALS)),
        Pattern::new(TokenClass::Builtin, &word_list(BUILTINS)),
        Pattern::with_group(
            TokenClass::Function,
            r"(?-u:\b)([A-Za-z_][A-Za-z0-9_]*)\s*\(",
            1,
        ),
        Pattern::new(TokenClass::Class, r"(?-u:\b)[A-Z][A-Za-z0-9_]*(?-u:\b)"),
    ]
});

/// Split a code body into highlighted tokens.
///
/// Concatenating the `text` of the returned tokens reproduces `code`
/// exactly.
pub fn tokenize(code: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut rest = code;

    while !rest.is_empty() {
        let Some((class, start, end)) = earliest_match(rest) else {
            break;
        };
        if start > 0 {
            tokens.push(Token::plain(&rest[..start]));
        }
        tokens.push(Token::classified(&rest[start..end], class));
        rest = &rest[end..];
    }

    if !rest.is_empty() {
        tokens.push(Token::plain(rest));
    }

    log::trace!("tokenized {} bytes into {} tokens", code.len(), tokens.len());
    tokens
}

/// The winning match over the whole table: lowest start, then table order.
fn earliest_match(haystack: &str) -> Option<(TokenClass, usize, usize)> {
    let mut best: Option<(TokenClass, usize, usize)> = None;

    for pattern in PATTERNS.iter() {
        let Some((start, end)) = pattern.find(haystack) else {
            continue;
        };
        // An empty match would stall the scan.
        if end == start {
            continue;
        }
        match best {
            Some((_, best_start, _)) if best_start <= start => {}
            _ => best = Some((pattern.class, start, end)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn classes(code: &str) -> Vec<(String, Option<TokenClass>)> {
        tokenize(code)
            .into_iter()
            .map(|t| (t.text, t.class))
            .collect()
    }

    fn tok(text: &str, class: Option<TokenClass>) -> (String, Option<TokenClass>) {
        (text.to_string(), class)
    }

    #[test]
    fn print_call() {
        assert_eq!(
            classes("print(1)\n"),
            vec![
                tok("print", Some(TokenClass::Builtin)),
                tok("(", None),
                tok("1", Some(TokenClass::Number)),
                tok(")\n", None),
            ]
        );
    }

    #[test]
    fn function_definition() {
        assert_eq!(
            classes("def greet(name):\n    return None"),
            vec![
                tok("def", Some(TokenClass::Keyword)),
                tok(" ", None),
                tok("greet", Some(TokenClass::Function)),
                tok("(name):\n    ", None),
                tok("return", Some(TokenClass::Keyword)),
                tok(" ", None),
                tok("None", Some(TokenClass::Boolean)),
            ]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(
            classes("x = 1  # set x\ny"),
            vec![
                tok("x = ", None),
                tok("1", Some(TokenClass::Number)),
                tok("  ", None),
                tok("# set x", Some(TokenClass::Comment)),
                tok("\ny", None),
            ]
        );
    }

    #[test]
    fn hash_inside_string_stays_in_string() {
        assert_eq!(
            classes(r#"s = "a # b""#),
            vec![tok("s = ", None), tok(r#""a # b""#, Some(TokenClass::String))]
        );
    }

    #[test]
    fn escaped_quote_inside_string() {
        assert_eq!(
            classes(r#""say \"hi\"" x"#),
            vec![
                tok(r#""say \"hi\"""#, Some(TokenClass::String)),
                tok(" x", None),
            ]
        );
    }

    #[test]
    fn single_quoted_string_does_not_cross_lines() {
        assert_eq!(classes("'abc\nxyz'"), vec![tok("'abc\nxyz'", None)]);
    }

    #[test]
    fn triple_quoted_string_spans_lines() {
        assert_eq!(
            classes("\"\"\"doc\nstring\"\"\"\npass"),
            vec![
                tok("\"\"\"doc\nstring\"\"\"", Some(TokenClass::String)),
                tok("\n", None),
                tok("pass", Some(TokenClass::Keyword)),
            ]
        );
    }

    #[test]
    fn decorator_and_class() {
        assert_eq!(
            classes("@dataclass\nclass Point:"),
            vec![
                tok("@dataclass", Some(TokenClass::Decorator)),
                tok("\n", None),
                tok("class", Some(TokenClass::Keyword)),
                tok(" ", None),
                tok("Point", Some(TokenClass::Class)),
                tok(":", None),
            ]
        );
    }

    #[test]
    fn constructor_call_is_function_not_class() {
        assert_eq!(
            classes("Point(1, 2.5)"),
            vec![
                tok("Point", Some(TokenClass::Function)),
                tok("(", None),
                tok("1", Some(TokenClass::Number)),
                tok(", ", None),
                tok("2.5", Some(TokenClass::Number)),
                tok(")", None),
            ]
        );
    }

    #[test]
    fn call_name_allows_space_before_paren() {
        assert_eq!(
            classes("foo (x)"),
            vec![tok("foo", Some(TokenClass::Function)), tok(" (x)", None)]
        );
    }

    #[rstest]
    #[case("define")]
    #[case("printer")]
    #[case("x2")]
    #[case("_True")]
    fn words_containing_reserved_names_stay_plain(#[case] code: &str) {
        assert_eq!(classes(code), vec![tok(code, None)]);
    }

    #[rstest]
    #[case("True", TokenClass::Boolean)]
    #[case("False", TokenClass::Boolean)]
    #[case("lambda", TokenClass::Keyword)]
    #[case("await", TokenClass::Keyword)]
    #[case("isinstance", TokenClass::Builtin)]
    #[case("42", TokenClass::Number)]
    #[case("10", TokenClass::Number)]
    #[case("Widget", TokenClass::Class)]
    fn single_word_classes(#[case] code: &str, #[case] class: TokenClass) {
        assert_eq!(classes(code), vec![tok(code, Some(class))]);
    }

    #[test]
    fn earliest_start_beats_priority() {
        assert_eq!(
            classes("Foo # x"),
            vec![
                tok("Foo", Some(TokenClass::Class)),
                tok(" ", None),
                tok("# x", Some(TokenClass::Comment)),
            ]
        );
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        assert_eq!(
            classes("3."),
            vec![tok("3", Some(TokenClass::Number)), tok(".", None)]
        );
    }

    #[test]
    fn empty_code_has_no_tokens() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn non_ascii_letters_are_not_word_characters() {
        assert_eq!(
            classes("é1"),
            vec![tok("é", None), tok("1", Some(TokenClass::Number))]
        );
    }

    #[test]
    fn reconstructs_input() {
        let code = "import os\n\n@cache\ndef f(x=0.5):\n    '''doc'''\n    return os.path(x)  # ok\n";
        let joined: String = tokenize(code).into_iter().map(|t| t.text).collect();
        assert_eq!(joined, code);
    }
}
