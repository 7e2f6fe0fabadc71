//! Lexer for route templates using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Template tokens.
///
/// Whitespace is not skipped: it belongs to literal text, and a name or type
/// tag containing it is rejected later by the model builder.
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Separators
    #[token("/")]
    Slash,
    #[token("?")]
    Question,
    #[token("&")]
    Amp,

    // Placeholder delimiters
    #[token("{")]
    BraceOpen,
    #[token("}")]
    BraceClose,
    #[token(":")]
    Colon,
    #[token("=")]
    Equals,

    // Everything else up to the next structural character
    #[regex(r"[^/?&{}:=]+", |lex| lex.slice().to_string())]
    Text(String),
}

impl Token {
    /// The exact source text this token was lexed from
    pub fn as_source(&self) -> &str {
        match self {
            Token::Slash => "/",
            Token::Question => "?",
            Token::Amp => "&",
            Token::BraceOpen => "{",
            Token::BraceClose => "}",
            Token::Colon => ":",
            Token::Equals => "=",
            Token::Text(s) => s,
        }
    }
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
