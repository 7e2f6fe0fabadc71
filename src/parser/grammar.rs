//! Template grammar using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::TemplateError;
use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse a template into its syntax tree
///
/// Only the structure is checked here. Type tags, names and duplicate
/// detection are the model builder's job so that their errors can carry
/// precise, typed context.
pub fn parse_syntax(input: &str) -> Result<TemplateAst, TemplateError> {
    // A template without any path segment is empty, whatever follows
    if input.trim().is_empty() || input.starts_with('?') {
        return Err(TemplateError::EmptyTemplate);
    }

    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    template_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            // Report the first failure only; later ones are usually fallout
            errs.into_iter()
                .map(TemplateError::from)
                .next()
                .unwrap_or_else(|| TemplateError::Syntax {
                    span: 0..len,
                    message: "Malformed template".to_string(),
                    expected: vec![],
                })
        })
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn template_parser<'a, I>() -> impl Parser<'a, I, TemplateAst, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let text = select! {
        Token::Text(s) => s,
    }
    .map_with(|s, e| Spanned::new(s, span_range(&e.span())));

    // Default literals run up to the closing brace and are kept verbatim,
    // so `2024-01-01T00:00:00Z` survives its colons
    let default = just(Token::Equals).ignore_then(
        any()
            .filter(|t: &Token| !matches!(t, Token::BraceOpen | Token::BraceClose))
            .map(|t: Token| t.as_source().to_string())
            .repeated()
            .at_least(1)
            .collect::<Vec<_>>()
            .map_with(|parts, e| Spanned::new(parts.concat(), span_range(&e.span()))),
    );

    // {type:name} or {type:name=default}
    let placeholder = just(Token::BraceOpen)
        .ignore_then(text.clone())
        .then_ignore(just(Token::Colon))
        .then(text.clone())
        .then(default.clone().or_not())
        .then_ignore(just(Token::BraceClose))
        .map_with(|((type_tag, name), default), e| {
            Spanned::new(
                PlaceholderDecl {
                    type_tag,
                    name,
                    default,
                },
                span_range(&e.span()),
            )
        });

    let literal = select! {
        Token::Text(s) => s,
        Token::Colon => ":".to_string(),
        Token::Equals => "=".to_string(),
        Token::Amp => "&".to_string(),
    }
    .repeated()
    .at_least(1)
    .collect::<Vec<_>>()
    .map(|parts| parts.concat());

    let piece = choice((
        placeholder.map(Piece::Placeholder),
        literal.map(Piece::Literal),
    ));

    // A segment may be empty (trailing slash) or mix literals and placeholders
    let segment = just(Token::Slash)
        .ignore_then(piece.repeated().collect::<Vec<_>>())
        .map_with(|pieces, e| Spanned::new(Segment { pieces }, span_range(&e.span())));

    // name={type} or name={type=default}
    let query_param = text
        .clone()
        .then_ignore(just(Token::Equals))
        .then_ignore(just(Token::BraceOpen))
        .then(text)
        .then(default.or_not())
        .then_ignore(just(Token::BraceClose))
        .map_with(|((name, type_tag), default), e| {
            Spanned::new(
                QueryDecl {
                    name,
                    type_tag,
                    default,
                },
                span_range(&e.span()),
            )
        });

    let query = just(Token::Question)
        .ignore_then(
            query_param
                .separated_by(just(Token::Amp))
                .at_least(1)
                .collect::<Vec<_>>(),
        )
        .map_with(|decls, e| Spanned::new(decls, span_range(&e.span())));

    segment
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .then(query.or_not())
        .then_ignore(end())
        .map(|(segments, query)| TemplateAst { segments, query })
}
