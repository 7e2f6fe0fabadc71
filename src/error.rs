//! Error types for parsing and validating templates

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Errors raised while parsing or sanitizing a template
///
/// Every variant is terminal for the template being processed. Positions are
/// byte offsets into the template string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template is empty or has no path segment
    #[error("template is empty or has no path segment")]
    EmptyTemplate,

    /// A placeholder names a type outside the fixed set
    #[error("unknown parameter type '{token}' at offset {position}")]
    UnknownType { token: String, position: usize },

    /// A parameter name is not a valid identifier
    #[error("invalid parameter name '{token}' at offset {position}")]
    InvalidIdentifier { token: String, position: usize },

    /// The same name is declared twice (path or query)
    #[error("duplicate parameter '{name}'")]
    DuplicateParameter {
        name: String,
        span: Span,
        first: Span,
    },

    /// Any other grammar violation
    #[error("syntax error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl TemplateError {
    /// Source range the error points at
    pub fn span(&self) -> Span {
        match self {
            TemplateError::EmptyTemplate => 0..0,
            TemplateError::UnknownType { token, position }
            | TemplateError::InvalidIdentifier { token, position } => {
                *position..*position + token.len()
            }
            TemplateError::DuplicateParameter { span, .. } => span.clone(),
            TemplateError::Syntax { span, .. } => span.clone(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.span();
        let mut report = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string());

        match self {
            TemplateError::Syntax { expected, .. } => {
                let expected_str = if expected.is_empty() {
                    "here".to_string()
                } else {
                    format!("expected {}", expected.join(", "))
                };
                report = report.with_label(
                    Label::new((filename, span))
                        .with_message(expected_str)
                        .with_color(Color::Red),
                );
            }
            TemplateError::DuplicateParameter { first, .. } => {
                report = report
                    .with_label(
                        Label::new((filename, span))
                            .with_message("declared again here")
                            .with_color(Color::Red),
                    )
                    .with_label(
                        Label::new((filename, first.clone()))
                            .with_message("first declared here")
                            .with_color(Color::Blue),
                    );
            }
            TemplateError::UnknownType { .. } => {
                report = report
                    .with_label(
                        Label::new((filename, span))
                            .with_message("not a parameter type")
                            .with_color(Color::Red),
                    )
                    .with_help(
                        "valid types are int, long, string, boolean, float, double, timestamp",
                    );
            }
            TemplateError::InvalidIdentifier { .. } => {
                report = report.with_label(
                    Label::new((filename, span))
                        .with_message("names must match [A-Za-z_][A-Za-z0-9_]*")
                        .with_color(Color::Red),
                );
            }
            TemplateError::EmptyTemplate => {}
        }

        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = report
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for TemplateError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of template".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of template".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("'{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        TemplateError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Text(s) => format!("text '{}'", s),
        other => format!("'{}'", other.as_source()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            TemplateError::UnknownType {
                token: "foo".to_string(),
                position: 4
            }
            .to_string(),
            "unknown parameter type 'foo' at offset 4"
        );
        assert_eq!(
            TemplateError::DuplicateParameter {
                name: "n".to_string(),
                span: 12..22,
                first: 3..10
            }
            .to_string(),
            "duplicate parameter 'n'"
        );
    }

    #[test]
    fn test_span_of_positional_errors() {
        let err = TemplateError::InvalidIdentifier {
            token: "9lives".to_string(),
            position: 8,
        };
        assert_eq!(err.span(), 8..14);
        assert_eq!(TemplateError::EmptyTemplate.span(), 0..0);
    }

    #[test]
    fn test_format_includes_source() {
        let source = "/x/{foo:bar}";
        let err = TemplateError::UnknownType {
            token: "foo".to_string(),
            position: 4,
        };
        let report = err.format(source, "route");
        assert!(report.contains("unknown parameter type 'foo'"));
    }
}
