//! Router registration paths
//!
//! The sanitizer reduces every placeholder to its bare name and leaves the
//! rest of the path as written.

use crate::error::TemplateError;
use crate::model;
use crate::parser::{parse_syntax, Piece, TemplateAst};

/// How bare placeholders are written in the registration path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// `{name}`
    #[default]
    Braces,
    /// `:name`, as Vert.x style routers expect
    Colon,
}

/// What happens to the `?...` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Drop it: routers register the path only
    #[default]
    Strip,
    /// Append it verbatim
    Keep,
}

/// Options for [`sanitize_with`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SanitizeOptions {
    pub style: PlaceholderStyle,
    pub query: QueryMode,
}

impl SanitizeOptions {
    /// Create options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder style
    pub fn with_style(mut self, style: PlaceholderStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the query section handling
    pub fn with_query(mut self, query: QueryMode) -> Self {
        self.query = query;
        self
    }
}

/// Derive the router registration path with default options
///
/// # Example
///
/// ```rust
/// use route_template::sanitize;
///
/// let path = sanitize("/users/{int:id}/posts/{long:post=1}").unwrap();
/// assert_eq!(path, "/users/{id}/posts/{post}");
/// ```
pub fn sanitize(template: &str) -> Result<String, TemplateError> {
    sanitize_with(template, &SanitizeOptions::default())
}

/// Derive the router registration path
///
/// The template is fully validated first, so this fails exactly when
/// [`crate::parse`] fails.
pub fn sanitize_with(template: &str, options: &SanitizeOptions) -> Result<String, TemplateError> {
    let ast = parse_syntax(template)?;
    model::build(&ast)?;
    Ok(render_path(&ast, template, options))
}

/// Render a validated syntax tree as a registration path
pub(crate) fn render_path(ast: &TemplateAst, source: &str, options: &SanitizeOptions) -> String {
    let mut out = String::with_capacity(source.len());

    for segment in &ast.segments {
        out.push('/');
        for piece in &segment.node.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Placeholder(p) => match options.style {
                    PlaceholderStyle::Braces => {
                        out.push('{');
                        out.push_str(&p.node.name.node);
                        out.push('}');
                    }
                    PlaceholderStyle::Colon => {
                        out.push(':');
                        out.push_str(&p.node.name.node);
                    }
                },
            }
        }
    }

    if let (QueryMode::Keep, Some(query)) = (options.query, &ast.query) {
        out.push_str(&source[query.span.clone()]);
    }

    out
}
