//! Syntax tree for route templates
//!
//! This is the purely syntactic shape of a template. Type tags and names are
//! kept as raw text here; the model builder validates them.

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Root node - a complete template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAst {
    /// Path segments, each introduced by a `/`
    pub segments: Vec<Spanned<Segment>>,
    /// Query declarations after `?`, if any
    pub query: Option<Spanned<Vec<Spanned<QueryDecl>>>>,
}

/// One `/`-separated path segment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    pub pieces: Vec<Piece>,
}

/// A run of literal text or a single placeholder inside a segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// Literal text, copied verbatim
    Literal(String),
    /// `{type:name}` or `{type:name=default}`
    Placeholder(Spanned<PlaceholderDecl>),
}

/// A path placeholder as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderDecl {
    pub type_tag: Spanned<String>,
    pub name: Spanned<String>,
    pub default: Option<Spanned<String>>,
}

/// A query parameter declaration: `name={type}` or `name={type=default}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDecl {
    pub name: Spanned<String>,
    pub type_tag: Spanned<String>,
    pub default: Option<Spanned<String>>,
}

impl TemplateAst {
    /// Iterate the path placeholders left to right
    pub fn placeholders(&self) -> impl Iterator<Item = &Spanned<PlaceholderDecl>> {
        self.segments.iter().flat_map(|seg| {
            seg.node.pieces.iter().filter_map(|piece| match piece {
                Piece::Placeholder(p) => Some(p),
                Piece::Literal(_) => None,
            })
        })
    }

    /// Iterate the query declarations in declared order
    pub fn query_decls(&self) -> impl Iterator<Item = &Spanned<QueryDecl>> {
        self.query.iter().flat_map(|q| q.node.iter())
    }
}
