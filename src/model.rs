//! Parameter model produced from a template
//!
//! The model builder walks the syntax tree, checks type tags, names and
//! uniqueness, and produces an ordered, immutable [`ParseResult`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::TemplateError;
use crate::parser::{parse_syntax, Span, Spanned, TemplateAst};

/// Where a parameter is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Path,
    Query,
}

/// The fixed set of parameter types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Int,
    Long,
    String,
    Boolean,
    Float,
    Double,
    Timestamp,
}

impl ParamType {
    pub const ALL: [ParamType; 7] = [
        ParamType::Int,
        ParamType::Long,
        ParamType::String,
        ParamType::Boolean,
        ParamType::Float,
        ParamType::Double,
        ParamType::Timestamp,
    ];

    /// The lowercase tag used in templates
    pub fn tag(self) -> &'static str {
        match self {
            ParamType::Int => "int",
            ParamType::Long => "long",
            ParamType::String => "string",
            ParamType::Boolean => "boolean",
            ParamType::Float => "float",
            ParamType::Double => "double",
            ParamType::Timestamp => "timestamp",
        }
    }
}

impl FromStr for ParamType {
    type Err = ();

    /// Tags are case-sensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamType::ALL
            .into_iter()
            .find(|ty| ty.tag() == s)
            .ok_or(())
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One parsed placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    name: String,
    kind: ParamKind,
    ty: ParamType,
    default: Option<String>,
}

impl Param {
    pub fn new(
        name: impl Into<String>,
        kind: ParamKind,
        ty: ParamType,
        default: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn ty(&self) -> ParamType {
        self.ty
    }

    /// The default literal exactly as written after `=`
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ParamKind::Path => "path",
            ParamKind::Query => "query",
        };
        write!(f, "{} {}: {}", kind, self.name, self.ty)?;
        if let Some(default) = &self.default {
            write!(f, " = {}", default)?;
        }
        Ok(())
    }
}

/// Ordered path and query parameters of one template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseResult {
    path_params: Vec<Param>,
    query_params: Vec<Param>,
}

impl ParseResult {
    /// Path parameters, left to right
    pub fn path_params(&self) -> &[Param] {
        &self.path_params
    }

    /// Query parameters, in declared order
    pub fn query_params(&self) -> &[Param] {
        &self.query_params
    }

    /// All parameters: path first, then query
    ///
    /// This is also the field order of the generated holder.
    pub fn params(&self) -> impl Iterator<Item = &Param> {
        self.path_params.iter().chain(self.query_params.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.path_params.is_empty() && self.query_params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.path_params.len() + self.query_params.len()
    }
}

/// Parse a template into its parameter model
///
/// # Example
///
/// ```rust
/// use route_template::{parse, ParamType};
///
/// let result = parse("/users/{int:id}").unwrap();
/// assert_eq!(result.path_params()[0].name(), "id");
/// assert_eq!(result.path_params()[0].ty(), ParamType::Int);
/// ```
pub fn parse(template: &str) -> Result<ParseResult, TemplateError> {
    let ast = parse_syntax(template)?;
    build(&ast)
}

/// Validate a syntax tree and build the parameter model
///
/// Checks run per placeholder in source order, so the first offending
/// token is the one reported.
pub fn build(ast: &TemplateAst) -> Result<ParseResult, TemplateError> {
    let mut seen: HashMap<String, Span> = HashMap::new();
    let mut result = ParseResult::default();

    for placeholder in ast.placeholders() {
        let decl = &placeholder.node;
        let param = build_param(
            &decl.type_tag,
            &decl.name,
            decl.default.as_ref(),
            ParamKind::Path,
            &mut seen,
        )?;
        result.path_params.push(param);
    }

    for query in ast.query_decls() {
        let decl = &query.node;
        let param = build_param(
            &decl.type_tag,
            &decl.name,
            decl.default.as_ref(),
            ParamKind::Query,
            &mut seen,
        )?;
        result.query_params.push(param);
    }

    Ok(result)
}

fn build_param(
    type_tag: &Spanned<String>,
    name: &Spanned<String>,
    default: Option<&Spanned<String>>,
    kind: ParamKind,
    seen: &mut HashMap<String, Span>,
) -> Result<Param, TemplateError> {
    // Path placeholders read type first; query declarations read name first
    let check_type = || {
        type_tag
            .node
            .parse::<ParamType>()
            .map_err(|()| TemplateError::UnknownType {
                token: type_tag.node.clone(),
                position: type_tag.span.start,
            })
    };
    let check_name = || {
        if is_identifier(&name.node) {
            Ok(())
        } else {
            Err(TemplateError::InvalidIdentifier {
                token: name.node.clone(),
                position: name.span.start,
            })
        }
    };

    let ty = match kind {
        ParamKind::Path => {
            let ty = check_type()?;
            check_name()?;
            ty
        }
        ParamKind::Query => {
            check_name()?;
            check_type()?
        }
    };

    if let Some(first) = seen.get(&name.node) {
        return Err(TemplateError::DuplicateParameter {
            name: name.node.clone(),
            span: name.span.clone(),
            first: first.clone(),
        });
    }
    seen.insert(name.node.clone(), name.span.clone());

    Ok(Param::new(
        name.node.clone(),
        kind,
        ty,
        default.map(|d| d.node.clone()),
    ))
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
