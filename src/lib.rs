//! Route Template - a compiler for typed URL templates
//!
//! Route declarations carry templates such as
//! `/users/{int:id}/posts/{string:slug=latest}?limit={int=20}`. This library
//! parses them into an ordered parameter model, derives the bare path a
//! router registers, and emits typed Java extraction code for each
//! parameter.
//!
//! # Example
//!
//! ```rust
//! use route_template::compile;
//!
//! let route = compile("/users/{int:id}").unwrap();
//! assert_eq!(route.path, "/users/{id}");
//! assert_eq!(route.code.holder_decl, "record Params(int id) {}");
//! ```

pub mod emitter;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod model;
pub mod parser;
pub mod sanitizer;

pub use emitter::{emit, EmitConfig, EmitError, Emitted, Emitter, UnitConfig, UnitSpec};
pub use error::TemplateError;
pub use manifest::{Manifest, ManifestError, RouteDecl};
pub use model::{parse, Param, ParamKind, ParamType, ParseResult};
pub use sanitizer::{sanitize, sanitize_with, PlaceholderStyle, QueryMode, SanitizeOptions};

use thiserror::Error;

/// Errors that can occur while compiling one template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The template is malformed
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// The template parsed but cannot be rendered
    #[error("emit error: {0}")]
    Emit(#[from] EmitError),
}

impl CompileError {
    /// Format the error against the template it came from
    pub fn format(&self, template: &str, filename: &str) -> String {
        match self {
            CompileError::Template(e) => e.format(template, filename),
            CompileError::Emit(e) => format!("Error: {} (in {})\n", e, filename),
        }
    }
}

/// Configuration for the complete compile pipeline
#[derive(Debug, Clone, Default)]
pub struct CompileConfig {
    /// Registration path options
    pub sanitize: SanitizeOptions,
    /// Code emission options
    pub emit: EmitConfig,
}

impl CompileConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the registration path options
    pub fn with_sanitize(mut self, options: SanitizeOptions) -> Self {
        self.sanitize = options;
        self
    }

    /// Set the emission options
    pub fn with_emit(mut self, config: EmitConfig) -> Self {
        self.emit = config;
        self
    }
}

/// Everything produced from one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledRoute {
    /// Router registration path
    pub path: String,
    /// Parsed parameter model
    pub params: ParseResult,
    /// Holder declaration and extraction statements
    pub code: Emitted,
}

/// Compile a template with default configuration
pub fn compile(template: &str) -> Result<CompiledRoute, CompileError> {
    compile_with_config(template, &CompileConfig::default())
}

/// Compile a template with custom configuration
///
/// # Example
///
/// ```rust
/// use route_template::{compile_with_config, CompileConfig, PlaceholderStyle, SanitizeOptions};
///
/// let config = CompileConfig::new()
///     .with_sanitize(SanitizeOptions::new().with_style(PlaceholderStyle::Colon));
///
/// let route = compile_with_config("/users/{int:id}", &config).unwrap();
/// assert_eq!(route.path, "/users/:id");
/// ```
pub fn compile_with_config(
    template: &str,
    config: &CompileConfig,
) -> Result<CompiledRoute, CompileError> {
    // Parse once; the sanitizer and the model share the same tree
    let ast = parser::parse_syntax(template)?;
    let params = model::build(&ast)?;
    let path = sanitizer::render_path(&ast, template, &config.sanitize);
    let code = Emitter::new(config.emit.clone()).emit(&params)?;

    Ok(CompiledRoute { path, params, code })
}
