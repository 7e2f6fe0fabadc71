//! Code emission from a parameter model
//!
//! The emitter turns a [`ParseResult`] into Java source text: one extraction
//! statement per parameter, reading from a `RequestParser`, and a holder
//! record whose components follow the same order.

mod config;
pub mod java;
pub mod unit;

pub use config::{EmitConfig, UnitConfig, DEFAULT_RUNTIME_PACKAGE};
pub use unit::{render_unit, UnitSpec};

use thiserror::Error;

use crate::model::{Param, ParamKind, ParamType, ParseResult};

/// Errors that can occur while emitting code
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// No rendering rule exists for the parameter's type
    #[error("unsupported type {ty} for parameter '{name}'")]
    UnsupportedType { name: String, ty: ParamType },

    /// The default literal cannot be coerced to the declared type
    #[error("default '{literal}' of parameter '{name}' is not a valid {ty}")]
    InvalidDefault {
        name: String,
        ty: ParamType,
        literal: String,
    },

    /// The name would not compile as a local variable or record component
    #[error("parameter name '{name}' is reserved in generated code")]
    ReservedName { name: String },
}

/// Text produced for one template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emitted {
    /// `record Params(int id, String name) {}`
    pub holder_decl: String,
    /// One statement per parameter, path first then query
    pub extractions: Vec<String>,
}

impl Emitted {
    /// Constructor arguments for the holder, in field order
    pub fn holder_args(result: &ParseResult) -> String {
        result
            .params()
            .map(Param::name)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Renders extraction statements and holder declarations
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    config: EmitConfig,
}

impl Emitter {
    pub fn new(config: EmitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// Emit code for every parameter of `result`
    pub fn emit(&self, result: &ParseResult) -> Result<Emitted, EmitError> {
        let mut extractions = Vec::with_capacity(result.len());
        let mut fields = Vec::with_capacity(result.len());

        for param in result.params() {
            self.check_name(param)?;
            let java = java::java_type(param)?;
            extractions.push(self.extraction(param, java)?);
            fields.push(format!("{} {}", java.field, param.name()));
        }

        Ok(Emitted {
            holder_decl: format!(
                "record {}({}) {{}}",
                self.config.holder_name,
                fields.join(", ")
            ),
            extractions,
        })
    }

    fn check_name(&self, param: &Param) -> Result<(), EmitError> {
        let name = param.name();
        if java::is_keyword(name)
            || java::is_referenced_class(name)
            || name == self.config.accessor
            || self.config.reserved.iter().any(|r| r == name)
        {
            return Err(EmitError::ReservedName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn extraction(&self, param: &Param, java: &java::JavaType) -> Result<String, EmitError> {
        let getter = match param.kind() {
            ParamKind::Path => "getPathParam",
            ParamKind::Query => "getQueryParam",
        };
        let name = param.name();

        let statement = match param.default() {
            Some(raw) => format!(
                "{} {} = {}.{}(\"{}\", {}, {}.create());",
                java.boxed,
                name,
                self.config.accessor,
                getter,
                name,
                java::default_literal(param, raw)?,
                java.parser
            ),
            None => format!(
                "{} {} = {}.{}(\"{}\", {}.create());",
                java.boxed, name, self.config.accessor, getter, name, java.parser
            ),
        };
        Ok(statement)
    }
}

/// Emit code with the default configuration
///
/// # Example
///
/// ```rust
/// use route_template::{emit, parse};
///
/// let code = emit(&parse("/users/{int:id}").unwrap()).unwrap();
/// assert_eq!(code.holder_decl, "record Params(int id) {}");
/// assert_eq!(
///     code.extractions,
///     vec![r#"Integer id = rp.getPathParam("id", IntegerParser.create());"#]
/// );
/// ```
pub fn emit(result: &ParseResult) -> Result<Emitted, EmitError> {
    Emitter::default().emit(result)
}
