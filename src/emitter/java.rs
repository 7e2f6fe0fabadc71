//! Java rendering rules: type table, literals and reserved words

use chrono::DateTime;

use crate::model::{Param, ParamType};

use super::EmitError;

/// How one parameter type is spelled in generated Java
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaType {
    pub ty: ParamType,
    /// Local variable type, the boxed form the parsers return
    pub boxed: &'static str,
    /// Holder field type
    pub field: &'static str,
    /// Parser class, instantiated with `create()`
    pub parser: &'static str,
}

const JAVA_TYPES: &[JavaType] = &[
    JavaType {
        ty: ParamType::Int,
        boxed: "Integer",
        field: "int",
        parser: "IntegerParser",
    },
    JavaType {
        ty: ParamType::Long,
        boxed: "Long",
        field: "long",
        parser: "LongParser",
    },
    JavaType {
        ty: ParamType::String,
        boxed: "String",
        field: "String",
        parser: "StringParser",
    },
    JavaType {
        ty: ParamType::Boolean,
        boxed: "Boolean",
        field: "boolean",
        parser: "BooleanParser",
    },
    JavaType {
        ty: ParamType::Float,
        boxed: "Float",
        field: "float",
        parser: "FloatParser",
    },
    JavaType {
        ty: ParamType::Double,
        boxed: "Double",
        field: "double",
        parser: "DoubleParser",
    },
    JavaType {
        ty: ParamType::Timestamp,
        boxed: "Instant",
        field: "Instant",
        parser: "InstantParser",
    },
];

/// Look up the Java spelling of a parameter's type
pub fn java_type(param: &Param) -> Result<&'static JavaType, EmitError> {
    JAVA_TYPES
        .iter()
        .find(|row| row.ty == param.ty())
        .ok_or_else(|| EmitError::UnsupportedType {
            name: param.name().to_string(),
            ty: param.ty(),
        })
}

/// Coerce a raw default to a Java expression of the parameter's type
pub fn default_literal(param: &Param, raw: &str) -> Result<String, EmitError> {
    let invalid = || EmitError::InvalidDefault {
        name: param.name().to_string(),
        ty: param.ty(),
        literal: raw.to_string(),
    };

    match param.ty() {
        ParamType::Int => raw
            .parse::<i32>()
            .map(|v| v.to_string())
            .map_err(|_| invalid()),
        ParamType::Long => raw
            .parse::<i64>()
            .map(|v| format!("{}L", v))
            .map_err(|_| invalid()),
        ParamType::Float => match raw.parse::<f32>() {
            Ok(v) if v.is_finite() && !underflows(raw, v == 0.0) => Ok(format!("{}f", v)),
            _ => Err(invalid()),
        },
        ParamType::Double => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && !underflows(raw, v == 0.0) => Ok(format!("{}d", v)),
            _ => Err(invalid()),
        },
        ParamType::Boolean => {
            if raw.eq_ignore_ascii_case("true") {
                Ok("true".to_string())
            } else if raw.eq_ignore_ascii_case("false") {
                Ok("false".to_string())
            } else {
                Err(invalid())
            }
        }
        ParamType::String => Ok(format!("\"{}\"", escape_string(raw))),
        ParamType::Timestamp => {
            if is_instant(raw) {
                Ok(format!("Instant.parse(\"{}\")", raw))
            } else {
                Err(invalid())
            }
        }
    }
}

/// Escape text for a Java string literal
pub fn escape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// ISO-8601 instant as `Instant.parse` accepts it: an RFC 3339 timestamp
/// with seconds, an upper-case `T` and either `Z` or a numeric offset
fn is_instant(raw: &str) -> bool {
    let strict = raw.as_bytes().get(10) == Some(&b'T') && !raw.ends_with('z');
    let fraction_digits = raw
        .split_once('.')
        .map(|(_, rest)| rest.bytes().take_while(u8::is_ascii_digit).count())
        .unwrap_or(0);
    strict && fraction_digits <= 9 && DateTime::parse_from_rfc3339(raw).is_ok()
}

/// A nonzero literal too small for its type parses as zero, which javac rejects
fn underflows(raw: &str, zero: bool) -> bool {
    let mantissa = raw.split(|c: char| c == 'e' || c == 'E').next().unwrap_or(raw);
    zero && mantissa.bytes().any(|b| matches!(b, b'1'..=b'9'))
}

const JAVA_KEYWORDS: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
    "const", "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Java keywords and literals cannot name a local or a record component
pub fn is_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

const RUNTIME_CLASSES: &[&str] = &["Instant", "RequestParser", "RoutingContext"];

/// Classes the generated code calls by simple name; a local with the same
/// name would shadow the class in its own initializer
pub fn is_referenced_class(name: &str) -> bool {
    RUNTIME_CLASSES.contains(&name) || JAVA_TYPES.iter().any(|row| row.parser == name)
}
