//! Complete parameter-parser compilation units
//!
//! Wraps the emitted statements in the class a route handler calls at
//! request time: the registration path as a constant, a `parse` method that
//! reads every parameter from the routing context, and the holder record.

use std::collections::BTreeSet;
use std::fmt::Write;

use crate::model::{ParamType, ParseResult};

use super::{java, EmitConfig, EmitError, Emitted, Emitter, UnitConfig};

const ACCESSOR: &str = "rp";
const CONTEXT: &str = "ctx";

/// Identity of the annotated route a unit is generated for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSpec {
    /// Java package, empty for the default package
    pub package: String,
    /// Simple name of the enclosing type
    pub class_name: String,
    /// Name of the annotated handler method
    pub method_name: String,
}

impl UnitSpec {
    pub fn new(
        package: impl Into<String>,
        class_name: impl Into<String>,
        method_name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            class_name: class_name.into(),
            method_name: method_name.into(),
        }
    }

    fn stem(&self) -> String {
        format!("{}_{}", self.class_name, capitalize(&self.method_name))
    }

    /// `Users_GetUser_ParamParser`
    pub fn parser_class_name(&self) -> String {
        format!("{}_ParamParser", self.stem())
    }

    /// `Users_GetUser_Params`
    pub fn holder_name(&self) -> String {
        format!("{}_Params", self.stem())
    }

    /// Source file name of the generated class
    pub fn file_name(&self) -> String {
        format!("{}.java", self.parser_class_name())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render the full source file for one route
///
/// `path` is the sanitized registration path and `params` the parsed model
/// of the same template.
pub fn render_unit(
    spec: &UnitSpec,
    path: &str,
    params: &ParseResult,
    config: &UnitConfig,
) -> Result<String, EmitError> {
    let holder = spec.holder_name();
    let class = spec.parser_class_name();
    let emitter = Emitter::new(
        EmitConfig::new()
            .with_accessor(ACCESSOR)
            .with_holder_name(holder.as_str())
            .with_reserved(CONTEXT),
    );
    let code = emitter.emit(params)?;
    let i = config.indent.as_str();

    let mut out = String::new();

    // Writing into a String cannot fail
    if !spec.package.is_empty() {
        let _ = writeln!(out, "package {};", spec.package);
        out.push('\n');
    }

    for import in imports(params, config)? {
        let _ = writeln!(out, "import {};", import);
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "@Generated(value = \"{}\")",
        java::escape_string(&config.generator)
    );
    let _ = writeln!(out, "final class {} {{", class);
    out.push('\n');
    let _ = writeln!(out, "{i}private {}() {{}}", class);
    out.push('\n');
    let _ = writeln!(
        out,
        "{i}static final String PATH = \"{}\";",
        java::escape_string(path)
    );
    out.push('\n');

    if !params.is_empty() {
        write_parse_method(&mut out, i, &holder, params, &code);
        out.push('\n');
        let _ = writeln!(out, "{i}{}", code.holder_decl);
    }

    out.push_str("}\n");
    Ok(out)
}

fn write_parse_method(
    out: &mut String,
    i: &str,
    holder: &str,
    params: &ParseResult,
    code: &Emitted,
) {
    let _ = writeln!(out, "{i}static {} parse(RoutingContext {CONTEXT}) {{", holder);
    let _ = writeln!(
        out,
        "{i}{i}RequestParser {ACCESSOR} = RequestParser.create({CONTEXT});"
    );
    out.push('\n');
    for statement in &code.extractions {
        let _ = writeln!(out, "{i}{i}{}", statement);
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "{i}{i}return new {}({});",
        holder,
        Emitted::holder_args(params)
    );
    let _ = writeln!(out, "{i}}}");
}

/// Sorted imports actually needed by the unit
fn imports(params: &ParseResult, config: &UnitConfig) -> Result<BTreeSet<String>, EmitError> {
    let mut imports = BTreeSet::new();
    imports.insert("javax.annotation.processing.Generated".to_string());

    if params.is_empty() {
        return Ok(imports);
    }

    let runtime = &config.runtime_package;
    imports.insert("io.vertx.ext.web.RoutingContext".to_string());
    imports.insert(format!("{}.RequestParser", runtime));
    for param in params.params() {
        let java = java::java_type(param)?;
        imports.insert(format!("{}.{}", runtime, java.parser));
        if param.ty() == ParamType::Timestamp {
            imports.insert("java.time.Instant".to_string());
        }
    }
    Ok(imports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse;
    use crate::sanitizer::sanitize;
    use pretty_assertions::assert_eq;

    fn render(template: &str, spec: &UnitSpec) -> Result<String, EmitError> {
        let params = parse(template).unwrap();
        let path = sanitize(template).unwrap();
        render_unit(spec, &path, &params, &UnitConfig::default())
    }

    #[test]
    fn test_names() {
        let spec = UnitSpec::new("my.test", "Users", "getUser");
        assert_eq!(spec.parser_class_name(), "Users_GetUser_ParamParser");
        assert_eq!(spec.holder_name(), "Users_GetUser_Params");
        assert_eq!(spec.file_name(), "Users_GetUser_ParamParser.java");
    }

    #[test]
    fn test_unit_with_path_params() {
        let spec = UnitSpec::new("my.test", "RestHandlerPathOnlyTest", "handler");
        let source = render(
            "/some/prefix/{int:param1=1}/path/{string:param2=abc}/more-path",
            &spec,
        )
        .unwrap();

        let expected = "\
package my.test;

import io.vertx.ext.web.RoutingContext;
import javax.annotation.processing.Generated;
import routetemplate.web.IntegerParser;
import routetemplate.web.RequestParser;
import routetemplate.web.StringParser;

@Generated(value = \"route-template\")
final class RestHandlerPathOnlyTest_Handler_ParamParser {

\tprivate RestHandlerPathOnlyTest_Handler_ParamParser() {}

\tstatic final String PATH = \"/some/prefix/{param1}/path/{param2}/more-path\";

\tstatic RestHandlerPathOnlyTest_Handler_Params parse(RoutingContext ctx) {
\t\tRequestParser rp = RequestParser.create(ctx);

\t\tInteger param1 = rp.getPathParam(\"param1\", 1, IntegerParser.create());
\t\tString param2 = rp.getPathParam(\"param2\", \"abc\", StringParser.create());

\t\treturn new RestHandlerPathOnlyTest_Handler_Params(param1, param2);
\t}

\trecord RestHandlerPathOnlyTest_Handler_Params(int param1, String param2) {}
}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn test_unit_without_params() {
        let spec = UnitSpec::new("", "Health", "live");
        let source = render("/health/live", &spec).unwrap();

        let expected = "\
import javax.annotation.processing.Generated;

@Generated(value = \"route-template\")
final class Health_Live_ParamParser {

\tprivate Health_Live_ParamParser() {}

\tstatic final String PATH = \"/health/live\";

}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn test_unit_imports_instant() {
        let spec = UnitSpec::new("a.b", "Events", "since");
        let source = render("/events?from={timestamp}", &spec).unwrap();
        assert!(source.contains("import java.time.Instant;\n"));
        assert!(source.contains("import routetemplate.web.InstantParser;\n"));
        assert!(source
            .contains("Instant from = rp.getQueryParam(\"from\", InstantParser.create());"));
        assert!(source.contains("record Events_Since_Params(Instant from) {}"));
    }

    #[test]
    fn test_unit_rejects_context_name() {
        let spec = UnitSpec::new("a.b", "C", "m");
        assert_eq!(
            render("/x/{string:ctx}", &spec),
            Err(EmitError::ReservedName {
                name: "ctx".to_string()
            })
        );
    }

    #[test]
    fn test_unit_custom_indent() {
        let spec = UnitSpec::new("a.b", "C", "m");
        let params = parse("/x/{int:id}").unwrap();
        let config = UnitConfig::new()
            .with_indent("    ")
            .with_runtime_package("com.example.web");
        let source = render_unit(&spec, "/x/{id}", &params, &config).unwrap();
        assert!(source.contains("\n    static final String PATH = \"/x/{id}\";\n"));
        assert!(source.contains("\n        return new C_M_Params(id);\n"));
        assert!(source.contains("import com.example.web.IntegerParser;\n"));
    }
}
