//! Generation driver for manifests
//!
//! Each route is compiled on its own; a failing route yields an error
//! outcome and never affects the others.

use std::thread;

use crate::emitter::{render_unit, UnitConfig, UnitSpec};
use crate::manifest::{Manifest, RouteDecl};
use crate::{parser, sanitizer, CompileError};

/// A generated source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    /// Registration path, as stored in the `PATH` constant
    pub path: String,
    pub source: String,
}

/// The result of generating one route
#[derive(Debug, Clone)]
pub struct RouteOutcome<'m> {
    pub route: &'m RouteDecl,
    pub result: Result<GeneratedFile, CompileError>,
}

/// Generate the parameter parser unit for one route
pub fn generate_route(
    route: &RouteDecl,
    manifest: &Manifest,
) -> Result<GeneratedFile, CompileError> {
    let ast = parser::parse_syntax(&route.path)?;
    let params = crate::model::build(&ast)?;
    let path = sanitizer::render_path(&ast, &route.path, &manifest.sanitize_options());

    let spec = UnitSpec::new(&manifest.package, &route.class, &route.method);
    let config = UnitConfig::new().with_runtime_package(&manifest.runtime_package);
    let source = render_unit(&spec, &path, &params, &config)?;

    tracing::debug!(
        route = %route.label(),
        path = %path,
        params = params.len(),
        "generated parameter parser"
    );

    Ok(GeneratedFile {
        file_name: spec.file_name(),
        path,
        source,
    })
}

/// Generate every route of a manifest
///
/// Routes are spread over scoped worker threads; outcomes come back in
/// manifest order.
pub fn generate_all(manifest: &Manifest) -> Vec<RouteOutcome<'_>> {
    let routes = &manifest.routes;
    if routes.is_empty() {
        return vec![];
    }

    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(routes.len());
    let chunk_size = routes.len().div_ceil(workers);
    tracing::debug!(routes = routes.len(), workers, "generating routes");

    thread::scope(|s| {
        let handles: Vec<_> = routes
            .chunks(chunk_size)
            .map(|chunk| {
                s.spawn(move || {
                    chunk
                        .iter()
                        .map(|route| RouteOutcome {
                            route,
                            result: generate_route(route, manifest),
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(outcomes) => outcomes,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmitError, TemplateError};

    fn manifest(routes: &str) -> Manifest {
        Manifest::from_str(&format!("package = \"my.test\"\n{}", routes)).unwrap()
    }

    #[test]
    fn test_generate_route() {
        let m = manifest(
            r#"
            [[route]]
            class = "Users"
            method = "getUser"
            path = "/users/{int:id}?verbose={boolean=false}"
            "#,
        );
        let file = generate_route(&m.routes[0], &m).unwrap();
        assert_eq!(file.file_name, "Users_GetUser_ParamParser.java");
        assert_eq!(file.path, "/users/{id}");
        assert!(file.source.starts_with("package my.test;\n"));
        assert!(file.source.contains(
            "Boolean verbose = rp.getQueryParam(\"verbose\", false, BooleanParser.create());"
        ));
    }

    #[test]
    fn test_generate_uses_manifest_style() {
        let m = Manifest::from_str(
            r#"
            placeholder_style = "colon"
            [[route]]
            class = "Users"
            method = "get"
            path = "/users/{int:id}"
            "#,
        )
        .unwrap();
        let file = generate_route(&m.routes[0], &m).unwrap();
        assert_eq!(file.path, "/users/:id");
        assert!(file.source.contains("static final String PATH = \"/users/:id\";"));
    }

    #[test]
    fn test_failures_are_isolated() {
        let m = manifest(
            r#"
            [[route]]
            class = "A"
            method = "ok"
            path = "/a/{int:id}"

            [[route]]
            class = "A"
            method = "badType"
            path = "/a/{foo:id}"

            [[route]]
            class = "A"
            method = "badDefault"
            path = "/a/{int:id=x}"

            [[route]]
            class = "A"
            method = "alsoOk"
            path = "/b"
            "#,
        );

        let outcomes = generate_all(&m);
        let methods: Vec<_> = outcomes.iter().map(|o| o.route.method.as_str()).collect();
        assert_eq!(methods, vec!["ok", "badType", "badDefault", "alsoOk"]);

        assert!(outcomes[0].result.is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(CompileError::Template(TemplateError::UnknownType { .. }))
        ));
        assert!(matches!(
            outcomes[2].result,
            Err(CompileError::Emit(EmitError::InvalidDefault { .. }))
        ));
        assert!(outcomes[3].result.is_ok());
    }

    #[test]
    fn test_generate_empty_manifest() {
        let m = manifest("");
        assert!(generate_all(&m).is_empty());
    }
}
