//! Integration tests for the route template compiler

use route_template::{
    compile, emit, parse, sanitize, ParamKind, ParamType, ParseResult, TemplateError,
};

/// Count `{name}` placeholders in a sanitized path
fn placeholder_count(path: &str) -> usize {
    path.matches('{').count()
}

const WELL_FORMED: &[&str] = &[
    "/users/{int:id}",
    "/some/prefix/{int:param1=1}/path/{string:param2=abc}/more-path",
    "/a/{long:x}/{boolean:y=true}/{float:z}?q={string}&n={int=3}",
    "/files/report-{int:year}-{int:month}.csv",
    "/events/{timestamp:since=2024-01-01T00:00:00Z}/",
    "/health",
    "/",
];

#[test]
fn test_prefixed_route_with_defaults() {
    let template = "/some/prefix/{int:param1=1}/path/{string:param2=abc}/more-path";
    let result = parse(template).expect("Should parse");

    let path: Vec<_> = result
        .path_params()
        .iter()
        .map(|p| (p.name(), p.ty(), p.default()))
        .collect();
    assert_eq!(
        path,
        vec![
            ("param1", ParamType::Int, Some("1")),
            ("param2", ParamType::String, Some("abc")),
        ]
    );
    assert!(result.query_params().is_empty());
    assert_eq!(
        sanitize(template).unwrap(),
        "/some/prefix/{param1}/path/{param2}/more-path"
    );
}

#[test]
fn test_placeholder_count_matches_path_params() {
    for template in WELL_FORMED {
        let result = parse(template).expect("Should parse");
        let path = sanitize(template).expect("Should sanitize");
        assert_eq!(
            placeholder_count(&path),
            result.path_params().len(),
            "template {}",
            template
        );
    }
}

#[test]
fn test_path_order_follows_placeholders() {
    let result = parse("/{int:c}/x/{int:a}/{int:b}").unwrap();
    let names: Vec<_> = result.path_params().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);

    let path = sanitize("/{int:c}/x/{int:a}/{int:b}").unwrap();
    assert_eq!(path, "/{c}/x/{a}/{b}");
}

#[test]
fn test_query_order_follows_declaration() {
    let result = parse("/s?z={int}&a={int}&m={int}").unwrap();
    let names: Vec<_> = result.query_params().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["z", "a", "m"]);
    assert!(result
        .query_params()
        .iter()
        .all(|p| p.kind() == ParamKind::Query));
}

#[test]
fn test_duplicates_always_fail() {
    for template in [
        "/a/{int:n}/b/{string:n}",
        "/a/{int:n}?n={int}",
        "/a?n={int}&n={string}",
    ] {
        match parse(template) {
            Err(TemplateError::DuplicateParameter { name, .. }) => assert_eq!(name, "n"),
            other => panic!("{}: expected duplicate, got {:?}", template, other),
        }
    }
}

#[test]
fn test_parse_is_deterministic() {
    for template in WELL_FORMED {
        let first: ParseResult = parse(template).unwrap();
        let second: ParseResult = parse(template).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_default_literal_fidelity() {
    let result = parse("/{string:a= spaced out }/{string:b=x:y=z&w}/{double:c=1.50}").unwrap();
    let defaults: Vec<_> = result.params().map(|p| p.default()).collect();
    assert_eq!(
        defaults,
        vec![Some(" spaced out "), Some("x:y=z&w"), Some("1.50")]
    );
}

#[test]
fn test_scenario_single_int() {
    let result = parse("/users/{int:id}").unwrap();
    assert_eq!(result.path_params().len(), 1);
    let id = &result.path_params()[0];
    assert_eq!(id.name(), "id");
    assert_eq!(id.ty(), ParamType::Int);
    assert_eq!(id.default(), None);
    assert!(result.query_params().is_empty());
    assert_eq!(sanitize("/users/{int:id}").unwrap(), "/users/{id}");
}

#[test]
fn test_scenario_empty() {
    assert_eq!(parse(""), Err(TemplateError::EmptyTemplate));
}

#[test]
fn test_scenario_unknown_type() {
    assert!(matches!(
        parse("/x/{foo:bar}"),
        Err(TemplateError::UnknownType { ref token, position: 4 }) if token == "foo"
    ));
}

#[test]
fn test_scenario_duplicate() {
    assert!(matches!(
        parse("/a/{int:n}/b/{string:n}"),
        Err(TemplateError::DuplicateParameter { ref name, .. }) if name == "n"
    ));
}

#[test]
fn test_scenario_emit_without_default() {
    let code = emit(&parse("/users/{int:id}").unwrap()).unwrap();
    assert_eq!(code.holder_decl, "record Params(int id) {}");
    assert_eq!(code.extractions.len(), 1);
    assert_eq!(
        code.extractions[0],
        "Integer id = rp.getPathParam(\"id\", IntegerParser.create());"
    );
}

#[test]
fn test_failures_do_not_leak_between_calls() {
    assert!(compile("/x/{foo:bar}").is_err());
    let route = compile("/x/{int:bar}").unwrap();
    assert_eq!(route.path, "/x/{bar}");
}

#[test]
fn test_malformed_templates() {
    for template in [
        "users",
        "/users/{int:id",
        "/users/{int}",
        "/users/{:id}",
        "/users/{int:id=}",
        "/users/{int:{id}}",
        "/users/}",
        "/x?",
        "/x?a",
        "/x?a={int}&",
        "/x?a={int:b}",
    ] {
        assert!(
            matches!(parse(template), Err(TemplateError::Syntax { .. })),
            "{} should be a syntax error, got {:?}",
            template,
            parse(template)
        );
    }
}
