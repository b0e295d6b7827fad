use std::io::Write;

use serde_json::json;
use specroute_core::{Contract, ContractSource, LoadError};

const SPEC_YAML: &str = r#"
openapi: 3.0.0
info:
  title: Foo API
  version: 1.0.0
paths:
  /foo:
    get:
      operationId: controllers.foo.Foo.on_get
"#;

fn write_file(dir: &std::path::Path, name: &str, contents: &str) {
    let mut f = std::fs::File::create(dir.join(name)).expect("create");
    f.write_all(contents.as_bytes()).expect("write");
}

#[test]
fn discovers_yml_in_app_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(dir.path(), "openapi-spec.yml", SPEC_YAML);

    let contract = Contract::load(ContractSource::Discover, dir.path()).unwrap();
    assert_eq!(contract.source_path(), Some(dir.path().join("openapi-spec.yml").as_path()));
    assert_eq!(contract.operations().count(), 1);
}

#[test]
fn falls_back_to_yaml_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_file(dir.path(), "openapi-spec.yaml", SPEC_YAML);

    let contract = Contract::load(ContractSource::Discover, dir.path()).unwrap();
    assert_eq!(contract.source_path(), Some(dir.path().join("openapi-spec.yaml").as_path()));
}

#[test]
fn missing_default_file_reports_both_candidates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Contract::load(ContractSource::Discover, dir.path()).unwrap_err();
    match err {
        LoadError::NotFound { searched } => {
            assert_eq!(searched.len(), 2);
            assert!(searched[0].ends_with("openapi-spec.yml"));
            assert!(searched[1].ends_with("openapi-spec.yaml"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_explicit_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = Contract::load(ContractSource::File("kdjh.yaml".into()), dir.path()).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
}

#[test]
fn relative_file_resolves_against_app_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let spec = json!({"paths": {"/a": {"get": {}}}});
    write_file(dir.path(), "api.json", &spec.to_string());

    let contract = Contract::load(ContractSource::File("api.json".into()), dir.path()).unwrap();
    assert_eq!(contract.paths().count(), 1);
}

#[test]
fn inline_sources_parse() {
    let spec = json!({"paths": {"/foo": {"get": {"operationId": "a.B.c"}}}});

    let from_json = Contract::load(ContractSource::Json(spec.to_string()), std::path::Path::new(".")).unwrap();
    let from_yaml = Contract::load(ContractSource::Yaml(SPEC_YAML.to_string()), std::path::Path::new(".")).unwrap();
    let from_value = Contract::load(ContractSource::Parsed(spec.clone()), std::path::Path::new(".")).unwrap();

    assert_eq!(from_json.raw(), from_value.raw());
    assert_eq!(
        from_yaml.operations().next().and_then(|op| op.operation_id()),
        Some("controllers.foo.Foo.on_get")
    );
}

#[test]
fn document_without_paths_is_rejected() {
    let err = Contract::from_value(json!({"openapi": "3.0.0"})).unwrap_err();
    assert!(matches!(err, LoadError::MissingPaths));
}

#[test]
fn base_path_from_last_server_with_url() {
    let contract = Contract::from_value(json!({
        "servers": [
            {"url": "http://localhost/v1"},
            {"description": "no url"},
            {"url": "https://example.com/v2"},
            {"description": "trailing entry without url"}
        ],
        "paths": {}
    }))
    .unwrap();
    assert_eq!(contract.base_path(), "/v2");
}

#[test]
fn server_path_is_taken_literally() {
    let templated = Contract::from_value(json!({
        "servers": [{"url": "http://host/{basePath}"}],
        "paths": {}
    }))
    .unwrap();
    assert_eq!(templated.base_path(), "/{basePath}");

    let dotted = Contract::from_value(json!({
        "servers": [{"url": "http://host/a/../v1"}],
        "paths": {}
    }))
    .unwrap();
    assert_eq!(dotted.base_path(), "/a/../v1");
    assert_eq!(dotted.raw()["servers"][0]["url"], "http://host/a/../v1");
}

#[test]
fn base_path_from_swagger_base_path() {
    let contract = Contract::from_value(json!({"basePath": "/v1", "paths": {}})).unwrap();
    assert_eq!(contract.base_path(), "/v1");
}

#[test]
fn servers_win_over_base_path() {
    let contract = Contract::from_value(json!({
        "servers": [{"url": "http://localhost/v3"}],
        "basePath": "/v2",
        "paths": {}
    }))
    .unwrap();
    assert_eq!(contract.base_path(), "/v3");
}

#[test]
fn empty_servers_fall_back_to_base_path() {
    let contract = Contract::from_value(json!({"servers": [], "basePath": "/v1", "paths": {}})).unwrap();
    assert_eq!(contract.base_path(), "/v1");
}

#[test]
fn no_base_path_declared() {
    let contract = Contract::from_value(json!({"servers": [{"url": "http://localhost"}], "paths": {}})).unwrap();
    assert_eq!(contract.base_path(), "");
}

#[test]
fn operations_skip_non_method_keys() {
    let contract = Contract::from_value(json!({
        "paths": {
            "/foo": {
                "summary": "foo things",
                "parameters": [],
                "x-internal": true,
                "get": {},
                "post": {}
            }
        }
    }))
    .unwrap();
    let methods: Vec<&str> = contract.operations().map(|op| op.method).collect();
    assert_eq!(methods, vec!["get", "post"]);
}
