use super::{path_of, schema_file};
use crate::commands::helpers::{load_schema, terminate_statements};
use fedsql_error::{ErrorCode, FedError};

#[test]
fn test_terminate_statements_skips_batch_separators() {
    let statements = vec![
        "CREATE FEDERATION F (k INT)".to_string(),
        "GO".to_string(),
        "CREATE TABLE t (id INT NOT NULL)".to_string(),
    ];
    assert_eq!(
        terminate_statements(statements.clone(), ";"),
        vec![
            "CREATE FEDERATION F (k INT);",
            "GO",
            "CREATE TABLE t (id INT NOT NULL);"
        ]
    );
    assert_eq!(terminate_statements(statements.clone(), ""), statements);
}

#[test]
fn test_load_schema_reports_coded_error() {
    let file = schema_file("tables: [ {name: ");
    let err = load_schema(path_of(&file)).unwrap_err();
    let fed = err
        .downcast_ref::<FedError>()
        .expect("schema errors are coded");
    assert_eq!(fed.code, ErrorCode::InvalidYaml);
}

#[test]
fn test_load_missing_schema_file() {
    let err = load_schema("/nonexistent/schema.yaml").unwrap_err();
    assert!(err.downcast_ref::<FedError>().is_some());
}
