use anyhow::Result;
use jsonql::dataset::load_json;
use jsonql::query::executor::engine::ExecutionEngine;
use jsonql::query::executor::result::{DataValue, QueryError};

#[path = "../common/mod.rs"]
mod common;
use common::{write_temp_json, SAMPLE_JSON};

#[test]
fn test_load_json_file() -> Result<()> {
    let file = write_temp_json(SAMPLE_JSON)?;
    let rows = load_json(file.path())?;

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[2].get("name"), Some(&DataValue::Text("Charlie".to_string())));
    assert_eq!(rows[2].get("score"), Some(&DataValue::Float(91.25)));
    assert_eq!(rows[1].get("active"), Some(&DataValue::Boolean(false)));

    let columns: Vec<&String> = rows[0].columns().collect();
    assert_eq!(columns, vec!["id", "name", "age", "score", "active"]);
    Ok(())
}

#[test]
fn test_engine_from_json_file() -> Result<()> {
    let file = write_temp_json(SAMPLE_JSON)?;
    let engine = ExecutionEngine::from_json_file(file.path())?;
    assert_eq!(engine.row_count(), 5);

    let result = engine.execute_query("SELECT name FROM data WHERE id = 4")?;
    assert_eq!(result.rows()[0].get("name"), Some(&DataValue::Text("Dave".to_string())));
    Ok(())
}

#[test]
fn test_invalid_dataset_files() -> Result<()> {
    let file = write_temp_json(r#"{"not": "an array"}"#)?;
    assert!(matches!(load_json(file.path()), Err(QueryError::Dataset(_))));

    let file = write_temp_json(r#"[{"id": 1}, {"tags": [1, 2]}]"#)?;
    match load_json(file.path()) {
        Err(QueryError::Dataset(msg)) => assert!(msg.contains("Row 1"), "unexpected message: {}", msg),
        other => panic!("expected dataset error, got {:?}", other),
    }

    assert!(matches!(
        ExecutionEngine::from_json_file("/nonexistent/jsonql/people.json"),
        Err(QueryError::Dataset(_))
    ));
    Ok(())
}

#[test]
fn test_wildcard_output_keeps_file_field_order() -> Result<()> {
    let file = write_temp_json(r#"[{"zeta": 1, "alpha": 2}, {"zeta": 3, "mid": "x", "alpha": 4}]"#)?;
    let engine = ExecutionEngine::from_json_file(file.path())?;

    let result = engine.execute_query("SELECT * FROM t")?;
    assert_eq!(result.columns(), ["zeta".to_string(), "alpha".to_string(), "mid".to_string()]);
    assert!(result.to_string_table().starts_with("| zeta | alpha | mid |"));

    let json: serde_json::Value = serde_json::from_str(&result.to_json()?)?;
    let keys: Vec<&String> = json[1].as_object().map(|o| o.keys().collect()).unwrap_or_default();
    assert_eq!(keys, vec!["zeta", "mid", "alpha"]);
    Ok(())
}
