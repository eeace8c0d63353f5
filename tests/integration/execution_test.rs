use anyhow::Result;
use jsonql::query::executor::engine::{execute, ExecutionEngine};
use jsonql::query::executor::result::{DataValue, QueryError};
use jsonql::query::parser::parse;

#[path = "../common/mod.rs"]
mod common;
use common::{row, sample_rows, text};

#[test]
fn test_wildcard_returns_every_row_in_order() -> Result<()> {
    let rows = sample_rows()?;
    let result = execute(&rows, &parse("SELECT * FROM people")?)?;
    assert_eq!(result, rows);
    Ok(())
}

#[test]
fn test_projection_with_filter() -> Result<()> {
    let engine = ExecutionEngine::new(sample_rows()?);
    let result = engine.execute_query("SELECT name,age FROM people WHERE age > 28 AND active = TRUE")?;

    assert_eq!(result.columns(), ["name".to_string(), "age".to_string()]);
    assert_eq!(
        result.into_rows(),
        vec![row(vec![("name", text("Charlie")), ("age", DataValue::Integer(35))])]
    );
    Ok(())
}

#[test]
fn test_or_with_parentheses() -> Result<()> {
    let engine = ExecutionEngine::new(sample_rows()?);
    let result = engine.execute_query(
        "SELECT id FROM people WHERE (name = 'Bob' OR name = Eve) AND score > 70",
    )?;
    assert_eq!(
        result.into_rows(),
        vec![
            row(vec![("id", DataValue::Integer(2))]),
            row(vec![("id", DataValue::Integer(5))]),
        ]
    );
    Ok(())
}

#[test]
fn test_parentheses_change_matching_rows() -> Result<()> {
    let rows = jsonql::dataset::parse_json(
        r#"[
            {"id": 1, "a": 1, "b": 0, "c": 0},
            {"id": 2, "a": 0, "b": 2, "c": 3},
            {"id": 3, "a": 0, "b": 2, "c": 0}
        ]"#,
    )?;

    let ungrouped = execute(&rows, &parse("SELECT id FROM t WHERE a=1 OR b=2 AND c=3")?)?;
    let grouped = execute(&rows, &parse("SELECT id FROM t WHERE (a=1 OR b=2) AND c=3")?)?;

    assert_eq!(
        ungrouped,
        vec![
            row(vec![("id", DataValue::Integer(1))]),
            row(vec![("id", DataValue::Integer(2))]),
        ]
    );
    assert_eq!(grouped, vec![row(vec![("id", DataValue::Integer(2))])]);
    assert_ne!(ungrouped, grouped);
    Ok(())
}

#[test]
fn test_integer_float_comparison() -> Result<()> {
    let engine = ExecutionEngine::new(sample_rows()?);
    let result = engine.execute_query("SELECT id FROM people WHERE score = 72")?;
    assert_eq!(result.into_rows(), vec![row(vec![("id", DataValue::Integer(2))])]);

    let result = engine.execute_query("SELECT id FROM people WHERE age < 27.5")?;
    assert_eq!(result.into_rows(), vec![row(vec![("id", DataValue::Integer(1))])]);
    Ok(())
}

#[test]
fn test_limit_bounds_matching_rows() -> Result<()> {
    let engine = ExecutionEngine::new(sample_rows()?);
    let result = engine.execute_query("SELECT id FROM people WHERE active = true LIMIT 2")?;
    assert_eq!(
        result.into_rows(),
        vec![
            row(vec![("id", DataValue::Integer(1))]),
            row(vec![("id", DataValue::Integer(3))]),
        ]
    );
    Ok(())
}

#[test]
fn test_limit_is_prefix_of_unlimited() -> Result<()> {
    let rows = sample_rows()?;
    let unlimited = execute(&rows, &parse("SELECT name FROM people WHERE age > 26")?)?;
    for n in 0..=unlimited.len() + 1 {
        let sql = format!("SELECT name FROM people WHERE age > 26 LIMIT {}", n);
        let limited = execute(&rows, &parse(&sql)?)?;
        assert_eq!(limited.len(), n.min(unlimited.len()));
        assert_eq!(limited.as_slice(), &unlimited[..limited.len()]);
    }
    Ok(())
}

#[test]
fn test_no_match() -> Result<()> {
    let engine = ExecutionEngine::new(sample_rows()?);
    let result = engine.execute_query("SELECT * FROM people WHERE age > 100")?;
    assert_eq!(result.row_count(), 0);
    Ok(())
}

#[test]
fn test_execution_errors() -> Result<()> {
    let engine = ExecutionEngine::new(sample_rows()?);

    assert_eq!(
        engine.execute_query("SELECT salary FROM people"),
        Err(QueryError::ColumnNotFound("salary".to_string()))
    );
    assert!(matches!(
        engine.execute_query("SELECT * FROM people WHERE name > 3"),
        Err(QueryError::TypeMismatch { .. })
    ));
    assert!(matches!(
        engine.execute_query("SELECT * FROM people WHERE age"),
        Err(QueryError::InvalidFilterExpression(_))
    ));
    assert!(matches!(
        engine.execute_query("SELECT * FROM people WHERE age = 1 AND name"),
        Err(QueryError::InvalidFilterExpression(_))
    ));
    assert!(matches!(
        engine.execute_query("INSERT INTO people"),
        Err(QueryError::Parse(_))
    ));
    Ok(())
}

#[test]
fn test_rows_with_heterogeneous_fields() -> Result<()> {
    let rows = vec![
        row(vec![("a", DataValue::Integer(1))]),
        row(vec![("a", DataValue::Integer(2)), ("b", text("x"))]),
    ];
    let engine = ExecutionEngine::new(rows);

    let result = engine.execute_query("SELECT * FROM t")?;
    assert_eq!(result.columns(), ["a".to_string(), "b".to_string()]);

    // The filter hits the first row before it can match the second.
    assert_eq!(
        engine.execute_query("SELECT a FROM t WHERE b = 'x'"),
        Err(QueryError::ColumnNotFound("b".to_string()))
    );
    Ok(())
}

#[test]
fn test_two_field_filter_from_json() -> Result<()> {
    let rows = jsonql::dataset::parse_json(r#"[{"row1": 1024, "row2": "text"}]"#)?;

    let query = parse("SELECT row1,row2 FROM t WHERE row1<2000 AND row2='text'")?;
    assert_eq!(execute(&rows, &query)?, rows);

    let query = parse("SELECT row1 FROM t WHERE row2='nope'")?;
    assert!(execute(&rows, &query)?.is_empty());
    Ok(())
}
