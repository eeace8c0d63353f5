use anyhow::Result;
use jsonql::query::parser::ast::{Expression, Operator, Projection, StatementKind, Value};
use jsonql::dataset::parse_json;
use jsonql::query::executor::engine::execute;
use jsonql::query::parser::{parse, ParseError};

fn col(name: &str) -> Expression {
    Expression::column(name)
}

#[test]
fn test_select_all_from_table() -> Result<()> {
    let query = parse("SELECT * FROM table")?;
    assert_eq!(query.op_type, StatementKind::Select);
    assert!(query.is_wildcard());
    assert_eq!(query.table_name, "table");
    assert_eq!(query.limit, None);
    assert!(query.filter.is_none());
    Ok(())
}

#[test]
fn test_select_columns_with_filter_and_limit() -> Result<()> {
    let query = parse("SELECT row1,row2 FROM t WHERE row1=1024 LIMIT 10")?;
    assert_eq!(
        query.projection,
        Projection::Columns(vec!["row1".to_string(), "row2".to_string()])
    );
    assert_eq!(query.limit, Some(10));
    assert_eq!(
        query.filter,
        Some(Expression::binary(
            col("row1"),
            Operator::Equals,
            Expression::Literal(Value::Integer(1024)),
        ))
    );
    Ok(())
}

#[test]
fn test_where_precedence_tree() -> Result<()> {
    let query = parse("SELECT * FROM t WHERE row1 < 2000 AND row2 = 'text' OR row3 > 1.5")?;
    let filter = query.filter.expect("filter");
    assert_eq!(
        filter.to_string(),
        "(((row1 < 2000) AND (row2 = 'text')) OR (row3 > 1.5))"
    );
    Ok(())
}

#[test]
fn test_parenthesised_filter() -> Result<()> {
    let query = parse("select a from t where (a = 1 or b = 2) and c = 3")?;
    let filter = query.filter.expect("filter");
    assert_eq!(filter.to_string(), "(((a = 1) OR (b = 2)) AND (c = 3))");
    Ok(())
}

#[test]
fn test_parse_is_deterministic() -> Result<()> {
    let sql = "SELECT a,b FROM t WHERE a != 'x' AND (b > 2 OR b < 1) LIMIT 4";
    let first = parse(sql)?;
    let second = parse(sql)?;
    assert_eq!(first, second);

    let rows = parse_json(
        r#"[{"a": "y", "b": 3}, {"a": "x", "b": 5}, {"a": "z", "b": 0}, {"a": "w", "b": 2}]"#,
    )?;
    let first_rows = execute(&rows, &first)?;
    assert_eq!(first_rows, execute(&rows, &second)?);
    assert_eq!(first_rows, vec![rows[0].clone(), rows[2].clone()]);
    Ok(())
}

#[test]
fn test_column_list_ends_at_whitespace() -> Result<()> {
    let query = parse("SELECT a,b FROM t")?;
    assert_eq!(
        query.projection,
        Projection::Columns(vec!["a".to_string(), "b".to_string()])
    );

    // After "a," the list is over, so "b" is read as a clause keyword
    assert!(matches!(
        parse("SELECT a, b FROM t"),
        Err(ParseError::InvalidStatement { position: 10, .. })
    ));
    Ok(())
}

#[test]
fn test_errors() -> Result<()> {
    assert!(matches!(
        parse("SELCT id FROM table"),
        Err(ParseError::InvalidStatement { .. })
    ));
    assert!(matches!(
        parse("SELECT row1 FROM table WHERE row3=99.99.99"),
        Err(ParseError::InvalidNumber { .. })
    ));
    assert!(matches!(parse("SELECT a"), Err(ParseError::MalformedQuery(_))));
    assert_eq!(
        parse("UPDATE t"),
        Err(ParseError::UnsupportedOperation("UPDATE".to_string()))
    );
    Ok(())
}

#[test]
fn test_error_messages() -> Result<()> {
    let err = parse("SELECT a FROM t WHERE a = 1.2.3").unwrap_err();
    assert_eq!(err.to_string(), "Invalid number '1.2.3' at position 26");

    let err = parse("SELECT a").unwrap_err();
    assert_eq!(err.to_string(), "Malformed query: missing table name");
    Ok(())
}
