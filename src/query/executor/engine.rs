// Query Execution Engine Implementation
//
// This module implements the engine for executing SELECT queries against an
// in-memory dataset of rows.

use std::path::Path;

use log::debug;

use crate::dataset;
use crate::query::executor::operators::{
    BoxedOperator, FilterOperator, LimitOperator, Operator, ProjectionOperator, TableScanOperator,
};
use crate::query::executor::result::{QueryResult, QueryResultSet, Row};
use crate::query::parser::{parse, ParsedQuery};

/// Build the operator pipeline for a parsed query: scan → filter → limit → project.
///
/// The limit sits below the projection so rows past it are never projected,
/// and above the filter so it counts matching rows rather than scanned ones.
fn build_plan<'a>(rows: &'a [Row], query: &'a ParsedQuery) -> BoxedOperator<'a> {
    let mut root: BoxedOperator<'a> = Box::new(TableScanOperator::new(rows));

    if let Some(predicate) = &query.filter {
        root = Box::new(FilterOperator::new(root, predicate));
    }

    if let Some(limit) = query.limit {
        root = Box::new(LimitOperator::new(root, limit));
    }

    Box::new(ProjectionOperator::new(root, &query.projection))
}

/// Execute a parsed query against `rows`, returning the projected rows in
/// dataset order.
pub fn execute(rows: &[Row], query: &ParsedQuery) -> QueryResult<Vec<Row>> {
    let mut root = build_plan(rows, query);
    root.init()?;

    let mut output = Vec::new();
    while let Some(row) = root.next()? {
        output.push(row.into_owned());
    }
    root.close()?;

    debug!(
        "Query on table '{}' produced {} of {} rows",
        query.table_name,
        output.len(),
        rows.len()
    );
    Ok(output)
}

/// Holds the dataset for a session and runs queries against it.
///
/// The table name in FROM is not checked against anything: every query runs
/// against the single loaded dataset.
pub struct ExecutionEngine {
    rows: Vec<Row>,
}

impl ExecutionEngine {
    pub fn new(rows: Vec<Row>) -> Self {
        ExecutionEngine { rows }
    }

    /// Create an engine over a JSON array of objects stored at `path`
    pub fn from_json_file(path: impl AsRef<Path>) -> QueryResult<Self> {
        Ok(Self::new(dataset::load_json(path)?))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Execute an already parsed query
    pub fn execute(&self, query: &ParsedQuery) -> QueryResult<QueryResultSet> {
        let rows = execute(&self.rows, query)?;
        Ok(QueryResultSet::from_rows(&query.projection, rows))
    }

    /// Parse and execute a query string
    pub fn execute_query(&self, sql: &str) -> QueryResult<QueryResultSet> {
        let query = parse(sql)?;
        self.execute(&query)
    }
}
