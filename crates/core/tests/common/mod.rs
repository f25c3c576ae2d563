use std::collections::{HashMap, VecDeque};

use fedsql_core::{Connection, ConnectionParams, DatabaseError, Row, SqlValue};
use serde_json::json;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute(String, Vec<SqlValue>),
    Fetch(String, Vec<SqlValue>),
}

/// Connection double that records every statement in order.
#[derive(Debug, Default)]
pub struct MockConnection {
    pub params: ConnectionParams,
    pub transaction_active: bool,
    pub calls: Vec<Call>,
    fetch_results: VecDeque<Result<Vec<Row>, DatabaseError>>,
    execute_failures: HashMap<usize, DatabaseError>,
    executions: usize,
}

#[allow(dead_code)]
impl MockConnection {
    pub fn new(federation: &str, distribution_key: &str, filtering: bool) -> Self {
        let mut params = ConnectionParams::new();
        params.insert("federationName".into(), json!(federation));
        params.insert("distributionKey".into(), json!(distribution_key));
        params.insert("filteringEnabled".into(), json!(filtering));
        Self::with_params(params)
    }

    pub fn with_params(params: ConnectionParams) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Queue the result of the next `fetch_all`. Unqueued fetches return no rows.
    pub fn push_rows(&mut self, rows: Vec<Row>) {
        self.fetch_results.push_back(Ok(rows));
    }

    pub fn push_fetch_error(&mut self, message: &str) {
        self.fetch_results
            .push_back(Err(DatabaseError::new(message)));
    }

    /// Make the n-th `execute` call (0-based) fail.
    pub fn fail_execute_at(&mut self, n: usize, message: &str) {
        self.execute_failures.insert(n, DatabaseError::new(message));
    }

    pub fn executed(&self) -> Vec<(String, Vec<SqlValue>)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Execute(sql, params) => Some((sql.clone(), params.clone())),
                Call::Fetch(..) => None,
            })
            .collect()
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.executed().into_iter().map(|(sql, _)| sql).collect()
    }
}

impl Connection for MockConnection {
    fn params(&self) -> &ConnectionParams {
        &self.params
    }

    fn is_transaction_active(&self) -> bool {
        self.transaction_active
    }

    fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<(), DatabaseError> {
        let n = self.executions;
        self.executions += 1;
        self.calls
            .push(Call::Execute(sql.to_string(), params.to_vec()));
        match self.execute_failures.remove(&n) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fetch_all(&mut self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, DatabaseError> {
        self.calls.push(Call::Fetch(sql.to_string(), params.to_vec()));
        self.fetch_results.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[allow(dead_code)]
pub fn row(pairs: &[(&str, SqlValue)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[allow(dead_code)]
pub fn member_row(id: i64, low: &str, high: &str) -> Row {
    row(&[
        ("id", SqlValue::Int(id)),
        ("distribution_key", SqlValue::from("user_id")),
        ("range_low", SqlValue::from(low)),
        ("range_high", SqlValue::from(high)),
    ])
}
