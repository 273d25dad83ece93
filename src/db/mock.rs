//! Mock database client for testing.
//!
//! Provides an in-memory farm database implementation for testing the
//! workflow without a running PostgreSQL server.

use super::{Column, ColumnInfo, DatabaseClient, ForeignKey, QueryResult, Schema, Table, Value};
use crate::error::{Result, WizardError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// A mock database client that returns predefined results.
pub struct MockDatabaseClient {
    schema: Schema,
    /// Canned results keyed by exact SQL text.
    canned_results: HashMap<String, QueryResult>,
}

impl MockDatabaseClient {
    /// Creates a new mock client with the sample farm schema.
    pub fn new() -> Self {
        Self {
            schema: farm_schema(),
            canned_results: HashMap::new(),
        }
    }

    /// Creates a new mock client with the given schema.
    #[allow(dead_code)]
    pub fn with_schema(schema: Schema) -> Self {
        Self {
            schema,
            canned_results: HashMap::new(),
        }
    }

    /// Registers a canned result for an exact SQL string.
    pub fn add_canned_result(&mut self, sql: impl Into<String>, result: QueryResult) {
        self.canned_results.insert(sql.into(), result);
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Ok(self.schema.clone())
    }

    async fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        if let Some(result) = self.canned_results.get(sql) {
            return Ok(result.clone());
        }

        let sql_upper = sql.to_uppercase();

        if sql_upper.starts_with("SELECT") {
            let columns = vec![ColumnInfo::new("gunluk_sagim", "numeric")];
            let rows = vec![vec![Value::Float(25.5)]];

            Ok(QueryResult::with_data(columns, rows)
                .with_execution_time(Duration::from_millis(1)))
        } else {
            Err(WizardError::query(format!(
                "syntax error at or near \"{}\"",
                sql.split_whitespace().next().unwrap_or(sql)
            )))
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A mock client whose queries always fail.
///
/// Used to test the error-as-text channel in the executor.
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a failing client with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn introspect_schema(&self) -> Result<Schema> {
        Ok(farm_schema())
    }

    async fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(WizardError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// Builds the sample farm schema used by the mock clients.
pub fn farm_schema() -> Schema {
    Schema {
        tables: vec![
            Table {
                name: "inekler".to_string(),
                columns: vec![
                    Column::new("inek_id", "integer").nullable(false),
                    Column::new("inek_name", "character varying").nullable(false),
                    Column::new("irk", "character varying"),
                    Column::new("dogum_tarihi", "date"),
                ],
                primary_key: vec!["inek_id".to_string()],
            },
            Table {
                name: "sut".to_string(),
                columns: vec![
                    Column::new("sagim_id", "integer").nullable(false),
                    Column::new("inek_id", "integer").nullable(false),
                    Column::new("gunluk_sagim", "numeric"),
                    Column::new("sagim_tarihi", "date").nullable(false),
                ],
                primary_key: vec!["sagim_id".to_string()],
            },
        ],
        foreign_keys: vec![ForeignKey::new(
            "sut",
            vec!["inek_id".to_string()],
            "inekler",
            vec!["inek_id".to_string()],
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_select() {
        let client = MockDatabaseClient::new();
        let result = client.execute_query("SELECT 1").await.unwrap();
        assert_eq!(result.row_count, 1);
        assert_eq!(result.columns.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_non_select_fails() {
        let client = MockDatabaseClient::new();
        let result = client.execute_query("SELEKT * FROM sut").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mock_canned_result() {
        let mut client = MockDatabaseClient::new();
        client.add_canned_result(
            "SELECT inek_name FROM inekler",
            QueryResult::with_data(
                vec![ColumnInfo::new("inek_name", "varchar")],
                vec![vec![Value::String("Sarıkız".to_string())]],
            ),
        );

        let result = client
            .execute_query("SELECT inek_name FROM inekler")
            .await
            .unwrap();
        assert_eq!(result.rows[0][0], Value::String("Sarıkız".to_string()));
    }

    #[tokio::test]
    async fn test_mock_schema_has_farm_tables() {
        let client = MockDatabaseClient::new();
        let schema = client.introspect_schema().await.unwrap();
        let names: Vec<&str> = schema.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["inekler", "sut"]);
    }

    #[tokio::test]
    async fn test_failing_client() {
        let client = FailingDatabaseClient::new("relation \"sut\" does not exist");
        let result = client.execute_query("SELECT * FROM sut").await;
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("does not exist"));
    }
}
