//! MySQL relational store implementation.
//!
//! Fronts the transactions database using sqlx. Results are rendered to the
//! textual tuple form the renderer and summarization prompts consume.

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, Row, TypeInfo};
use std::time::Duration;
use tracing::{debug, warn};

use super::RelationalStore;
use crate::error::{AssistError, Result};

/// Maximum number of connection retry attempts.
const MAX_RETRY_ATTEMPTS: u32 = 3;

/// Base delay between retry attempts (doubles each retry).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// MySQL-backed relational store.
#[derive(Debug)]
pub struct MySqlStore {
    pool: MySqlPool,
    query_timeout: Duration,
}

impl MySqlStore {
    /// Connects to the database at the given URL.
    pub async fn connect(url: &str, query_timeout_secs: u64) -> Result<Self> {
        let mut last_error = None;
        let mut delay = Duration::from_millis(RETRY_BASE_DELAY_MS);

        for attempt in 1..=MAX_RETRY_ATTEMPTS {
            debug!("Connection attempt {} of {}", attempt, MAX_RETRY_ATTEMPTS);

            let result = MySqlPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(10))
                .connect(url)
                .await;

            match result {
                Ok(pool) => {
                    debug!("Successfully connected to database");
                    return Ok(Self {
                        pool,
                        query_timeout: Duration::from_secs(query_timeout_secs),
                    });
                }
                Err(e) => {
                    let is_transient = is_transient_error(&e);
                    last_error = Some(e);

                    if attempt < MAX_RETRY_ATTEMPTS && is_transient {
                        warn!(
                            "Connection attempt {} failed (transient error), retrying in {:?}",
                            attempt, delay
                        );
                        tokio::time::sleep(delay).await;
                        delay *= 2;
                    }
                }
            }
        }

        Err(AssistError::unavailable(format!(
            "Could not connect to relational store: {}",
            last_error.expect("at least one attempt was made")
        )))
    }

    /// Creates a store from an existing pool. Primarily useful for testing.
    #[allow(dead_code)]
    pub fn from_pool(pool: MySqlPool, query_timeout_secs: u64) -> Self {
        Self {
            pool,
            query_timeout: Duration::from_secs(query_timeout_secs),
        }
    }
}

#[async_trait]
impl RelationalStore for MySqlStore {
    async fn run(&self, statement: &str) -> Result<String> {
        let rows = tokio::time::timeout(
            self.query_timeout,
            sqlx::query(statement).fetch_all(&self.pool),
        )
        .await
        .map_err(|_| {
            AssistError::statement(format!(
                "Query timed out after {} seconds",
                self.query_timeout.as_secs()
            ))
        })?
        .map_err(|e| AssistError::statement(format_statement_error(e)))?;

        Ok(format_rows(&rows))
    }

    async fn describe_schema(&self) -> Result<String> {
        let columns: Vec<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT table_name, column_name, column_type
            FROM information_schema.columns
            WHERE table_schema = DATABASE()
            ORDER BY table_name, ordinal_position
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AssistError::statement(format!("Failed to fetch schema: {e}")))?;

        let mut out = String::new();
        let mut current_table = String::new();
        for (table, column, column_type) in columns {
            if table != current_table {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(&format!("Table: {table}\n"));
                current_table = table;
            }
            out.push_str(&format!("  {column} {column_type}\n"));
        }
        Ok(out)
    }

    async fn probe(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AssistError::unavailable(format!("Store probe failed: {e}")))?;
        Ok(count.max(0) as u64)
    }
}

/// Formats result rows as a list of tuples, e.g. `[('C001', 50000), ('C002', 75000)]`.
fn format_rows(rows: &[MySqlRow]) -> String {
    let formatted: Vec<String> = rows
        .iter()
        .map(|row| {
            let values: Vec<String> = row
                .columns()
                .iter()
                .enumerate()
                .map(|(i, col)| format_value(row, i, col.type_info().name()))
                .collect();
            format!("({})", values.join(", "))
        })
        .collect();
    format!("[{}]", formatted.join(", "))
}

/// Formats a single column value for the textual result.
fn format_value(row: &MySqlRow, index: usize, type_name: &str) -> String {
    match type_name.to_uppercase().as_str() {
        "BOOLEAN" | "BOOL" | "TINYINT(1)" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "NULL".to_string()),

        "TINYINT" | "SMALLINT" | "INT" | "MEDIUMINT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "NULL".to_string()),

        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "INT UNSIGNED" | "MEDIUMINT UNSIGNED"
        | "BIGINT UNSIGNED" => row
            .try_get::<Option<u64>, _>(index)
            .ok()
            .flatten()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "NULL".to_string()),

        "FLOAT" | "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "NULL".to_string()),

        "DATE" => row
            .try_get::<Option<sqlx::types::time::Date>, _>(index)
            .ok()
            .flatten()
            .map(|v| format!("'{v}'"))
            .unwrap_or_else(|| "NULL".to_string()),

        "DATETIME" | "TIMESTAMP" => row
            .try_get::<Option<sqlx::types::time::PrimitiveDateTime>, _>(index)
            .ok()
            .flatten()
            .map(|v| format!("'{v}'"))
            .unwrap_or_else(|| "NULL".to_string()),

        // Everything else is rendered through its string form
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(|v| format!("'{v}'"))
            .unwrap_or_else(|| "NULL".to_string()),
    }
}

/// Formats a statement execution error, keeping the server's message intact
/// so the correction path can recognize "Unknown column" failures.
fn format_statement_error(error: sqlx::Error) -> String {
    match error {
        sqlx::Error::Database(db_err) => db_err.message().to_string(),
        other => other.to_string(),
    }
}

/// Determines if a connection error is transient and worth retrying.
fn is_transient_error(error: &sqlx::Error) -> bool {
    let error_str = error.to_string().to_lowercase();

    if error_str.contains("connection refused")
        || error_str.contains("timed out")
        || error_str.contains("timeout")
        || error_str.contains("temporarily unavailable")
        || error_str.contains("connection reset")
        || error_str.contains("broken pipe")
    {
        return true;
    }

    if error_str.contains("access denied")
        || error_str.contains("unknown database")
        || error_str.contains("ssl")
        || error_str.contains("tls")
    {
        return false;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_error_detection() {
        let err = sqlx::Error::PoolTimedOut;
        assert!(is_transient_error(&err));
    }

    #[test]
    fn test_non_transient_error_detection() {
        let err = sqlx::Error::RowNotFound;
        assert!(!is_transient_error(&err));
    }

    #[test]
    fn test_format_statement_error_passthrough() {
        let msg = format_statement_error(sqlx::Error::RowNotFound);
        assert!(!msg.is_empty());
    }
}
