//! Scriptable relational store for testing.
//!
//! Records every executed statement and can be scripted to fail a set
//! number of times before succeeding, which is how the retry-once repair
//! path is exercised without a live database.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::RelationalStore;
use crate::error::{AssistError, Result};

/// A relational store double returning canned results.
#[derive(Debug, Default)]
pub struct MockRelationalStore {
    /// Result text returned on success.
    result: String,
    /// Error messages to fail with, consumed front-to-back before succeeding.
    failures: Mutex<VecDeque<String>>,
    /// Every statement passed to `run`, in order.
    executed: Mutex<Vec<String>>,
    /// Record count reported by `probe`.
    record_count: u64,
}

impl MockRelationalStore {
    /// Creates a store that succeeds with an empty result.
    pub fn new() -> Self {
        Self {
            result: "[]".to_string(),
            record_count: 5,
            ..Self::default()
        }
    }

    /// Sets the result text returned on success.
    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = result.into();
        self
    }

    /// Queues an error for the next `run` call.
    ///
    /// Queue twice to fail both the original attempt and the retry.
    pub fn failing_with(self, message: impl Into<String>) -> Self {
        self.failures.lock().unwrap().push_back(message.into());
        self
    }

    /// Sets the record count reported by `probe`.
    pub fn with_record_count(mut self, count: u64) -> Self {
        self.record_count = count;
        self
    }

    /// Returns every statement executed so far.
    pub fn executed_statements(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelationalStore for MockRelationalStore {
    async fn run(&self, statement: &str) -> Result<String> {
        self.executed.lock().unwrap().push(statement.to_string());

        if let Some(message) = self.failures.lock().unwrap().pop_front() {
            return Err(AssistError::statement(message));
        }

        Ok(self.result.clone())
    }

    async fn describe_schema(&self) -> Result<String> {
        Ok("Table: transactions\n  transaction_id varchar(10)\n  client_id varchar(10)\n  stock_name varchar(100)\n  amount_invested int\n  date_ date\n  rm_name varchar(100)\n".to_string())
    }

    async fn probe(&self) -> Result<u64> {
        Ok(self.record_count)
    }
}
