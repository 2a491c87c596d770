//! Query execution against the two backends.
//!
//! Both executors convert every failure into a tagged outcome; nothing
//! above them sees a raw error. The relational executor owns the one-shot
//! repair: a recognized unknown-column failure triggers the correction
//! table and exactly one retry.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::error::AssistError;
use crate::store::{Document, DocumentStore, Filter, RelationalStore};

use super::corrections;

/// Note attached to a successful result from a reachable but empty store.
pub const EMPTY_CLIENTS_NOTE: &str =
    "No client data found in the database. Please add some sample client data first.";
pub const EMPTY_TRANSACTIONS_NOTE: &str =
    "No transaction data found in the database. Please add some sample transactions first.";

/// Outcome of executing a generated query.
#[derive(Debug)]
pub enum ExecutionOutcome {
    /// Documents returned by the document store. An empty list is a valid
    /// result, not a failure; `note` explains an empty backing store.
    Documents {
        documents: Vec<Document>,
        note: Option<&'static str>,
    },
    /// Raw textual result from the relational store, along with the
    /// statement that actually ran (after any repair).
    Rows {
        statement: String,
        result: String,
        note: Option<&'static str>,
    },
    /// Execution failed; `kind` names the failure class.
    Failure { kind: &'static str, message: String },
}

impl ExecutionOutcome {
    fn failure(error: AssistError) -> Self {
        let kind = error.category();
        let message = match error {
            AssistError::InvalidInput(m)
            | AssistError::Unavailable(m)
            | AssistError::Statement(m)
            | AssistError::Llm(m)
            | AssistError::Config(m)
            | AssistError::Internal(m) => m,
            other @ AssistError::Translation { .. } => other.to_string(),
        };
        Self::Failure { kind, message }
    }
}

/// Executor for the document store.
pub struct DocumentExecutor {
    store: Arc<dyn DocumentStore>,
    probe: OnceCell<u64>,
}

impl DocumentExecutor {
    /// Creates an executor over the given store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            probe: OnceCell::new(),
        }
    }

    /// Runs the filter as an exact match over the collection.
    pub async fn execute(&self, filter: &Filter) -> ExecutionOutcome {
        let total = match self
            .probe
            .get_or_try_init(|| async {
                let everything = Filter::new();
                self.store.count(&everything).await
            })
            .await
        {
            Ok(total) => *total,
            Err(e) => {
                warn!("Document store probe failed: {e}");
                return ExecutionOutcome::failure(e);
            }
        };

        if total == 0 {
            return ExecutionOutcome::Documents {
                documents: Vec::new(),
                note: Some(EMPTY_CLIENTS_NOTE),
            };
        }

        match self.store.find(filter).await {
            Ok(documents) => {
                debug!(count = documents.len(), "Document query returned");
                ExecutionOutcome::Documents {
                    documents,
                    note: None,
                }
            }
            Err(e) => ExecutionOutcome::failure(e),
        }
    }
}

/// Executor for the relational store.
pub struct RelationalExecutor {
    store: Arc<dyn RelationalStore>,
    probe: OnceCell<u64>,
}

impl RelationalExecutor {
    /// Creates an executor over the given store.
    pub fn new(store: Arc<dyn RelationalStore>) -> Self {
        Self {
            store,
            probe: OnceCell::new(),
        }
    }

    /// Runs the statement, repairing and retrying exactly once when the
    /// failure is a recognized unknown-column class.
    pub async fn execute(&self, statement: &str) -> ExecutionOutcome {
        let total = match self.probe.get_or_try_init(|| self.store.probe()).await {
            Ok(total) => *total,
            Err(e) => {
                warn!("Relational store probe failed: {e}");
                return ExecutionOutcome::failure(e);
            }
        };

        if total == 0 {
            return ExecutionOutcome::Rows {
                statement: statement.to_string(),
                result: "[]".to_string(),
                note: Some(EMPTY_TRANSACTIONS_NOTE),
            };
        }

        let error = match self.store.run(statement).await {
            Ok(result) => {
                return ExecutionOutcome::Rows {
                    statement: statement.to_string(),
                    result,
                    note: None,
                }
            }
            Err(e) => e,
        };

        let message = error.to_string();
        if !corrections::is_recoverable(&message) {
            return ExecutionOutcome::failure(error);
        }

        let repaired = corrections::repair(statement);
        if repaired == statement {
            // Nothing in the correction table applies; report the failure.
            return ExecutionOutcome::failure(error);
        }

        info!("Retrying with corrected statement: {repaired}");
        match self.store.run(&repaired).await {
            Ok(result) => ExecutionOutcome::Rows {
                statement: repaired,
                result,
                note: None,
            },
            Err(retry_error) => ExecutionOutcome::failure(retry_error),
        }
    }
}
