//! Storage abstraction for the two backing stores.
//!
//! The assistant fronts a document store (client records) and a relational
//! store (transaction records). Both are trait-based so they can be swapped
//! for in-memory doubles in tests and degraded environments.

pub mod memory;
pub mod mock;
pub mod mysql;
pub mod schema;

pub use memory::MemoryDocumentStore;
pub use mock::MockRelationalStore;
#[allow(unused_imports)]
pub use mysql::MySqlStore;
pub use schema::SchemaDescriptor;

use async_trait::async_trait;

use crate::error::Result;

/// A client record: a flat JSON object keyed by field name.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// A document query: field name to match-expression.
pub type Filter = serde_json::Map<String, serde_json::Value>;

/// The two backend families a question can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Schema-less store holding client records.
    Document,
    /// Tabular store holding transaction records.
    Relational,
}

impl BackendKind {
    /// Returns the backend kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Relational => "relational",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Trait defining the interface to the document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns all documents matching the filter.
    async fn find(&self, filter: &Filter) -> Result<Vec<Document>>;

    /// Returns the number of documents matching the filter.
    async fn count(&self, filter: &Filter) -> Result<u64>;
}

/// Trait defining the interface to the relational store.
#[async_trait]
pub trait RelationalStore: Send + Sync {
    /// Runs a SQL statement and returns the raw result as text.
    async fn run(&self, statement: &str) -> Result<String>;

    /// Returns a textual description of the store's schema.
    async fn describe_schema(&self) -> Result<String>;

    /// Returns the number of queryable records in the store.
    async fn probe(&self) -> Result<u64>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_display() {
        assert_eq!(BackendKind::Document.to_string(), "document");
        assert_eq!(BackendKind::Relational.to_string(), "relational");
    }
}
