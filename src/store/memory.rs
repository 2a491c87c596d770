//! In-memory document store.
//!
//! Holds client records as JSON objects and answers exact-match filters.
//! Used both as the seeded production store and as a test double.

use async_trait::async_trait;
use serde_json::Value;
use std::path::Path;

use super::{Document, DocumentStore, Filter};
use crate::error::{AssistError, Result};

/// A document store backed by an in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Vec<Document>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given documents.
    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    /// Loads documents from a JSON file containing an array of objects.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AssistError::unavailable(format!(
                "Could not read document seed file {}: {e}",
                path.display()
            ))
        })?;

        let values: Vec<Value> = serde_json::from_str(&contents).map_err(|e| {
            AssistError::unavailable(format!("Invalid document seed file: {e}"))
        })?;

        let documents = values
            .into_iter()
            .map(|v| match v {
                Value::Object(map) => Ok(map),
                other => Err(AssistError::unavailable(format!(
                    "Document seed entries must be objects, got: {other}"
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { documents })
    }

}

/// Returns true if the document matches every field of the filter.
///
/// A scalar filter value matches a field that equals it, or an array field
/// that contains it. An empty filter matches everything. Shared with the
/// degraded-mode provider so both filter documents identically.
pub(crate) fn matches_filter(document: &Document, filter: &Filter) -> bool {
    filter.iter().all(|(field, expected)| {
        match document.get(field) {
            Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
            Some(actual) => actual == expected,
            None => false,
        }
    })
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find(&self, filter: &Filter) -> Result<Vec<Document>> {
        Ok(self
            .documents
            .iter()
            .filter(|doc| matches_filter(doc, filter))
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &Filter) -> Result<u64> {
        Ok(self
            .documents
            .iter()
            .filter(|doc| matches_filter(doc, filter))
            .count() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn sample_store() -> MemoryDocumentStore {
        MemoryDocumentStore::with_documents(vec![
            doc(json!({
                "client_id": "C001",
                "name": "Virat Kohli",
                "risk_appetite": "High",
                "investment_preferences": ["Stocks", "Real Estate"]
            })),
            doc(json!({
                "client_id": "C002",
                "name": "Rohit Sharma",
                "risk_appetite": "Medium",
                "investment_preferences": ["Stocks", "Bonds"]
            })),
        ])
    }

    fn filter(value: Value) -> Filter {
        doc(value)
    }

    #[tokio::test]
    async fn test_exact_match() {
        let store = sample_store();
        let results = store
            .find(&filter(json!({"risk_appetite": "High"})))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["client_id"], "C001");
    }

    #[tokio::test]
    async fn test_array_membership() {
        let store = sample_store();
        let results = store
            .find(&filter(json!({"investment_preferences": "Stocks"})))
            .await
            .unwrap();
        assert_eq!(results.len(), 2);

        let results = store
            .find(&filter(json!({"investment_preferences": "Bonds"})))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["client_id"], "C002");
    }

    #[tokio::test]
    async fn test_empty_filter_matches_all() {
        let store = sample_store();
        assert_eq!(store.count(&Filter::new()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let store = sample_store();
        let results = store
            .find(&filter(json!({"risk_appetite": "Low"})))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_field_matches_nothing() {
        let store = sample_store();
        let results = store
            .find(&filter(json!({"shoe_size": 42})))
            .await
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"client_id": "C010", "name": "Test", "risk_appetite": "Low"}}]"#
        )
        .unwrap();

        let store = MemoryDocumentStore::from_json_file(file.path()).unwrap();
        assert_eq!(store.documents.len(), 1);
    }

    #[test]
    fn test_from_json_file_rejects_non_objects() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[1, 2, 3]"#).unwrap();

        let err = MemoryDocumentStore::from_json_file(file.path()).unwrap_err();
        assert_eq!(err.category(), "Backend Unavailable");
    }
}
