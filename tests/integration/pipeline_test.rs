//! End-to-end pipeline tests over the public API.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

use folio_assist::agent::Assistant;
use folio_assist::llm::MockLlmClient;
use folio_assist::store::{Document, MemoryDocumentStore, MockRelationalStore};

fn doc(value: serde_json::Value) -> Document {
    value.as_object().unwrap().clone()
}

/// The scenario from the product demo: two clients, one of them High risk.
fn demo_document_store() -> MemoryDocumentStore {
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

#[tokio::test]
async fn test_high_risk_question_end_to_end() {
    let assistant = Assistant::new(Arc::new(MockLlmClient::new()))
        .with_document_store(Arc::new(demo_document_store()));

    let answer = assistant
        .answer("Find clients with high risk appetite")
        .await;

    assert_eq!(
        answer.text,
        "Found 1 client(s): Virat Kohli (ID: C001, Risk: High)"
    );
    assert!(!answer.text.contains("C002"));
}

#[tokio::test]
async fn test_no_match_yields_fixed_sentence() {
    let assistant = Assistant::new(Arc::new(MockLlmClient::new()))
        .with_document_store(Arc::new(demo_document_store()));

    // Neither demo client has Low risk appetite.
    let answer = assistant.answer("Show clients with low risk appetite").await;

    assert_eq!(answer.text, "No matching clients found for your query.");
}

#[tokio::test]
async fn test_relational_question_end_to_end() {
    let store = Arc::new(MockRelationalStore::new().with_result("[(5,)]"));
    let assistant = Assistant::new(Arc::new(MockLlmClient::new()))
        .with_relational_store(store.clone());

    let answer = assistant.answer("How many transactions are there?").await;

    // The mock model summarizes the raw result deterministically.
    assert_eq!(
        answer.text,
        "Based on the data, here is the answer to your question."
    );
    assert_eq!(
        store.executed_statements(),
        vec!["SELECT COUNT(*) FROM transactions;".to_string()]
    );
}

#[tokio::test]
async fn test_answer_always_returns_for_non_blank_questions() {
    let assistant = Assistant::new(Arc::new(MockLlmClient::new()))
        .with_document_store(Arc::new(demo_document_store()))
        .with_relational_store(Arc::new(MockRelationalStore::new()));

    for question in [
        "clients?",
        "transactions?",
        "absolute nonsense with no keywords",
        "portfolio risk manager investor client",
    ] {
        let answer = assistant.answer(question).await;
        assert!(!answer.text.is_empty(), "no answer for {question:?}");
    }
}

#[tokio::test]
async fn test_blank_question_rejected_before_backend_work() {
    let store = Arc::new(MockRelationalStore::new());
    let assistant =
        Assistant::new(Arc::new(MockLlmClient::new())).with_relational_store(store.clone());

    let answer = assistant.answer("\t  \n").await;

    assert!(answer.text.contains("Invalid input"));
    assert!(store.executed_statements().is_empty());
}

#[tokio::test]
async fn test_empty_document_store_notes_missing_data() {
    let assistant = Assistant::new(Arc::new(MockLlmClient::new()))
        .with_document_store(Arc::new(MemoryDocumentStore::new()));

    let answer = assistant.answer("clients with high risk appetite").await;

    assert!(answer.text.contains("No client data found"));
}

#[tokio::test]
async fn test_elapsed_time_is_reported() {
    let assistant = Assistant::new(Arc::new(MockLlmClient::new()));
    let answer = assistant.answer("clients with high risk").await;
    assert!(answer.elapsed_secs() >= 0.0);
    assert!(answer.elapsed_secs() < 30.0);
}
