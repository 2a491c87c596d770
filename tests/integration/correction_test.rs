//! Statement repair behavior through the full pipeline.

use pretty_assertions::assert_eq;
use std::sync::Arc;

use folio_assist::agent::Assistant;
use folio_assist::llm::MockLlmClient;
use folio_assist::store::MockRelationalStore;

/// A model that emits the wrong column names the correction table knows about.
fn sloppy_model() -> MockLlmClient {
    MockLlmClient::new().with_response(
        "Generate a SQL query",
        "```sql\nSELECT SUM(amount) FROM transactions WHERE date > '2024-01-01'\n```",
    )
}

#[tokio::test]
async fn test_unknown_column_failure_is_repaired_and_retried_once() {
    let store = Arc::new(
        MockRelationalStore::new()
            .with_result("[(300000,)]")
            .failing_with("Unknown column 'amount' in 'field list'"),
    );
    let assistant = Assistant::new(Arc::new(sloppy_model()))
        .with_relational_store(store.clone());

    let answer = assistant
        .answer("What is the sum invested this year?")
        .await;

    // The retry succeeded, so the model's summary comes back.
    assert_eq!(
        answer.text,
        "Based on the data, here is the answer to your question."
    );

    // Exactly two executions: the failing original and one repaired retry
    // with every matching token replaced.
    assert_eq!(
        store.executed_statements(),
        vec![
            "SELECT SUM(amount) FROM transactions WHERE date > '2024-01-01';".to_string(),
            "SELECT SUM(amount_invested) FROM transactions WHERE date_ > '2024-01-01';"
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn test_second_failure_surfaces_without_third_attempt() {
    let store = Arc::new(
        MockRelationalStore::new()
            .failing_with("Unknown column 'amount' in 'field list'")
            .failing_with("Unknown column 'date_' in 'field list'"),
    );
    let assistant = Assistant::new(Arc::new(sloppy_model()))
        .with_relational_store(store.clone());

    let answer = assistant.answer("What is the sum invested?").await;

    assert!(answer.text.contains("Statement Error"));
    assert!(answer.text.contains("Unknown column 'date_'"));
    assert_eq!(store.executed_statements().len(), 2);
}

#[tokio::test]
async fn test_unrecognized_error_is_not_retried() {
    let store = Arc::new(
        MockRelationalStore::new().failing_with("You have an error in your SQL syntax"),
    );
    let assistant = Assistant::new(Arc::new(sloppy_model()))
        .with_relational_store(store.clone());

    let answer = assistant.answer("What is the sum invested?").await;

    assert!(answer.text.contains("Statement Error"));
    assert_eq!(store.executed_statements().len(), 1);
}

#[tokio::test]
async fn test_partial_word_tokens_survive_repair() {
    // "amounts" is not a whole-word match for the "amount" rule, so the
    // repaired statement is identical and no retry happens.
    let model = MockLlmClient::new().with_response(
        "Generate a SQL query",
        "SELECT amounts FROM transactions;",
    );
    let store = Arc::new(
        MockRelationalStore::new().failing_with("Unknown column 'amounts' in 'field list'"),
    );
    let assistant = Assistant::new(Arc::new(model)).with_relational_store(store.clone());

    let answer = assistant.answer("What are the amounts?").await;

    assert!(answer.text.contains("Statement Error"));
    assert_eq!(
        store.executed_statements(),
        vec!["SELECT amounts FROM transactions;".to_string()]
    );
}
