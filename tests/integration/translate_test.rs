//! Translation behavior through the public API.

use pretty_assertions::assert_eq;
use serde_json::json;

use folio_assist::agent::{translate_document_filter, translate_statement};
use folio_assist::llm::MockLlmClient;
use folio_assist::store::SchemaDescriptor;

#[tokio::test]
async fn test_high_risk_filter_shape() {
    let llm = MockLlmClient::new();
    let filter = translate_document_filter(
        "clients with high risk appetite",
        &SchemaDescriptor::clients(),
        &llm,
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::Value::Object(filter),
        json!({"risk_appetite": "High"})
    );
}

#[tokio::test]
async fn test_low_and_medium_filters() {
    let llm = MockLlmClient::new();
    let schema = SchemaDescriptor::clients();

    let low = translate_document_filter("low risk clients", &schema, &llm)
        .await
        .unwrap();
    assert_eq!(serde_json::Value::Object(low), json!({"risk_appetite": "Low"}));

    let medium = translate_document_filter("medium risk clients", &schema, &llm)
        .await
        .unwrap();
    assert_eq!(
        serde_json::Value::Object(medium),
        json!({"risk_appetite": "Medium"})
    );
}

#[tokio::test]
async fn test_translation_is_idempotent() {
    let llm = MockLlmClient::new();
    let schema = SchemaDescriptor::clients();

    let first = translate_document_filter("clients who invest in stocks", &schema, &llm)
        .await
        .unwrap();
    let second = translate_document_filter("clients who invest in stocks", &schema, &llm)
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_heuristic_stage_recovers_unparseable_reply() {
    // The model reply is prose, but the question itself carries a trigger.
    let llm = MockLlmClient::new()
        .with_response("User Question", "Sure! Here is what I would filter on.");
    let filter = translate_document_filter(
        "clients with medium risk appetite",
        &SchemaDescriptor::clients(),
        &llm,
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::Value::Object(filter),
        json!({"risk_appetite": "Medium"})
    );
}

#[tokio::test]
async fn test_literal_stage_recovers_python_style_reply() {
    let llm = MockLlmClient::new()
        .with_response("User Question", "{'investment_preferences': 'Stocks'}");
    let filter = translate_document_filter(
        "who holds stocks?",
        &SchemaDescriptor::clients(),
        &llm,
    )
    .await
    .unwrap();

    assert_eq!(
        serde_json::Value::Object(filter),
        json!({"investment_preferences": "Stocks"})
    );
}

#[tokio::test]
async fn test_statement_translation_terminates_with_semicolon() {
    let llm = MockLlmClient::new();
    let statement = translate_statement(
        "How many transactions are there?",
        &SchemaDescriptor::transactions(),
        &llm,
    )
    .await
    .unwrap();

    assert_eq!(statement, "SELECT COUNT(*) FROM transactions;");
    assert!(statement.ends_with(';'));
    assert!(!statement.contains("```"));
}
