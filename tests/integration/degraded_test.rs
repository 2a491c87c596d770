//! Degraded-mode behavior: no stores configured, fixture answers only.

use std::sync::Arc;

use folio_assist::agent::Assistant;
use folio_assist::llm::MockLlmClient;

fn offline_assistant() -> Assistant {
    Assistant::new(Arc::new(MockLlmClient::new()))
}

#[tokio::test]
async fn test_document_degraded_names_exact_high_risk_fixtures() {
    let answer = offline_assistant()
        .answer("clients with high risk appetite")
        .await;

    // Exactly the fixture clients whose risk level is High.
    assert!(answer.text.contains("Virat Kohli (ID: C001)"));
    assert!(answer.text.contains("KL Rahul (ID: C004)"));
    assert!(!answer.text.contains("C002"));
    assert!(!answer.text.contains("C003"));
    assert!(!answer.text.contains("C005"));
    assert!(answer.text.contains("[Note: Using mock data"));
}

#[tokio::test]
async fn test_document_degraded_low_risk() {
    let answer = offline_assistant()
        .answer("which clients have a low risk appetite?")
        .await;

    assert!(answer.text.contains("Found 1 client(s) with low risk appetite"));
    assert!(answer.text.contains("MS Dhoni (ID: C003)"));
}

#[tokio::test]
async fn test_relational_degraded_total_amount() {
    let answer = offline_assistant()
        .answer("What is the total amount invested across all transactions?")
        .await;

    assert!(answer.text.contains("Total amount invested: ₹300,000"));
    assert!(answer.text.contains("[Note: Using mock data"));
}

#[tokio::test]
async fn test_relational_degraded_sample_fallback() {
    let answer = offline_assistant().answer("show me the latest activity").await;

    assert!(answer.text.contains("Sample transactions:"));
    assert!(answer.text.contains("[Note: Using mock data"));
}

#[tokio::test]
async fn test_degraded_mode_makes_no_model_calls() {
    // A model that would panic if consulted; degraded answers bypass it.
    use async_trait::async_trait;
    use folio_assist::error::Result;
    use folio_assist::llm::LlmClient;

    #[derive(Debug)]
    struct PanickingLlm;

    #[async_trait]
    impl LlmClient for PanickingLlm {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            panic!("degraded mode must not call the model");
        }
    }

    let assistant = Assistant::new(Arc::new(PanickingLlm));
    let answer = assistant.answer("clients with high risk appetite").await;
    assert!(answer.text.contains("Virat Kohli"));

    let answer = assistant.answer("total transactions?").await;
    assert!(!answer.text.is_empty());
}
