//! Result rendering back into natural language.
//!
//! Document results are formatted deterministically; relational results go
//! back through the model for summarization, falling back to the raw result
//! text when that second call fails.

use tracing::warn;

use crate::llm::LlmClient;
use crate::store::Document;

use super::execute::ExecutionOutcome;

/// Fixed sentence for a document query that matched nothing.
pub const NO_MATCH_SENTENCE: &str = "No matching clients found for your query.";

/// Prompt template for summarizing a relational result.
const SUMMARY_PROMPT_TEMPLATE: &str = r#"Question: {question}
SQL Query: {statement}
Query Result: {result}

Please provide a clear, natural language answer to the original question based on these results.

Guidelines:
1. Be concise but informative
2. Format numbers with commas for readability
3. Include currency symbols where applicable
4. If the result is empty, say "No data found"
5. Don't include technical SQL details in the answer

Answer:"#;

/// Renders an execution outcome as a natural-language answer.
pub async fn render(question: &str, outcome: &ExecutionOutcome, llm: &dyn LlmClient) -> String {
    match outcome {
        ExecutionOutcome::Documents { documents, note } => {
            if let Some(note) = note {
                return note.to_string();
            }
            render_documents(documents)
        }
        ExecutionOutcome::Rows {
            statement,
            result,
            note,
        } => {
            if let Some(note) = note {
                return note.to_string();
            }
            summarize_rows(question, statement, result, llm).await
        }
        ExecutionOutcome::Failure { kind, message } => {
            format!("{kind}: {message}")
        }
    }
}

/// Formats matched documents with a count prefix.
fn render_documents(documents: &[Document]) -> String {
    if documents.is_empty() {
        return NO_MATCH_SENTENCE.to_string();
    }

    let entries: Vec<String> = documents.iter().map(describe_client).collect();
    format!(
        "Found {} client(s): {}",
        documents.len(),
        entries.join(", ")
    )
}

/// Formats one client document into the fixed name/identifier/risk template.
fn describe_client(document: &Document) -> String {
    let name = document
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown");
    let client_id = document
        .get("client_id")
        .and_then(|v| v.as_str())
        .unwrap_or("N/A");
    let risk = document
        .get("risk_appetite")
        .and_then(|v| v.as_str())
        .unwrap_or("N/A");
    format!("{name} (ID: {client_id}, Risk: {risk})")
}

/// Asks the model to phrase the raw relational result as an answer.
///
/// A failed summarization never propagates; the raw result is returned with
/// a formatting note instead.
async fn summarize_rows(
    question: &str,
    statement: &str,
    result: &str,
    llm: &dyn LlmClient,
) -> String {
    let prompt = SUMMARY_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{statement}", statement)
        .replace("{result}", result);

    match llm.complete(&prompt).await {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Result summarization failed: {e}");
            format!("Result: {result}\n(Formatting error: {e})")
        }
    }
}
