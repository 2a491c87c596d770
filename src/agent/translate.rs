//! Question-to-query translation.
//!
//! Model output is unreliable, so document translation runs a layered parse
//! chain: strict JSON first, then a permissive Python-literal parse, then a
//! keyword heuristic that bypasses the model output entirely. Each stage is
//! more permissive and less faithful than the one before it.

use tracing::debug;

use crate::error::{AssistError, Result};
use crate::llm::LlmClient;
use crate::store::{Filter, SchemaDescriptor};

use super::triggers::match_document_trigger;

/// Prompt template for document filter generation.
const DOCUMENT_PROMPT_TEMPLATE: &str = r#"You are a document query generator for a client collection.

COLLECTION:
{schema}

Convert the user's question into a query filter in JSON format.
ONLY return the valid JSON object with the filter. No explanation, no markdown formatting.

User Question:
"{question}"
"#;

/// Prompt template for SQL statement generation.
const STATEMENT_PROMPT_TEMPLATE: &str = r#"Based on this MySQL database schema:
{schema}

Generate a SQL query to answer: {question}

RULES:
1. Use EXACT column names from the schema
2. The table name is 'transactions'
3. Use proper MySQL syntax
4. For date filtering, use the date_ column with format 'YYYY-MM-DD'
5. Use LIMIT 10 for large result sets
6. Return ONLY the SQL query, no explanation

SQL Query:"#;

/// Result of one parse stage.
#[derive(Debug)]
enum ParseOutcome {
    /// The stage produced a filter.
    Parsed(Filter),
    /// The stage could not interpret the text.
    NotParsed,
}

/// Translates a question into a document filter.
///
/// Invokes the model once, then walks the parse chain over its reply. When
/// no stage yields a filter the raw reply and the strict-parse error are
/// surfaced for diagnostics.
pub async fn translate_document_filter(
    question: &str,
    schema: &SchemaDescriptor,
    llm: &dyn LlmClient,
) -> Result<Filter> {
    let prompt = DOCUMENT_PROMPT_TEMPLATE
        .replace("{schema}", &schema.format_for_prompt())
        .replace("{question}", question);

    let reply = llm.complete(&prompt).await?;
    let cleaned = strip_code_fences(&reply);

    let strict_error = match parse_strict(&cleaned) {
        ParseOutcome::Parsed(filter) => {
            debug!("Document filter parsed as strict JSON");
            return Ok(filter);
        }
        ParseOutcome::NotParsed => serde_json::from_str::<serde_json::Value>(&cleaned)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "reply is not a JSON object".to_string()),
    };

    if let ParseOutcome::Parsed(filter) = parse_literal(&cleaned) {
        debug!("Document filter parsed as Python-style literal");
        return Ok(filter);
    }

    if let Some(trigger) = match_document_trigger(question) {
        debug!("Document filter synthesized from keyword trigger");
        return Ok(trigger.filter());
    }

    Err(AssistError::translation(reply, strict_error))
}

/// Translates a question into a SQL statement.
pub async fn translate_statement(
    question: &str,
    schema: &SchemaDescriptor,
    llm: &dyn LlmClient,
) -> Result<String> {
    let prompt = STATEMENT_PROMPT_TEMPLATE
        .replace("{schema}", &schema.format_for_prompt())
        .replace("{question}", question);

    let reply = llm.complete(&prompt).await?;
    let statement = clean_statement(&reply);

    if statement == ";" {
        return Err(AssistError::translation(reply, "model returned no SQL"));
    }

    Ok(statement)
}

/// Strict parse: the reply must be a JSON object.
fn parse_strict(text: &str) -> ParseOutcome {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Object(map)) => ParseOutcome::Parsed(map),
        _ => ParseOutcome::NotParsed,
    }
}

/// Permissive parse: accepts Python-literal mappings, e.g.
/// `{'risk_appetite': 'High', 'active': True}`.
fn parse_literal(text: &str) -> ParseOutcome {
    match python_literal_to_json(text) {
        Some(json) => parse_strict(&json),
        None => ParseOutcome::NotParsed,
    }
}

/// Rewrites a Python-literal expression into JSON text.
///
/// Single-quoted strings become double-quoted (escaping embedded quotes);
/// the bare words True/False/None become their JSON spellings. Returns None
/// on unterminated strings.
fn python_literal_to_json(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let quote = c;
                let mut content = String::new();
                let mut terminated = false;
                while let Some(inner) = chars.next() {
                    if inner == '\\' {
                        if let Some(escaped) = chars.next() {
                            content.push('\\');
                            content.push(escaped);
                        }
                    } else if inner == quote {
                        terminated = true;
                        break;
                    } else {
                        content.push(inner);
                    }
                }
                if !terminated {
                    return None;
                }
                out.push('"');
                out.push_str(&content.replace('"', "\\\""));
                out.push('"');
            }
            c if c.is_alphabetic() => {
                let mut word = String::new();
                word.push(c);
                while let Some(&next) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    "None" => out.push_str("null"),
                    other => out.push_str(other),
                }
            }
            c => out.push(c),
        }
    }

    Some(out)
}

/// Removes markdown code fences from a model reply.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```python", "")
        .replace("```sql", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Normalizes a generated SQL statement: fences stripped, whitespace
/// trimmed, exactly one terminating semicolon.
fn clean_statement(reply: &str) -> String {
    let mut statement = strip_code_fences(reply);
    statement = statement.trim_end_matches(';').trim_end().to_string();
    statement.push(';');
    statement
}
