//! Static schema descriptors for the two backends.
//!
//! A descriptor is loaded once at startup and shared read-only by every
//! request; translation prompts embed its formatted text.

use serde_json::json;

/// Read-only description of one backend's shape.
#[derive(Debug, Clone)]
pub struct SchemaDescriptor {
    /// Collection or table name.
    pub name: String,
    /// Field names in declaration order.
    pub fields: Vec<String>,
    /// Example record rendered into prompts, if any.
    pub example: Option<serde_json::Value>,
    /// Schema text reported by the live store, preferred when present.
    pub live_description: Option<String>,
}

impl SchemaDescriptor {
    /// Descriptor for the client document collection.
    pub fn clients() -> Self {
        Self {
            name: "clients".to_string(),
            fields: vec![
                "client_id".to_string(),
                "name".to_string(),
                "risk_appetite".to_string(),
                "investment_preferences".to_string(),
                "rm_id".to_string(),
            ],
            example: Some(json!({
                "client_id": "C001",
                "name": "Virat Kohli",
                "risk_appetite": "High",
                "investment_preferences": ["Stocks", "Real Estate"],
                "rm_id": 101
            })),
            live_description: None,
        }
    }

    /// Descriptor for the transactions table.
    pub fn transactions() -> Self {
        Self {
            name: "transactions".to_string(),
            fields: vec![
                "transaction_id".to_string(),
                "client_id".to_string(),
                "stock_name".to_string(),
                "amount_invested".to_string(),
                "date_".to_string(),
                "rm_name".to_string(),
            ],
            example: None,
            live_description: None,
        }
    }

    /// Attaches schema text introspected from the live store.
    pub fn with_live_description(mut self, text: impl Into<String>) -> Self {
        self.live_description = Some(text.into());
        self
    }

    /// Formats the descriptor for embedding into a translation prompt.
    pub fn format_for_prompt(&self) -> String {
        if let Some(live) = &self.live_description {
            return live.clone();
        }

        let mut out = format!("Name: {}\nFields: {}", self.name, self.fields.join(", "));
        if let Some(example) = &self.example {
            out.push_str("\nExample record:\n");
            out.push_str(
                &serde_json::to_string_pretty(example).unwrap_or_else(|_| example.to_string()),
            );
        }
        out
    }
}
