//! Keyword triggers shared across the pipeline.
//!
//! One ordered table drives three consumers: the translator's last-resort
//! heuristic, the degraded-mode provider, and (for the relational side) the
//! degraded transaction answers. Keeping them in one place guarantees the
//! three stay consistent.

use crate::store::Filter;
use serde_json::Value;

/// Keywords that route a question to the document backend.
///
/// Classification is total: any hit means document, no hit means relational.
pub const DOCUMENT_KEYWORDS: &[&str] = &["portfolio", "client", "investor", "risk", "manager"];

/// A keyword trigger that synthesizes a document filter.
#[derive(Debug)]
pub struct DocumentTrigger {
    /// Every one of these words must appear in the lower-cased question.
    pub all_of: &'static [&'static str],
    /// At least one of these phrases must appear (ignored when empty).
    pub any_of: &'static [&'static str],
    /// Field the synthesized filter matches on.
    pub field: &'static str,
    /// Value the field must equal (or contain, for array fields).
    pub value: &'static str,
    /// Phrase describing the matched group, used in degraded-mode answers.
    pub label: &'static str,
}

/// Ordered trigger table; the first matching entry wins.
pub const DOCUMENT_TRIGGERS: &[DocumentTrigger] = &[
    DocumentTrigger {
        all_of: &["high", "risk"],
        any_of: &[],
        field: "risk_appetite",
        value: "High",
        label: "with high risk appetite",
    },
    DocumentTrigger {
        all_of: &["low", "risk"],
        any_of: &[],
        field: "risk_appetite",
        value: "Low",
        label: "with low risk appetite",
    },
    DocumentTrigger {
        all_of: &["medium", "risk"],
        any_of: &[],
        field: "risk_appetite",
        value: "Medium",
        label: "with medium risk appetite",
    },
    DocumentTrigger {
        all_of: &["stocks"],
        any_of: &[],
        field: "investment_preferences",
        value: "Stocks",
        label: "who invest in stocks",
    },
    DocumentTrigger {
        all_of: &[],
        any_of: &["real estate", "property"],
        field: "investment_preferences",
        value: "Real Estate",
        label: "who invest in real estate",
    },
];

impl DocumentTrigger {
    /// Returns true if the lower-cased question satisfies this trigger.
    fn matches(&self, question_lower: &str) -> bool {
        let all = self.all_of.iter().all(|w| question_lower.contains(w));
        let any = self.any_of.is_empty() || self.any_of.iter().any(|w| question_lower.contains(w));
        (!self.all_of.is_empty() || !self.any_of.is_empty()) && all && any
    }

    /// Builds the document filter this trigger synthesizes.
    pub fn filter(&self) -> Filter {
        let mut filter = Filter::new();
        filter.insert(self.field.to_string(), Value::String(self.value.to_string()));
        filter
    }
}

/// Finds the first trigger matching the question, if any.
pub fn match_document_trigger(question: &str) -> Option<&'static DocumentTrigger> {
    let question_lower = question.to_lowercase();
    DOCUMENT_TRIGGERS
        .iter()
        .find(|t| t.matches(&question_lower))
}

/// Returns true if the question belongs to the document domain.
pub fn is_document_question(question: &str) -> bool {
    let question_lower = question.to_lowercase();
    DOCUMENT_KEYWORDS
        .iter()
        .any(|k| question_lower.contains(k))
}

/// Transaction question families the degraded relational provider answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionQuestion {
    /// Number of transactions on record.
    TotalCount,
    /// Sum of invested amounts.
    TotalAmount,
    /// Client with the highest invested total.
    TopClient,
    /// Distinct stocks invested in.
    Stocks,
}

/// Ordered relational trigger table; the first matching entry wins.
const RELATIONAL_TRIGGERS: &[(&[&str], TransactionQuestion)] = &[
    (&["total", "transaction"], TransactionQuestion::TotalCount),
    (&["total", "amount"], TransactionQuestion::TotalAmount),
    (&["top", "client"], TransactionQuestion::TopClient),
    (&["stock"], TransactionQuestion::Stocks),
];

/// Finds the transaction question family for a question, if any.
pub fn match_relational_trigger(question: &str) -> Option<TransactionQuestion> {
    let question_lower = question.to_lowercase();
    RELATIONAL_TRIGGERS
        .iter()
        .find(|(words, _)| words.iter().all(|w| question_lower.contains(w)))
        .map(|(_, kind)| *kind)
}
