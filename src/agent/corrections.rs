//! Correction table for failed relational statements.
//!
//! A static list of known-wrong column tokens and their correct equivalents.
//! Repair is textual: each wrong token is replaced wherever it appears as a
//! whole word, case-insensitively. This is deliberately not a SQL rewrite;
//! only the enumerated tokens are ever touched.

use regex::RegexBuilder;
use tracing::debug;

/// Ordered correction rules: (wrong token, correct token).
pub const CORRECTION_RULES: &[(&str, &str)] = &[
    ("transactoin_id", "transaction_id"),
    ("amount", "amount_invested"),
    ("transaction_date", "date_"),
    ("date", "date_"),
    ("rm", "rm_name"),
    ("relationship_manager", "rm_name"),
];

/// Returns true if the execution error belongs to the repairable class.
///
/// Covers the unknown-column messages of the common engines; anything else
/// is reported as-is without a retry.
pub fn is_recoverable(error_text: &str) -> bool {
    let lower = error_text.to_lowercase();
    lower.contains("unknown column")
        || lower.contains("no such column")
        || (lower.contains("column") && lower.contains("does not exist"))
}

/// Applies every correction rule to the statement, whole-word and
/// case-insensitive, returning the rewritten statement.
pub fn repair(statement: &str) -> String {
    let mut repaired = statement.to_string();

    for (wrong, correct) in CORRECTION_RULES {
        let pattern = format!(r"\b{}\b", regex::escape(wrong));
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .expect("correction patterns are static and valid");

        let next = re
            .replace_all(&repaired, regex::NoExpand(correct))
            .into_owned();
        if next != repaired {
            debug!("Correction applied: {} -> {}", wrong, correct);
            repaired = next;
        }
    }

    repaired
}
