//! Degraded-mode answers from in-memory fixtures.
//!
//! When a backend has no configuration the full chain is replaced by a
//! keyword match over a fixed dataset. No model call is made, so the
//! assistant stays demonstrably functional with zero external setup. Every
//! answer carries a disclaimer naming the missing backend.

use serde_json::json;

use crate::store::memory::matches_filter;
use crate::store::Document;

use super::triggers::{match_document_trigger, match_relational_trigger, TransactionQuestion};

/// Disclaimer appended to every degraded document answer.
pub const DOCUMENT_DISCLAIMER: &str = "[Note: Using mock data - document store not configured]";

/// Disclaimer appended to every degraded relational answer.
pub const RELATIONAL_DISCLAIMER: &str =
    "[Note: Using mock data - relational store not configured]";

/// A fixture transaction record.
struct Transaction {
    client_id: &'static str,
    stock_name: &'static str,
    amount_invested: i64,
    date: &'static str,
}

/// Fixture client documents.
fn fixture_clients() -> Vec<Document> {
    let values = [
        json!({"name": "Virat Kohli", "client_id": "C001", "risk_appetite": "High", "investment_preferences": ["Stocks", "Real Estate"]}),
        json!({"name": "Rohit Sharma", "client_id": "C002", "risk_appetite": "Medium", "investment_preferences": ["Stocks", "Bonds"]}),
        json!({"name": "MS Dhoni", "client_id": "C003", "risk_appetite": "Low", "investment_preferences": ["Bonds", "Fixed Deposits"]}),
        json!({"name": "KL Rahul", "client_id": "C004", "risk_appetite": "High", "investment_preferences": ["Stocks", "Real Estate", "Crypto"]}),
        json!({"name": "Rishabh Pant", "client_id": "C005", "risk_appetite": "Medium", "investment_preferences": ["Stocks", "Mutual Funds"]}),
    ];
    values
        .into_iter()
        .map(|v| v.as_object().expect("fixture is an object").clone())
        .collect()
}

/// Fixture transactions.
const FIXTURE_TRANSACTIONS: &[Transaction] = &[
    Transaction { client_id: "C001", stock_name: "Reliance", amount_invested: 50_000, date: "2024-01-15" },
    Transaction { client_id: "C002", stock_name: "TCS", amount_invested: 75_000, date: "2024-01-16" },
    Transaction { client_id: "C001", stock_name: "Infosys", amount_invested: 30_000, date: "2024-01-17" },
    Transaction { client_id: "C003", stock_name: "HDFC Bank", amount_invested: 100_000, date: "2024-01-18" },
    Transaction { client_id: "C002", stock_name: "Wipro", amount_invested: 45_000, date: "2024-01-19" },
];

/// Answers a document-domain question from the client fixtures.
pub fn document_answer(question: &str) -> String {
    let clients = fixture_clients();

    let body = match match_document_trigger(question) {
        Some(trigger) => {
            let filter = trigger.filter();
            let matched: Vec<String> = clients
                .iter()
                .filter(|c| matches_filter(c, &filter))
                .map(|c| {
                    format!(
                        "{} (ID: {})",
                        c["name"].as_str().unwrap_or("Unknown"),
                        c["client_id"].as_str().unwrap_or("N/A")
                    )
                })
                .collect();
            format!(
                "Found {} client(s) {}: {}",
                matched.len(),
                trigger.label,
                matched.join(", ")
            )
        }
        None => {
            let all: Vec<String> = clients
                .iter()
                .map(|c| {
                    format!(
                        "{} (ID: {}, Risk: {})",
                        c["name"].as_str().unwrap_or("Unknown"),
                        c["client_id"].as_str().unwrap_or("N/A"),
                        c["risk_appetite"].as_str().unwrap_or("N/A")
                    )
                })
                .collect();
            format!("Found {} client(s): {}", all.len(), all.join(", "))
        }
    };

    format!("{body} {DOCUMENT_DISCLAIMER}")
}

/// Answers a relational-domain question from the transaction fixtures.
pub fn relational_answer(question: &str) -> String {
    let body = match match_relational_trigger(question) {
        Some(TransactionQuestion::TotalCount) => {
            format!("Total transactions: {}", FIXTURE_TRANSACTIONS.len())
        }
        Some(TransactionQuestion::TotalAmount) => {
            let total: i64 = FIXTURE_TRANSACTIONS.iter().map(|t| t.amount_invested).sum();
            format!("Total amount invested: ₹{}", format_amount(total))
        }
        Some(TransactionQuestion::TopClient) => {
            let mut totals: Vec<(&str, i64)> = Vec::new();
            for t in FIXTURE_TRANSACTIONS {
                match totals.iter_mut().find(|(id, _)| *id == t.client_id) {
                    Some((_, sum)) => *sum += t.amount_invested,
                    None => totals.push((t.client_id, t.amount_invested)),
                }
            }
            let (client, amount) = totals
                .into_iter()
                .max_by_key(|(_, sum)| *sum)
                .expect("fixtures are non-empty");
            format!(
                "Top client by investment: {} with ₹{}",
                client,
                format_amount(amount)
            )
        }
        Some(TransactionQuestion::Stocks) => {
            let mut stocks: Vec<&str> = Vec::new();
            for t in FIXTURE_TRANSACTIONS {
                if !stocks.contains(&t.stock_name) {
                    stocks.push(t.stock_name);
                }
            }
            format!("Stocks invested in: {}", stocks.join(", "))
        }
        None => {
            let mut body = String::from("Sample transactions:\n");
            for t in FIXTURE_TRANSACTIONS.iter().take(3) {
                body.push_str(&format!(
                    "- {}: {} (₹{}) on {}\n",
                    t.client_id,
                    t.stock_name,
                    format_amount(t.amount_invested),
                    t.date
                ));
            }
            body
        }
    };

    format!("{body} {RELATIONAL_DISCLAIMER}")
}

/// Formats an amount with thousands separators.
fn format_amount(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
