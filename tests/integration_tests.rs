//! Integration tests for folio-assist.
//!
//! These run entirely against in-memory stores and the deterministic mock
//! model; no network or database is required.
//!
//! Run with: `cargo test --test integration_tests`

mod integration;
