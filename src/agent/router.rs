//! Top-level question routing.
//!
//! The assistant owns the injected model and store dependencies, classifies
//! each question into a backend domain, and runs the matching chain. It is
//! the final error boundary: every question yields an Answer, never a
//! propagated failure.

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AssistError, Result};
use crate::llm::{create_client, LlmClient, MockLlmClient};
use crate::store::{
    BackendKind, DocumentStore, MemoryDocumentStore, MySqlStore, RelationalStore,
    SchemaDescriptor,
};

use super::degraded;
use super::execute::{DocumentExecutor, RelationalExecutor};
use super::render;
use super::translate;
use super::triggers::is_document_question;

/// Final answer returned to the caller.
#[derive(Debug, Clone)]
pub struct Answer {
    /// Natural-language answer text.
    pub text: String,
    /// Wall-clock time spent producing it.
    pub elapsed: Duration,
}

impl Answer {
    /// Elapsed time in seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Which backends the assistant currently has real connections for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    /// True when the document store is configured.
    pub document_ready: bool,
    /// True when the relational store is configured.
    pub relational_ready: bool,
}

impl Health {
    /// One-line human summary.
    pub fn summary(&self) -> String {
        let describe = |ready: bool| if ready { "ready" } else { "mock data" };
        format!(
            "document store: {}, relational store: {}",
            describe(self.document_ready),
            describe(self.relational_ready)
        )
    }
}

/// The assistant: classification, dispatch, and the catch-all boundary.
pub struct Assistant {
    llm: Arc<dyn LlmClient>,
    document: Option<DocumentExecutor>,
    relational: Option<RelationalExecutor>,
    document_schema: SchemaDescriptor,
    relational_schema: SchemaDescriptor,
}

impl Assistant {
    /// Creates an assistant with no backing stores; every question is
    /// answered from fixture data.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            document: None,
            relational: None,
            document_schema: SchemaDescriptor::clients(),
            relational_schema: SchemaDescriptor::transactions(),
        }
    }

    /// Attaches a document store.
    pub fn with_document_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.document = Some(DocumentExecutor::new(store));
        self
    }

    /// Attaches a relational store.
    pub fn with_relational_store(mut self, store: Arc<dyn RelationalStore>) -> Self {
        self.relational = Some(RelationalExecutor::new(store));
        self
    }

    /// Replaces the relational schema descriptor, typically with one
    /// carrying live-introspected schema text.
    pub fn with_relational_schema(mut self, schema: SchemaDescriptor) -> Self {
        self.relational_schema = schema;
        self
    }

    /// Builds an assistant from configuration, connecting whichever
    /// backends are configured. A backend that fails to come up is logged
    /// and left in degraded mode rather than aborting startup.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let llm: Arc<dyn LlmClient> = create_client(&config.llm)?.into();
        let mut assistant = Assistant::new(llm);

        if let Some(seed_path) = &config.document.seed_path {
            match MemoryDocumentStore::from_json_file(seed_path) {
                Ok(store) => {
                    info!("Document store seeded from {}", seed_path.display());
                    assistant = assistant.with_document_store(Arc::new(store));
                }
                Err(e) => error!("Document store unavailable, using mock data: {e}"),
            }
        }

        if let Some(url) = &config.relational.url {
            match MySqlStore::connect(url, config.relational.query_timeout_secs).await {
                Ok(store) => {
                    info!("Connected to relational store");
                    let schema = match store.describe_schema().await {
                        Ok(text) => SchemaDescriptor::transactions().with_live_description(text),
                        Err(e) => {
                            debug!("Schema introspection failed, using static descriptor: {e}");
                            SchemaDescriptor::transactions()
                        }
                    };
                    assistant = assistant
                        .with_relational_store(Arc::new(store))
                        .with_relational_schema(schema);
                }
                Err(e) => error!("Relational store unavailable, using mock data: {e}"),
            }
        }

        Ok(assistant)
    }

    /// Reports which backends are live.
    pub fn health(&self) -> Health {
        Health {
            document_ready: self.document.is_some(),
            relational_ready: self.relational.is_some(),
        }
    }

    /// Answers a question.
    ///
    /// Classification is total: document-domain keywords win, everything
    /// else goes to the relational chain. Any failure below this point is
    /// rendered into the answer text instead of propagating.
    pub async fn answer(&self, question: &str) -> Answer {
        let start = Instant::now();
        let question = question.trim();

        if question.is_empty() {
            let e = AssistError::invalid_input("Question cannot be empty");
            return Answer {
                text: e.to_string(),
                elapsed: start.elapsed(),
            };
        }

        let kind = classify(question);
        info!(backend = %kind, "Routing question");

        let result = match kind {
            BackendKind::Document => self.answer_document(question).await,
            BackendKind::Relational => self.answer_relational(question).await,
        };

        let text = result.unwrap_or_else(|e| {
            error!("Pipeline error: {e}");
            format!(
                "Sorry, I encountered an error while processing your question: {}. \
                 Please try rephrasing your question.",
                e
            )
        });

        Answer {
            text,
            elapsed: start.elapsed(),
        }
    }

    /// Runs the document chain, or the degraded provider without a store.
    async fn answer_document(&self, question: &str) -> Result<String> {
        let Some(executor) = &self.document else {
            debug!("Document store not configured; answering from fixtures");
            return Ok(degraded::document_answer(question));
        };

        let filter =
            translate::translate_document_filter(question, &self.document_schema, &*self.llm)
                .await?;
        let outcome = executor.execute(&filter).await;
        Ok(render::render(question, &outcome, &*self.llm).await)
    }

    /// Runs the relational chain, or the degraded provider without a store.
    async fn answer_relational(&self, question: &str) -> Result<String> {
        let Some(executor) = &self.relational else {
            debug!("Relational store not configured; answering from fixtures");
            return Ok(degraded::relational_answer(question));
        };

        let statement =
            translate::translate_statement(question, &self.relational_schema, &*self.llm).await?;
        let outcome = executor.execute(&statement).await;
        Ok(render::render(question, &outcome, &*self.llm).await)
    }
}

/// Classifies a question into its backend domain.
///
/// Total over all questions: a document-domain keyword hit routes to the
/// document backend, everything else to the relational one. When a question
/// carries keywords from both domains, document wins.
pub fn classify(question: &str) -> BackendKind {
    if is_document_question(question) {
        BackendKind::Document
    } else {
        BackendKind::Relational
    }
}

/// Convenience assistant for offline use: mock model, no stores.
impl Default for Assistant {
    fn default() -> Self {
        Self::new(Arc::new(MockLlmClient::new()))
    }
}
