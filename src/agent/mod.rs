//! The question-answering pipeline.
//!
//! A question flows strictly downward: the router classifies it and picks a
//! backend, the translator turns it into a structured query, the executor
//! runs it (repairing one known failure class), and the renderer phrases
//! the raw result as prose. When a backend has no configuration the
//! degraded provider answers from fixtures instead.

pub mod corrections;
pub mod degraded;
pub mod execute;
pub mod render;
pub mod router;
pub mod translate;
pub mod triggers;

pub use execute::{DocumentExecutor, ExecutionOutcome, RelationalExecutor};
pub use router::{classify, Answer, Assistant, Health};
pub use translate::{translate_document_filter, translate_statement};
