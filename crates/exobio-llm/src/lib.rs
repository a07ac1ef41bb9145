//! External text-generation collaborator for the analysis pipeline.
//!
//! The pipeline never talks HTTP directly; it holds a [`TextGenerator`]
//! capability. Both operations are fallible and the capability itself is
//! optional: every caller carries a deterministic heuristic fallback, so a
//! missing or failing collaborator degrades output quality, never
//! correctness.

pub mod client;
pub mod error;
pub mod prompts;
pub mod wire;

pub use client::{MistralClient, MistralConfig};
pub use error::LlmError;

use async_trait::async_trait;

/// Title plus a short excerpt of one document, passed as structured context
/// to relationship explanations.
#[derive(Debug, Clone, Copy)]
pub struct DocContext<'a> {
    pub title: &'a str,
    pub excerpt: &'a str,
}

/// The two operations the pipeline needs from a generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a structured prompt and return the raw response text for the
    /// caller to parse.
    async fn summarize_or_extract(&self, prompt: &str) -> Result<String, LlmError>;

    /// Produce a short explanation of why two documents relate, given their
    /// shared themes.
    async fn explain_relationship(
        &self,
        doc_a: DocContext<'_>,
        doc_b: DocContext<'_>,
        themes: &[String],
    ) -> Result<String, LlmError>;
}
