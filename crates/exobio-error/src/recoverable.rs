/// Errors scoped to a single document or document pair. The run continues;
/// the affected unit falls back to a heuristic path or is excluded, and the
/// failure is recorded in the report notes.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecoverableError {
    /// The external text-generation collaborator failed or timed out.
    /// Always recoverable via the heuristic fallback, never fatal to the run.
    #[error("external generation service failed: {message}")]
    ExternalService { message: String, is_timeout: bool },

    /// A single document exceeds the size guard and is excluded from the run.
    #[error("document `{id}` is too large ({len} bytes, max {max})")]
    DocumentTooLarge { id: String, len: usize, max: usize },
}
