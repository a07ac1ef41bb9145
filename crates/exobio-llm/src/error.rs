use exobio_error::RecoverableError;
use thiserror::Error;

/// Errors from the text-generation collaborator.
///
/// All variants convert into the workspace `Recoverable::ExternalService`
/// error: a collaborator failure is never fatal to a run.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    #[error("invalid client configuration: {0}")]
    Config(String),

    /// Network connectivity or the HTTP request itself failed.
    #[error("network request failed: {message}")]
    Request { message: String, is_timeout: bool },

    /// The API returned a non-success status code.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("authentication failed; check the API key")]
    Authentication,

    #[error("request to the generation provider timed out")]
    Timeout,

    /// The response body did not carry a usable completion.
    #[error("failed to read response data: {0}")]
    Deserialization(String),
}

impl LlmError {
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            LlmError::Timeout | LlmError::Request { is_timeout: true, .. }
        )
    }
}

impl From<LlmError> for exobio_error::Error {
    fn from(value: LlmError) -> Self {
        let is_timeout = value.is_timeout();
        exobio_error::Error::Recoverable(RecoverableError::ExternalService {
            message: value.to_string(),
            is_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_recoverable_external_service() {
        let err: exobio_error::Error = LlmError::Timeout.into();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("timed out"));
    }
}
