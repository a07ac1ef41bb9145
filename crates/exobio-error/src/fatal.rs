/// Errors that abort an entire analysis run. No partial report is produced
/// when one of these is raised.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FatalError {
    #[error("corpus is empty: at least one document is required")]
    EmptyCorpus,

    #[error("invalid configuration for `{parameter}`: {message}")]
    Configuration {
        parameter: &'static str,
        message: String,
    },
}

impl FatalError {
    pub fn config(parameter: &'static str, message: impl Into<String>) -> Self {
        FatalError::Configuration {
            parameter,
            message: message.into(),
        }
    }
}
