pub mod fatal;
pub mod recoverable;

// public exports
pub use fatal::FatalError;
pub use recoverable::RecoverableError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fatal(#[from] FatalError),
    #[error(transparent)]
    Recoverable(#[from] RecoverableError),
}

impl Error {
    /// Fatal errors abort the whole analysis run; everything else degrades to
    /// a fallback path and is reported alongside successful results.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Fatal(_))
    }

    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Recoverable(_))
    }
}

/// Severity levels for error events surfaced in run notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Fatal,
}

impl Error {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Error::Fatal(_) => ErrorSeverity::Fatal,
            Error::Recoverable(RecoverableError::ExternalService { .. }) => ErrorSeverity::Warning,
            Error::Recoverable(_) => ErrorSeverity::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_and_recoverable_split() {
        let e: Error = FatalError::EmptyCorpus.into();
        assert!(e.is_fatal());
        assert!(!e.is_recoverable());
        assert_eq!(e.severity(), ErrorSeverity::Fatal);

        let e: Error = RecoverableError::ExternalService {
            message: "timed out".into(),
            is_timeout: true,
        }
        .into();
        assert!(e.is_recoverable());
        assert_eq!(e.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn display_carries_context() {
        let e: Error = RecoverableError::DocumentTooLarge {
            id: "OSD-48".into(),
            len: 2_000_000,
            max: 1_048_576,
        }
        .into();
        let msg = e.to_string();
        assert!(msg.contains("OSD-48"));
        assert!(msg.contains("2000000"));
    }
}
