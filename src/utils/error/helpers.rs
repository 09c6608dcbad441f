//! Helper functions for creating and classifying errors

use super::types::LoaderError;

/// Helper functions for creating specific errors
impl LoaderError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedRecord(message.into())
    }

    pub fn checkpoint<S: Into<String>>(message: S) -> Self {
        Self::Checkpoint(message.into())
    }

    pub fn http<S: Into<String>>(status: u16, body: S) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Whether a failed submission should be recorded and skipped rather than
    /// aborting the range.
    ///
    /// Transport and protocol failures belong to the batch; local I/O and
    /// checkpoint failures belong to the range.
    pub fn is_batch_recoverable(&self) -> bool {
        matches!(
            self,
            Self::HttpClient(_)
                | Self::Http { .. }
                | Self::Serialization(_)
                | Self::UnexpectedResponse(_)
                | Self::MalformedRecord(_)
        )
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::HttpClient(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
