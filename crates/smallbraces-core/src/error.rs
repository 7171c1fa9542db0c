// ABOUTME: Error types for classification setup, host calls and view synchronization
// ABOUTME: Sync errors are contained per event by the fault barrier and never reach the host

use smallbraces_types::{BufferPosition, LineSpan, ViewId};

/// Failure to build a classifier from configuration
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("invalid punctuation pattern: {0}")]
    InvalidPunctuation(#[from] regex::Error),
}

/// Failure reported by a host capability
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("span {span} is outside the current snapshot")]
    SpanOutOfRange { span: LineSpan },

    #[error("host rejected the adornment: {reason}")]
    Rejected { reason: String },
}

/// Failure while reacting to a layout or caret notification
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("no formatted line contains position {position}")]
    LineNotFound { position: BufferPosition },

    #[error("no screen geometry for span {span}")]
    GeometryUnavailable { span: LineSpan },

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("no view sync attached to {view_id}")]
    UnknownView { view_id: ViewId },

    #[error("re-entrant call into {entry_point} was short-circuited")]
    Reentrant { entry_point: &'static str },

    #[error("{entry_point} panicked: {message}")]
    Panicked {
        entry_point: &'static str,
        message: String,
    },
}

impl SyncError {
    /// Errors that only abandon one visual update and are expected in normal use
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SyncError::LineNotFound { .. }
                | SyncError::GeometryUnavailable { .. }
                | SyncError::Host(HostError::SpanOutOfRange { .. })
        )
    }
}
