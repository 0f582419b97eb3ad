//! Error types for the homework bot
//!
//! Two families live here. [`HomeworkBotError`] covers service plumbing
//! (configuration, transport, notification delivery). [`PollError`] is the
//! classified failure of a single polling cycle; the poll loop compares its
//! [`ErrorKind`] across cycles to decide whether to alert again.

use std::fmt;

/// Errors that can occur in the homework bot service
#[derive(Debug, thiserror::Error)]
pub enum HomeworkBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Notifier error: {0}")]
    Notifier(String),
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, HomeworkBotError>;

/// A classified failure raised while fetching or processing one poll cycle
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollError {
    #[error("API is unavailable: {0}")]
    ApiUnavailable(String),

    #[error("Endpoint {endpoint} is unavailable. API response code: {status}")]
    InvalidHttpStatus { status: u16, endpoint: String },

    #[error("Cannot decode API response: {0}")]
    MalformedPayload(String),

    #[error("Missing expected keys in API response ({0})")]
    MissingResponseKeys(String),

    #[error("Missing expected keys in homework record ({0})")]
    MissingRecordKeys(String),

    #[error("Undocumented homework status in API response: {0}")]
    UnknownHomeworkStatus(String),

    #[error("{0}")]
    Unclassified(String),
}

impl PollError {
    /// The classification tag, independent of the message text
    pub fn kind(&self) -> ErrorKind {
        match self {
            PollError::ApiUnavailable(_) => ErrorKind::ApiUnavailable,
            PollError::InvalidHttpStatus { .. } => ErrorKind::InvalidHttpStatus,
            PollError::MalformedPayload(_) => ErrorKind::MalformedPayload,
            PollError::MissingResponseKeys(_) => ErrorKind::MissingResponseKeys,
            PollError::MissingRecordKeys(_) => ErrorKind::MissingRecordKeys,
            PollError::UnknownHomeworkStatus(_) => ErrorKind::UnknownHomeworkStatus,
            PollError::Unclassified(_) => ErrorKind::Unclassified,
        }
    }
}

impl From<HomeworkBotError> for PollError {
    fn from(err: HomeworkBotError) -> Self {
        match err {
            HomeworkBotError::Http(msg) => PollError::ApiUnavailable(msg),
            HomeworkBotError::Json(e) => PollError::MalformedPayload(e.to_string()),
            other => PollError::Unclassified(other.to_string()),
        }
    }
}

/// Tag identifying a [`PollError`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ApiUnavailable,
    InvalidHttpStatus,
    MalformedPayload,
    MissingResponseKeys,
    MissingRecordKeys,
    UnknownHomeworkStatus,
    Unclassified,
}

impl ErrorKind {
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::ApiUnavailable => "API unavailable",
            ErrorKind::InvalidHttpStatus => "invalid HTTP status",
            ErrorKind::MalformedPayload => "malformed payload",
            ErrorKind::MissingResponseKeys => "missing response keys",
            ErrorKind::MissingRecordKeys => "missing record keys",
            ErrorKind::UnknownHomeworkStatus => "unknown homework status",
            ErrorKind::Unclassified => "unclassified failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
