//! Structured error handling for lab API operations.

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Message carried by every [`ErrorKind::RequestFailed`] error.
pub const REQUEST_FAILED_MESSAGE: &str = "network response was not ok";

/// Categories of errors that can occur when talking to the lab API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request could not complete (DNS, refused connection, timeout).
    Transport,
    /// The request completed but the status was not 2xx.
    RequestFailed,
    /// The response body was not valid JSON or had an unexpected shape.
    MalformedResponse,
    /// The request body could not be encoded.
    Serialization,
    /// Client configuration is invalid.
    Configuration,
    /// Caller-supplied input was rejected before sending.
    InvalidInput,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Returns whether this kind describes a failure of the remote call itself,
    /// as opposed to a local encoding or configuration problem.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Transport | Self::RequestFailed | Self::MalformedResponse
        )
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// HTTP status code of the response, when one was received.
    pub status: Option<u16>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            source: Some(source.into()),
        }
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Records the HTTP status code that caused this error.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a new transport error.
    pub fn transport() -> Self {
        Self::new(ErrorKind::Transport)
    }

    /// Creates an unsuccessful-response error for the given status code.
    pub fn request_failed(status: u16) -> Self {
        Self::new(ErrorKind::RequestFailed)
            .with_message(REQUEST_FAILED_MESSAGE)
            .with_status(status)
    }

    /// Creates a new malformed response error.
    pub fn malformed_response() -> Self {
        Self::new(ErrorKind::MalformedResponse)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind.into()
    }

    /// Returns the HTTP status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.message.is_none());
        assert!(error.status.is_none());
        assert!(error.source.is_none());
    }

    #[test]
    fn test_request_failed_carries_generic_message() {
        let error = Error::request_failed(404);
        assert_eq!(error.kind(), ErrorKind::RequestFailed);
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.message.as_deref(), Some(REQUEST_FAILED_MESSAGE));
        assert_eq!(
            error.to_string(),
            "[request_failed]: network response was not ok"
        );
    }

    #[test]
    fn test_local_kinds_are_not_remote() {
        assert_eq!(Error::invalid_input().kind(), ErrorKind::InvalidInput);
        assert!(!ErrorKind::InvalidInput.is_remote());
        assert!(!ErrorKind::Serialization.is_remote());
        assert!(ErrorKind::RequestFailed.is_remote());
    }

    #[test]
    fn test_error_display_without_message() {
        let error = Error::transport();
        assert_eq!(error.to_string(), "[transport]");
    }

    #[test]
    fn test_from_source() {
        let source = std::io::Error::other("connection reset");
        let error = Error::from_source(ErrorKind::Transport, source);

        assert!(error.source.is_some());
        assert_eq!(error.kind_str(), "transport");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("malformed_response").unwrap(),
            ErrorKind::MalformedResponse
        );
        assert_eq!(ErrorKind::default(), ErrorKind::Unknown);
        assert!(ErrorKind::from_str("nope").is_err());
    }

    #[test]
    fn test_is_remote() {
        assert!(ErrorKind::Transport.is_remote());
        assert!(ErrorKind::RequestFailed.is_remote());
        assert!(ErrorKind::MalformedResponse.is_remote());

        assert!(!ErrorKind::Serialization.is_remote());
        assert!(!ErrorKind::Configuration.is_remote());
    }
}
