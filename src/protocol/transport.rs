use std::fmt;

use async_trait::async_trait;

use super::types::Target;

/// Default cap on a single response, in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Errors that can occur while fetching a selector.
/// Everything except `OutOfMemory` is recovered by keeping the current page.
#[derive(Debug)]
pub enum TransportError {
    /// Address resolution, bad port, refused or timed-out connection.
    Connect { endpoint: String, reason: String },
    /// The request could not be written.
    Send { endpoint: String, reason: String },
    /// The response could not be fully read.
    Receive { endpoint: String, reason: String },
    /// The response buffer could not grow. Fatal.
    OutOfMemory,
}

impl TransportError {
    /// Short message suitable for the status line. Never includes OS error text.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Connect { endpoint, .. } => format!("can't connect to {endpoint}"),
            TransportError::Send { endpoint, .. } => format!("can't send request to {endpoint}"),
            TransportError::Receive { endpoint, .. } => {
                format!("can't read response from {endpoint}")
            }
            TransportError::OutOfMemory => "out of memory".to_string(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, TransportError::OutOfMemory)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connect { endpoint, reason } => {
                write!(f, "connect to {endpoint} failed: {reason}")
            }
            TransportError::Send { endpoint, reason } => {
                write!(f, "send to {endpoint} failed: {reason}")
            }
            TransportError::Receive { endpoint, reason } => {
                write!(f, "receive from {endpoint} failed: {reason}")
            }
            TransportError::OutOfMemory => write!(f, "response buffer allocation failed"),
        }
    }
}

impl std::error::Error for TransportError {}

/// A fully buffered response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    pub body: Vec<u8>,
    /// The server sent more than the configured capacity; `body` holds the prefix.
    pub truncated: bool,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Sends `target.selector` followed by CRLF and buffers the whole reply.
    async fn fetch(&self, target: &Target) -> Result<Response, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_reason() {
        let err = TransportError::Connect {
            endpoint: "ex.org:70".to_string(),
            reason: "Connection refused (os error 111)".to_string(),
        };
        assert_eq!(err.user_message(), "can't connect to ex.org:70");
        assert!(err.to_string().contains("os error 111"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_out_of_memory_is_fatal() {
        assert!(TransportError::OutOfMemory.is_fatal());
    }
}
