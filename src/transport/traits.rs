//! Trait definitions for outbound HTTP
//!
//! This trait abstracts the chat API transport to enable testing with mocks.

use crate::domain::MessageParams;
use crate::error::TransportError;
use serde::Serialize;

/// Raw HTTP response of one send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as received
    pub body: String,
}

impl RawResponse {
    /// Create a new raw response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON
    pub fn json(&self) -> Result<serde_json::Value, TransportError> {
        serde_json::from_str(&self.body).map_err(|e| TransportError::InvalidJson(e.to_string()))
    }
}

/// Trait for issuing a message request to the chat API
///
/// Implementations perform a single blocking GET with `params` as the query
/// string. They never retry.
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response
    fn get(&self, url: &str, params: &MessageParams) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_json() {
        let resp = RawResponse::new(200, r#"{"status": "sent"}"#);
        assert_eq!(resp.json().unwrap()["status"], "sent");
    }

    #[test]
    fn test_raw_response_invalid_json() {
        let resp = RawResponse::new(502, "<html>Bad Gateway</html>");
        assert!(matches!(resp.json(), Err(TransportError::InvalidJson(_))));
    }
}
