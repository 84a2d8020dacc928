//! Mock implementations for testing
//!
//! Provides a recording transport for testing deliveries without a network.

use crate::domain::MessageParams;
use crate::error::TransportError;
use crate::transport::{RawResponse, Transport};

use std::collections::VecDeque;
use std::sync::Mutex;

/// Body returned once the queued responses run out
pub const DEFAULT_BODY: &str = r#"{"status": "sent"}"#;

/// Mock transport recording every request
///
/// Queued responses are replayed in order; afterwards every request gets a
/// `200` with [`DEFAULT_BODY`].
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
    requests: Mutex<Vec<(String, MessageParams)>>,
}

impl MockTransport {
    /// Create a mock that accepts every message
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: queue a response
    pub fn with_json(self, status: u16, body: &str) -> Self {
        self.push(Ok(RawResponse::new(status, body)));
        self
    }

    /// Builder: queue a transport failure
    pub fn with_error(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, response: Result<RawResponse, TransportError>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }

    /// All requests made so far, in order
    pub fn requests(&self) -> Vec<(String, MessageParams)> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Number of requests made so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, params: &MessageParams) -> Result<RawResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push((url.to_string(), params.clone()));
        }

        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Ok(RawResponse::new(200, DEFAULT_BODY)))
    }
}
