//! HTTP transport implementation
//!
//! Sends requests with a blocking reqwest client.

use crate::domain::MessageParams;
use crate::error::TransportError;
use crate::transport::traits::{RawResponse, Transport};

use std::time::Duration;

/// Production transport backed by `reqwest::blocking`
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Create a transport, optionally bounding every request by `timeout`
    pub fn new(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

        // None disables the blocking client's 30s default.
        builder = builder.timeout(timeout);

        let client = builder
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, params: &MessageParams) -> Result<RawResponse, TransportError> {
        let query: Vec<(&str, &str)> = params.iter().collect();

        log::debug!("GET {} ({} parameters)", url, query.len());

        let response = self
            .client
            .get(url)
            .query(&query)
            .send()
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(map_reqwest_error)?;

        log::debug!("Response {}: {}", status, body);
        Ok(RawResponse { status, body })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}
