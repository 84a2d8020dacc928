//! Unified error types for hipnotify
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.
//!
//! Everything upstream of the HTTP call (configuration, payload parsing,
//! template rendering) is an error here. Delivery problems are not: they are
//! reported through [`crate::services::SendOutcome`] instead.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from configuration parsing/validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from alert payload parsing
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Error from template lookup or rendering
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// Delivery was attempted but did not succeed
    #[error("Notification was not delivered: {0}")]
    DeliveryFailed(String),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from parsing the pipe-delimited alert payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Notification kind is not one of host, short-host, service, short-service
    #[error("Invalid notification type: '{0}'")]
    InvalidNotificationType(String),

    /// Wrong number of pipe-delimited segments for the notification kind
    #[error("Malformed {kind} payload: expected {expected} fields, found {found}")]
    MalformedPayload {
        kind: String,
        expected: usize,
        found: usize,
    },
}

/// Errors from template lookup and rendering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// No template file for the notification kind
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Template failed to render (syntax error, undefined variable, ...)
    #[error("Failed to render template: {0}")]
    Render(String),
}

/// Errors from configuration parsing and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Invalid config value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required config field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Transport-level failures of a single HTTP send
///
/// These never escape the send step; they are folded into a failed
/// [`crate::services::SendOutcome`] and logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Could not connect to the remote endpoint
    #[error("connection failed: {0}")]
    Connection(String),

    /// Request exceeded the configured timeout
    #[error("request timed out")]
    Timeout,

    /// Any other request failure (TLS, redirect loop, body read, ...)
    #[error("request failed: {0}")]
    Request(String),

    /// Response body was not valid JSON
    #[error("invalid JSON response: {0}")]
    InvalidJson(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
