//! Alert event parsing
//!
//! Splits the pipe-delimited payload handed over by the monitoring system
//! into named fields. The layout depends on the [`NotificationKind`].

use crate::domain::NotificationKind;
use crate::error::PayloadError;
use serde::Serialize;

/// Separator between payload fields
pub const FIELD_SEPARATOR: char = '|';

/// Fields of a host notification, in payload order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostFields {
    pub hostname: String,
    pub timestamp: String,
    pub notification_type: String,
    pub host_address: String,
    pub state: String,
    pub host_output: String,
}

/// Fields of a service notification, in payload order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceFields {
    pub service_description: String,
    pub host_alias: String,
    pub timestamp: String,
    pub notification_type: String,
    pub host_address: String,
    pub state: String,
    pub service_output: String,
}

/// Decoded payload fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AlertFields {
    Host(HostFields),
    Service(ServiceFields),
}

/// A parsed alert, immutable once constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEvent {
    kind: NotificationKind,
    fields: AlertFields,
}

impl AlertEvent {
    /// Parse a raw payload for an already validated kind
    ///
    /// # Errors
    /// Returns `PayloadError::MalformedPayload` if the number of segments
    /// does not match the kind's layout.
    pub fn parse(kind: NotificationKind, raw: &str) -> Result<Self, PayloadError> {
        let segments: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();

        if segments.len() != kind.field_count() {
            return Err(PayloadError::MalformedPayload {
                kind: kind.to_string(),
                expected: kind.field_count(),
                found: segments.len(),
            });
        }

        let mut it = segments.into_iter().map(str::to_string);
        let mut next = || it.next().unwrap_or_default();

        let fields = if kind.is_host() {
            AlertFields::Host(HostFields {
                hostname: next(),
                timestamp: next(),
                notification_type: next(),
                host_address: next(),
                state: next(),
                host_output: next(),
            })
        } else {
            AlertFields::Service(ServiceFields {
                service_description: next(),
                host_alias: next(),
                timestamp: next(),
                notification_type: next(),
                host_address: next(),
                state: next(),
                service_output: next(),
            })
        };

        Ok(Self { kind, fields })
    }

    /// Notification kind
    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    /// Decoded fields
    pub fn fields(&self) -> &AlertFields {
        &self.fields
    }

    /// Notification type (PROBLEM, RECOVERY, ACKNOWLEDGEMENT, ...)
    pub fn notification_type(&self) -> &str {
        match &self.fields {
            AlertFields::Host(f) => &f.notification_type,
            AlertFields::Service(f) => &f.notification_type,
        }
    }

    /// Current state (DOWN, CRITICAL, OK, ...)
    pub fn state(&self) -> &str {
        match &self.fields {
            AlertFields::Host(f) => &f.state,
            AlertFields::Service(f) => &f.state,
        }
    }

    /// Field name/value pairs in payload order
    pub fn named_fields(&self) -> Vec<(&'static str, &str)> {
        match &self.fields {
            AlertFields::Host(f) => vec![
                ("hostname", f.hostname.as_str()),
                ("timestamp", f.timestamp.as_str()),
                ("notification_type", f.notification_type.as_str()),
                ("host_address", f.host_address.as_str()),
                ("state", f.state.as_str()),
                ("host_output", f.host_output.as_str()),
            ],
            AlertFields::Service(f) => vec![
                ("service_description", f.service_description.as_str()),
                ("host_alias", f.host_alias.as_str()),
                ("timestamp", f.timestamp.as_str()),
                ("notification_type", f.notification_type.as_str()),
                ("host_address", f.host_address.as_str()),
                ("state", f.state.as_str()),
                ("service_output", f.service_output.as_str()),
            ],
        }
    }
}
