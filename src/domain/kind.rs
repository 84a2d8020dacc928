//! Notification kind
//!
//! The kind decides both the payload field layout and the template used.

use crate::error::PayloadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notification kind as passed by the monitoring system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    /// Full host notification
    Host,
    /// Compact host notification
    ShortHost,
    /// Full service notification
    Service,
    /// Compact service notification
    ShortService,
}

impl NotificationKind {
    /// All kinds, in display order
    pub const ALL: [NotificationKind; 4] = [
        Self::Host,
        Self::ShortHost,
        Self::Service,
        Self::ShortService,
    ];

    /// The kind as it appears on the command line and in template names
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::ShortHost => "short-host",
            Self::Service => "service",
            Self::ShortService => "short-service",
        }
    }

    /// Whether this kind uses the host field layout
    pub const fn is_host(&self) -> bool {
        matches!(self, Self::Host | Self::ShortHost)
    }

    /// Number of pipe-delimited fields this kind expects
    pub const fn field_count(&self) -> usize {
        if self.is_host() {
            6
        } else {
            7
        }
    }

    /// File name of the template rendered for this kind
    pub fn template_name(&self) -> String {
        format!("{}.html", self.as_str())
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Self::Host),
            "short-host" => Ok(Self::ShortHost),
            "service" => Ok(Self::Service),
            "short-service" => Ok(Self::ShortService),
            other => Err(PayloadError::InvalidNotificationType(other.to_string())),
        }
    }
}
