//! Domain models for hipnotify
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod alert;
pub mod color;
pub mod kind;
pub mod notification;

pub use alert::{AlertEvent, AlertFields, HostFields, ServiceFields};
pub use color::{Color, ColorTable};
pub use kind::NotificationKind;
pub use notification::{MessageParams, NotificationConfig};
