//! hipnotify - Nagios to HipChat notification library
//!
//! This library turns the pipe-delimited notification payload handed over
//! by Nagios into a rendered HipChat room message and delivers it, optionally
//! paging users with a follow-up mention.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`notify`]: One-call library entry point
//! - [`services`]: Rendering and delivery
//! - [`transport`]: HTTP abstraction layer

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod services;
pub mod transport;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{AppError, Result};
pub use notify::{notify, NotifyRequest};
