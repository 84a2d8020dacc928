//! Chat API transport layer
//!
//! Provides a trait-based abstraction over HTTP for testability.

pub mod http;
pub mod traits;

pub use http::HttpTransport;
pub use traits::{RawResponse, Transport};
