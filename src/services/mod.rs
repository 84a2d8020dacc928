//! Service layer for alert notifications
//!
//! Services encapsulate rendering an alert and delivering it to the chat API.

pub mod deliverer;
pub mod renderer;

pub use deliverer::{
    DeliveryResult, Deliverer, PreparedMessage, SendOutcome, DEFAULT_API_URL,
};
pub use renderer::{local_short_hostname, short_hostname, RenderedMessage, Renderer};
