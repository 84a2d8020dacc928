//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod colors;
pub mod send;

pub use colors::run_colors;
pub use send::run_send;
