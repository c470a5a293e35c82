//! Webhook Lambda: update parsing, command routing and response envelopes

pub mod commands;
pub mod dispatcher;
pub mod handler;
pub mod helpers;
pub mod parsing;

// Re-export the main handler for convenience
pub use handler::{WebhookHandler, function_handler};
