//! creatmy - Telegram webhook functions for the Music App mini-app.
//!
//! The crate builds three binaries:
//! 1. A webhook Lambda that parses Telegram updates and routes bot commands
//!    (currently `/start`) to their handlers
//! 2. An audio upload Lambda that forwards tracks recorded in the mini-app to
//!    the user's chat
//! 3. A one-shot tool that registers the webhook URL with Telegram
//!
//! # Architecture
//!
//! The system uses:
//! - AWS Lambda (Netlify Functions) for serverless execution
//! - reqwest against the Telegram Bot API
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use creatmy::api::WebhookHandler;
//! use creatmy::api::dispatcher::{CommandRegistry, Dispatcher};
//! use creatmy::telegram::TelegramClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     creatmy::setup_logging();
//!
//!     let client = TelegramClient::new("123456:dummy-token")?;
//!     let handler = WebhookHandler::new(
//!         Dispatcher::new(CommandRegistry::with_defaults()),
//!         Arc::new(client),
//!     );
//!
//!     let event = serde_json::json!({
//!         "body": r#"{"message": {"chat": {"id": 42}, "text": "/start"}}"#
//!     });
//!     let response = handler.handle_request(&event).await;
//!     println!("{} {}", response.status_code, response.body);
//!
//!     Ok(())
//! }
//! ```
// Module declarations
pub mod api;
pub mod audio;
pub mod core;
pub mod errors;
pub mod telegram;

pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// Sets up tracing-subscriber with a JSON formatter suitable for `CloudWatch`
/// Logs. The level comes from `RUST_LOG` and defaults to `info`. Calling it
/// more than once is harmless; only the first subscriber is installed.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// creatmy::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
