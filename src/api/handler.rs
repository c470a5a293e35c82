//! Webhook Lambda handler: body extraction, update parsing, dispatch and the
//! response envelope.
//!
//! Every stage returns a `Result`; the envelope is built in one place from
//! the first failure (or from success).

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use super::commands::BOT_USERNAME;
use super::dispatcher::{CommandRegistry, DispatchOutcome, Dispatcher};
use super::helpers::{ResponseEnvelope, err_response, ok_status};
use super::parsing::{extract_body, parse_update};
use crate::core::config::AppConfig;
use crate::errors::BotError;
use crate::telegram::{MessageSender, TelegramClient};

/// Request adapter for Telegram webhook invocations.
///
/// Built once per process and shared by every invocation; holds no mutable
/// state.
pub struct WebhookHandler {
    dispatcher: Dispatcher,
    sender: Arc<dyn MessageSender>,
}

impl WebhookHandler {
    #[must_use]
    pub fn new(dispatcher: Dispatcher, sender: Arc<dyn MessageSender>) -> Self {
        Self { dispatcher, sender }
    }

    /// Production wiring: default commands and a Bot API client for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Bot API client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, BotError> {
        let client = TelegramClient::new(config.bot_token.clone())?;
        Ok(Self::new(
            Dispatcher::new(CommandRegistry::with_defaults()).with_bot_username(BOT_USERNAME),
            Arc::new(client),
        ))
    }

    /// Handles one hosting event and returns the envelope to send back.
    pub async fn handle_request(&self, event: &Value) -> ResponseEnvelope {
        let correlation_id = Uuid::new_v4().to_string();
        let span = info_span!("webhook_request", %correlation_id);

        async {
            info!("Received request from Telegram");
            match self.process(event).await {
                Ok(outcome) => {
                    info!(?outcome, "Update processed");
                    ok_status("Update processed")
                }
                Err(e) => error_envelope(&e),
            }
        }
        .instrument(span)
        .await
    }

    async fn process(&self, event: &Value) -> Result<DispatchOutcome, BotError> {
        let body = extract_body(event)?;
        let update = parse_update(body.as_deref())?;
        info!(
            update_id = ?update.update_id,
            chat_id = update.chat_id(),
            "Parsed update"
        );

        self.dispatcher.dispatch(&update, self.sender.as_ref()).await
    }
}

fn error_envelope(err: &BotError) -> ResponseEnvelope {
    match err {
        BotError::MissingBody => {
            error!("Request has no body");
            err_response(400, "No body provided")
        }
        BotError::InvalidUpdate(reason) => {
            error!(%reason, "Could not parse update");
            err_response(400, "Invalid update")
        }
        BotError::ApiError(description) => {
            error!(%description, "Telegram rejected the reply");
            err_response(500, description)
        }
        other => {
            error!(error = %other, "Failed to process update");
            err_response(500, &other.to_string())
        }
    }
}

/// Lambda entry point for the webhook function.
///
/// # Errors
///
/// Never fails at the runtime level; every outcome is encoded in the
/// returned envelope.
#[tracing::instrument(level = "info", skip(handler, event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    handler: &WebhookHandler,
    event: LambdaEvent<Value>,
) -> Result<ResponseEnvelope, Error> {
    Ok(handler.handle_request(&event.payload).await)
}
