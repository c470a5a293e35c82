//! Command routing: registry of handlers and the dispatcher that drives them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::commands::StartCommand;
use super::parsing::extract_command;
use crate::core::models::Update;
use crate::errors::BotError;
use crate::telegram::MessageSender;

/// Behaviour bound to one command name.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name without the leading `/`, lowercase.
    fn command(&self) -> &'static str;

    /// # Errors
    ///
    /// Any failure, including from `sender`, is returned to the dispatcher.
    async fn handle(&self, update: &Update, sender: &dyn MessageSender) -> Result<(), BotError>;
}

/// Read-only after construction.
#[derive(Default, Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry the webhook ships with: `/start`.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new().register(StartCommand)
    }

    /// Adds `handler`, replacing any handler already bound to its command.
    #[must_use]
    pub fn register(mut self, handler: impl CommandHandler + 'static) -> Self {
        self.handlers.insert(handler.command(), Arc::new(handler));
        self
    }

    #[must_use]
    pub fn lookup(&self, command: &str) -> Option<&Arc<dyn CommandHandler>> {
        self.handlers.get(command)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Handled(&'static str),
    Ignored,
}

pub struct Dispatcher {
    registry: CommandRegistry,
    bot_username: Option<String>,
}

impl Dispatcher {
    /// A dispatcher without a username answers only unaddressed commands
    /// (`/start`, never `/start@name`).
    #[must_use]
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            bot_username: None,
        }
    }

    /// Also answer commands addressed as `/command@username`.
    #[must_use]
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.bot_username = Some(username.trim_start_matches('@').to_string());
        self
    }

    /// Routes `update` to the handler for its command, if any.
    ///
    /// # Errors
    ///
    /// Propagates the matched handler's failure unchanged.
    pub async fn dispatch(
        &self,
        update: &Update,
        sender: &dyn MessageSender,
    ) -> Result<DispatchOutcome, BotError> {
        let bot_username = self.bot_username.as_deref();
        let Some(command) = update
            .text()
            .and_then(|text| extract_command(text, bot_username))
        else {
            debug!(chat_id = update.chat_id(), "Update carries no command for this bot");
            return Ok(DispatchOutcome::Ignored);
        };

        let Some(handler) = self.registry.lookup(&command) else {
            info!(%command, "No handler registered for command");
            return Ok(DispatchOutcome::Ignored);
        };

        info!(command = handler.command(), chat_id = update.chat_id(), "Dispatching command");
        handler.handle(update, sender).await?;
        Ok(DispatchOutcome::Handled(handler.command()))
    }
}
