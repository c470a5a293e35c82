//! `/start`: greets the user and links the Music App mini-app.

use async_trait::async_trait;
use tracing::info;

use crate::api::dispatcher::CommandHandler;
use crate::core::models::{
    InlineKeyboardButton, InlineKeyboardMarkup, OutgoingMessage, ParseMode, Update,
};
use crate::errors::BotError;
use crate::telegram::MessageSender;

/// Username the webhook answers `/command@username` for.
pub const BOT_USERNAME: &str = "testsupertestpupertest_bot";

pub const MINI_APP_URL: &str = "https://t.me/testsupertestpupertest_bot/creatmy";

const OPEN_APP_LABEL: &str = "🎧 Открыть Music App";

const WELCOME_MESSAGE: &str = "🎵 *Добро пожаловать в Music App!* 🎵\n\n\
Это приложение позволяет создавать крутые биты и мелодии прямо в Telegram! Вот как начать:\n\n\
1. Нажмите на кнопку ниже, чтобы открыть приложение.\n\
2. Выберите мелодию с помощью верхних кнопок.\n\
3. Добавляйте звуки (Kick, Melody и другие) на дорожку, нажимая на центральные кнопки.\n\
4. Используйте нижние кнопки для записи, воспроизведения, паузы и остановки.\n\
5. Запишите свой трек и отправьте его в чат!\n\n\
Нажмите кнопку ниже, чтобы начать творить! 👇";

#[derive(Debug, Default, Clone, Copy)]
pub struct StartCommand;

impl StartCommand {
    #[must_use]
    pub fn welcome_message(chat_id: i64) -> OutgoingMessage {
        OutgoingMessage {
            chat_id,
            text: WELCOME_MESSAGE.to_string(),
            parse_mode: Some(ParseMode::Markdown),
            reply_markup: Some(open_app_keyboard()),
        }
    }
}

fn open_app_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![vec![InlineKeyboardButton::url(OPEN_APP_LABEL, MINI_APP_URL)]],
    }
}

#[async_trait]
impl CommandHandler for StartCommand {
    fn command(&self) -> &'static str {
        "start"
    }

    async fn handle(&self, update: &Update, sender: &dyn MessageSender) -> Result<(), BotError> {
        let chat_id = update.chat_id();
        info!(chat_id, "Received /start");

        sender.send_message(&Self::welcome_message(chat_id)).await?;

        info!(chat_id, "Welcome message sent");
        Ok(())
    }
}
