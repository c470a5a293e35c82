//! Telegram Bot API access

pub mod client;

pub use client::{AudioSender, MessageSender, TELEGRAM_API_BASE, TelegramClient};
