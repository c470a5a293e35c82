//! Bot command handlers

pub mod start;

pub use start::{BOT_USERNAME, StartCommand};
