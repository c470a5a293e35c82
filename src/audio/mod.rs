//! Audio upload Lambda: forwards tracks recorded in the mini-app to the chat

pub mod handler;
pub mod multipart;

pub use handler::{AudioUploadHandler, function_handler};
