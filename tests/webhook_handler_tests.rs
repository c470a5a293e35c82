use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use creatmy::api::WebhookHandler;
use creatmy::api::commands::start::{BOT_USERNAME, MINI_APP_URL};
use creatmy::api::dispatcher::{
    CommandHandler, CommandRegistry, DispatchOutcome, Dispatcher,
};
use creatmy::api::parsing::parse_update;
use creatmy::core::models::{OutgoingMessage, Update};
use creatmy::errors::BotError;
use creatmy::telegram::MessageSender;
use serde_json::{Value, json};

/// Records every message instead of calling Telegram.
#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<OutgoingMessage>>,
    fail_with: Option<String>,
}

impl RecordingSender {
    fn failing(description: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_with: Some(description.to_string()),
        }
    }

    fn sent(&self) -> Vec<OutgoingMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(&self, message: &OutgoingMessage) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(message.clone());
        match &self.fail_with {
            Some(description) => Err(BotError::ApiError(description.clone())),
            None => Ok(()),
        }
    }
}

fn webhook(sender: &Arc<RecordingSender>) -> WebhookHandler {
    WebhookHandler::new(
        Dispatcher::new(CommandRegistry::with_defaults()).with_bot_username(BOT_USERNAME),
        Arc::clone(sender) as Arc<dyn MessageSender>,
    )
}

fn event_with_text(chat_id: i64, text: &str) -> Value {
    json!({
        "headers": {"content-type": "application/json"},
        "body": json!({"update_id": 1, "message": {"chat": {"id": chat_id}, "text": text}}).to_string()
    })
}

#[tokio::test]
async fn test_start_sends_welcome_once() {
    let sender = Arc::new(RecordingSender::default());
    let response = webhook(&sender)
        .handle_request(&event_with_text(4242, "/start"))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json(), json!({"status": "Update processed"}));

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].chat_id, 4242);
    let payload = serde_json::to_string(&sent[0]).unwrap();
    assert!(payload.contains(MINI_APP_URL));
}

#[tokio::test]
async fn test_start_with_bot_suffix_and_payload() {
    let sender = Arc::new(RecordingSender::default());
    let response = webhook(&sender)
        .handle_request(&event_with_text(1, "/start@testsupertestpupertest_bot ref"))
        .await;

    assert_eq!(response.status_code, 200);
    assert_eq!(sender.sent().len(), 1);
}

#[tokio::test]
async fn test_start_for_another_bot_is_ignored() {
    let sender = Arc::new(RecordingSender::default());
    let event = json!({
        "body": json!({
            "message": {
                "chat": {"id": -100_555, "type": "supergroup"},
                "text": "/start@some_other_bot"
            }
        })
        .to_string()
    });

    let response = webhook(&sender).handle_request(&event).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body_json(), json!({"status": "Update processed"}));
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_missing_body() {
    let sender = Arc::new(RecordingSender::default());
    let handler = webhook(&sender);

    for event in [json!({}), json!({"body": null}), json!({"body": ""})] {
        let response = handler.handle_request(&event).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body_json(), json!({"error": "No body provided"}));
    }
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_update() {
    let sender = Arc::new(RecordingSender::default());
    let handler = webhook(&sender);

    for body in ["{not json", "{}", r#"{"message": {"text": "/start"}}"#] {
        let response = handler.handle_request(&json!({ "body": body })).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body_json(), json!({"error": "Invalid update"}));
    }
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_unknown_and_absent_commands_are_ignored() {
    let sender = Arc::new(RecordingSender::default());
    let handler = webhook(&sender);

    let no_text = json!({"body": r#"{"message": {"chat": {"id": 3}}}"#});
    let events = [
        event_with_text(3, "/help"),
        event_with_text(3, "hello there"),
        event_with_text(3, ""),
        no_text,
    ];

    for event in events {
        let response = handler.handle_request(&event).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body_json(), json!({"status": "Update processed"}));
    }
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_send_failure_surfaces_as_500() {
    let sender = Arc::new(RecordingSender::failing("Bad Request: chat not found"));
    let response = webhook(&sender)
        .handle_request(&event_with_text(9, "/start"))
        .await;

    assert_eq!(response.status_code, 500);
    assert_eq!(
        response.body_json(),
        json!({"error": "Bad Request: chat not found"})
    );
    assert_eq!(sender.sent().len(), 1);
}

#[tokio::test]
async fn test_repeated_events_are_not_deduplicated() {
    let sender = Arc::new(RecordingSender::default());
    let handler = webhook(&sender);
    let event = event_with_text(77, "/start");

    let first = handler.handle_request(&event).await;
    let second = handler.handle_request(&event).await;

    assert_eq!(first, second);
    assert_eq!(sender.sent().len(), 2);
}

#[tokio::test]
async fn test_base64_encoded_body() {
    use base64::Engine;

    let sender = Arc::new(RecordingSender::default());
    let raw = r#"{"message": {"chat": {"id": 5}, "text": "/start"}}"#;
    let event = json!({
        "body": base64::engine::general_purpose::STANDARD.encode(raw),
        "isBase64Encoded": true
    });

    let response = webhook(&sender).handle_request(&event).await;

    assert_eq!(response.status_code, 200);
    assert_eq!(sender.sent()[0].chat_id, 5);
}

#[tokio::test]
async fn test_envelope_serialization() {
    let sender = Arc::new(RecordingSender::default());
    let response = webhook(&sender).handle_request(&json!({})).await;

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({"statusCode": 400, "body": "{\"error\":\"No body provided\"}"})
    );
}

struct EchoCommand;

#[async_trait]
impl CommandHandler for EchoCommand {
    fn command(&self) -> &'static str {
        "echo"
    }

    async fn handle(&self, update: &Update, sender: &dyn MessageSender) -> Result<(), BotError> {
        sender
            .send_message(&OutgoingMessage {
                chat_id: update.chat_id(),
                text: update.text().unwrap_or_default().to_string(),
                parse_mode: None,
                reply_markup: None,
            })
            .await
    }
}

#[tokio::test]
async fn test_dispatcher_routes_by_exact_command() {
    let sender = RecordingSender::default();
    let registry = CommandRegistry::with_defaults().register(EchoCommand);
    assert!(registry.lookup("echo").is_some());
    assert!(registry.lookup("start").is_some());
    let dispatcher = Dispatcher::new(registry);

    let update = parse_update(Some(r#"{"message": {"chat": {"id": 8}, "text": "/echo hi"}}"#))
        .unwrap();
    let outcome = dispatcher.dispatch(&update, &sender).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Handled("echo"));
    assert_eq!(sender.sent()[0].text, "/echo hi");

    let update = parse_update(Some(r#"{"message": {"chat": {"id": 8}, "text": "/echoes"}}"#))
        .unwrap();
    let outcome = dispatcher.dispatch(&update, &sender).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert_eq!(sender.sent().len(), 1);
}

#[tokio::test]
async fn test_transport_failure_surfaces_full_message() {
    struct UnreachableSender;

    #[async_trait]
    impl MessageSender for UnreachableSender {
        async fn send_message(&self, _message: &OutgoingMessage) -> Result<(), BotError> {
            Err(BotError::HttpError("connection refused".to_string()))
        }
    }

    let handler = WebhookHandler::new(
        Dispatcher::new(CommandRegistry::with_defaults()),
        Arc::new(UnreachableSender),
    );
    let response = handler.handle_request(&event_with_text(9, "/start")).await;

    assert_eq!(response.status_code, 500);
    assert_eq!(
        response.body_json(),
        json!({"error": "Failed to send HTTP request: connection refused"})
    );
}

#[tokio::test]
async fn test_dispatcher_without_username_ignores_addressed_commands() {
    let sender = RecordingSender::default();
    let dispatcher = Dispatcher::new(CommandRegistry::with_defaults());
    let update = parse_update(Some(
        r#"{"message": {"chat": {"id": 8}, "text": "/start@testsupertestpupertest_bot"}}"#,
    ))
    .unwrap();

    let outcome = dispatcher.dispatch(&update, &sender).await.unwrap();
    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert!(sender.sent().is_empty());
}

#[tokio::test]
async fn test_dispatcher_propagates_handler_failure() {
    let sender = RecordingSender::failing("Unauthorized");
    let dispatcher = Dispatcher::new(CommandRegistry::with_defaults());
    let update = parse_update(Some(r#"{"message": {"chat": {"id": 8}, "text": "/start"}}"#))
        .unwrap();

    let result = dispatcher.dispatch(&update, &sender).await;
    assert!(matches!(result, Err(BotError::ApiError(ref d)) if d == "Unauthorized"));
}
