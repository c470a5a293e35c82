// One-shot registration of the webhook URL with Telegram, run after deploy.

use anyhow::Context;
use creatmy::core::config::{AppConfig, webhook_url_from_env};
use creatmy::telegram::TelegramClient;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    creatmy::setup_logging();

    let config = AppConfig::from_env().context("loading bot credentials")?;
    let webhook_url = webhook_url_from_env().context("loading webhook URL")?;

    let client = TelegramClient::new(config.bot_token)?;
    client
        .set_webhook(&webhook_url)
        .await
        .with_context(|| format!("registering webhook {webhook_url}"))?;

    info!(%webhook_url, "Webhook registered");
    Ok(())
}
