use chainchat_channels::TelegramBot;
use chainchat_client::{AgentClient, Provider};
use chainchat_common::AgentServiceConfig;
use chainchat_common::config::require_env;
use chainchat_session::ContextStore;
use tracing::info;

/// Start the Telegram bot and poll until shutdown.
pub async fn run() -> anyhow::Result<()> {
    let config = AgentServiceConfig::from_env()?;
    let provider = Provider::from_env()?;
    let bot_token = require_env("TELEGRAM_BOT_TOKEN")?;

    let client = AgentClient::new(&config.base_url, config.timeout)?;
    info!(
        "starting telegram bot against {} with the {} provider",
        config.base_url,
        provider.id()
    );

    let bot = TelegramBot::new(bot_token, client, provider, ContextStore::new());
    bot.run().await?;
    Ok(())
}
