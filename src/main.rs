use anyhow::Result;
use equations::bot;
use equations::config::BotConfig;
use log::info;
use std::sync::Arc;
use teloxide::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    info!("Starting Equations Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Build configuration once; handlers only ever see it behind an Arc
    let config = Arc::new(BotConfig::from_env()?);

    // Initialize the bot
    let bot = Bot::new(config.token.clone());

    info!("Bot initialized, starting dispatcher");

    // Set up the dispatcher with the shared configuration
    let handler = dptree::entry().branch(Update::filter_message().endpoint({
        let config = Arc::clone(&config);
        move |bot: Bot, msg: Message| {
            let config = Arc::clone(&config);
            async move { bot::message_handler(bot, msg, config).await }
        }
    }));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
