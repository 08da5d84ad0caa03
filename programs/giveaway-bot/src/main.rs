use std::sync::Arc;

use anyhow::Context;
use giveaway_bot::{bot, health, init_tracing, instructions, BotState, Config};
use teloxide::Bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = Config::from_env().context("BOT_TOKEN and ADMIN_ID must be set")?;
    tracing::info!(
        admin = config.admin_id.0,
        channel = %config.channel_username,
        "starting giveaway bot"
    );

    let mut state = BotState::now();
    instructions::initialize::handler(&mut state);
    let state = state.into_shared();

    let port = config.port;
    tokio::spawn(async move {
        if let Err(err) = health::serve(port).await {
            tracing::error!(%err, "liveness server stopped");
        }
    });

    let bot = Bot::new(config.bot_token.clone());
    tracing::info!("bot is running");
    bot::run(bot, state, Arc::new(config)).await;

    Ok(())
}
