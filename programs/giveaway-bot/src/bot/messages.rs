// bot/messages.rs
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::User;

use crate::bot::callbacks::join_prompt_text;
use crate::bot::{broadcast, gate, keyboards, HandlerResult};
use crate::config::Config;
use crate::constants::BROADCAST_DELAY;
use crate::state::SharedState;
use crate::utils::is_admin;

/// Slash-prefixed text that no command matched
pub fn is_command(msg: &Message) -> bool {
    msg.text().is_some_and(|text| text.starts_with('/'))
}

/// Free-text from the admin is broadcast; anything else goes to the admin
pub async fn handle(
    bot: Bot,
    msg: Message,
    state: SharedState,
    config: Arc<Config>,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    if is_admin(user.id, config.admin_id) {
        broadcast_from_admin(&bot, &msg, &state).await
    } else {
        relay_to_admin(&bot, &msg, user, &config).await
    }
}

async fn broadcast_from_admin(bot: &Bot, msg: &Message, state: &SharedState) -> HandlerResult {
    let recipients = state.lock().await.users.ids();
    bot.send_message(
        msg.chat.id,
        format!("📢 Starting broadcast to {} users...", recipients.len()),
    )
    .await?;

    let (from_chat, message_id) = (msg.chat.id, msg.id);
    let report = broadcast::relay(&recipients, BROADCAST_DELAY, |user| {
        let bot = bot.clone();
        async move {
            bot.copy_message(ChatId::from(user), from_chat, message_id)
                .await
                .map(|_| ())
        }
    })
    .await;

    bot.send_message(msg.chat.id, report.render()).await?;
    Ok(())
}

async fn relay_to_admin(bot: &Bot, msg: &Message, user: &User, config: &Config) -> HandlerResult {
    if !gate::is_member(bot, &config.channel_username, user.id).await {
        bot.send_message(msg.chat.id, join_prompt_text(config))
            .reply_markup(keyboards::join_prompt(config.channel_url.clone()))
            .await?;
        return Ok(());
    }

    let admin = ChatId::from(config.admin_id);
    bot.send_message(admin, sender_summary(user)).await?;
    bot.forward_message(admin, msg.chat.id, msg.id).await?;
    tracing::info!(user = user.id.0, "message forwarded to admin");

    bot.send_message(
        msg.chat.id,
        "Your message has been sent to the admin. You will get a reply soon.",
    )
    .await?;
    Ok(())
}

pub fn sender_summary(user: &User) -> String {
    format!(
        "New message from: {} (@{}, ID: {})",
        user.first_name,
        user.username.as_deref().unwrap_or("N/A"),
        user.id.0
    )
}
