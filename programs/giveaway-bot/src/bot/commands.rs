// bot/commands.rs
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

use crate::bot::callbacks::{join_prompt_text, main_menu_text};
use crate::bot::{gate, keyboards, HandlerResult};
use crate::config::Config;
use crate::error::GiveawayError;
use crate::instructions;
use crate::state::{Prize, Profile, SharedState};
use crate::utils::is_admin;

/// Admin commands carry the rest of the line so trailing words are ignored
/// rather than rejected.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "start the bot, optionally with a referrer id")]
    Start(String),
    #[command(description = "bot statistics (admin)")]
    Stats(String),
    #[command(description = "list every user (admin)")]
    Users(String),
    #[command(description = "add an account: /addstock <prize> <details> (admin)")]
    AddStock(String),
    #[command(description = "show stock levels (admin)")]
    ViewStock(String),
}

const ADD_STOCK_USAGE: &str = "Invalid format. Use: /addstock <prize_name> <account_details>\n\
                               Example: /addstock prime user@email.com:pass";

pub async fn handle(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: SharedState,
    config: Arc<Config>,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    if let Command::Start(payload) = &cmd {
        return start(&bot, &msg, user, payload, &state, &config).await;
    }

    // admin commands are silently ignored for everyone else
    if !is_admin(user.id, config.admin_id) {
        tracing::debug!(user = user.id.0, ?cmd, "non-admin used admin command");
        return Ok(());
    }

    match cmd {
        Command::Stats(_) => {
            let stats = instructions::stats(&*state.lock().await);
            bot.send_message(msg.chat.id, stats.render())
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Command::Users(_) => {
            let chunks = instructions::user_list_report(&*state.lock().await);
            if chunks.is_empty() {
                bot.send_message(msg.chat.id, "No user has started the bot yet.")
                    .await?;
            }
            for chunk in chunks {
                bot.send_message(msg.chat.id, chunk).await?;
            }
        }
        Command::AddStock(args) => {
            let outcome = {
                let mut state = state.lock().await;
                instructions::add_stock::handler(&mut state, &args)
            };
            let reply = match outcome {
                Ok(added) => format!(
                    "✅ Success! 1 account added to '{}' stock ({} in stock).",
                    added.prize.key(),
                    added.in_stock
                ),
                Err(GiveawayError::UnknownPrize(_)) => format!(
                    "Invalid prize name. Only these can be added: {}",
                    Prize::allowed_keys()
                ),
                Err(err) if err.is_validation() => ADD_STOCK_USAGE.to_string(),
                Err(err) => return Err(err.into()),
            };
            bot.send_message(msg.chat.id, reply).await?;
        }
        Command::ViewStock(_) => {
            let report = instructions::stock_report(&*state.lock().await);
            bot.send_message(msg.chat.id, report)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        Command::Start(_) => {}
    }

    Ok(())
}

async fn start(
    bot: &Bot,
    msg: &Message,
    user: &teloxide::types::User,
    payload: &str,
    state: &SharedState,
    config: &Config,
) -> HandlerResult {
    let profile = Profile::from(user);
    let credit = {
        let mut state = state.lock().await;
        instructions::register_user::handler(&mut state, &profile);
        instructions::set_referrer::handler(&mut state, &profile, payload)?
    };

    if let Some(credit) = credit {
        let note = format!(
            "🎉 Congratulations! A new user joined through your link. You now have {} points.",
            credit.referrer_points
        );
        // best effort, the credit stands either way
        if let Err(err) = bot.send_message(ChatId::from(credit.referrer), note).await {
            tracing::error!(
                referrer = credit.referrer.0,
                %err,
                "failed to send referral notification"
            );
        }
    }

    if gate::is_member(bot, &config.channel_username, user.id).await {
        bot.send_message(msg.chat.id, main_menu_text())
            .reply_markup(keyboards::main_menu())
            .await?;
    } else {
        bot.send_message(msg.chat.id, join_prompt_text(config))
            .reply_markup(keyboards::join_prompt(config.channel_url.clone()))
            .await?;
    }

    Ok(())
}
