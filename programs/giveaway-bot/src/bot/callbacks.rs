// bot/callbacks.rs
use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, ParseMode};
use teloxide::utils::html;

use crate::bot::{gate, keyboards, HandlerResult};
use crate::config::Config;
use crate::constants::*;
use crate::error::GiveawayError;
use crate::instructions;
use crate::state::{Prize, Profile, SharedState};

/// Inline keyboard actions, decoded from callback data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    VerifyJoin,
    MyPoints,
    ReferralLink,
    RedeemPrizes,
    Redeem(Prize),
    BackToMain,
}

impl MenuAction {
    /// `None` for anything unrecognised, including `redeem_<unknown prize>`
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            CB_VERIFY_JOIN => Some(Self::VerifyJoin),
            CB_MY_POINTS => Some(Self::MyPoints),
            CB_REFERRAL_LINK => Some(Self::ReferralLink),
            CB_REDEEM_PRIZES => Some(Self::RedeemPrizes),
            CB_BACK_TO_MAIN => Some(Self::BackToMain),
            _ => data
                .strip_prefix(REDEEM_CALLBACK_PREFIX)
                .and_then(|name| name.parse().ok())
                .map(Self::Redeem),
        }
    }
}

pub async fn handle(
    bot: Bot,
    q: CallbackQuery,
    state: SharedState,
    config: Arc<Config>,
) -> HandlerResult {
    let Some(action) = q.data.as_deref().and_then(MenuAction::parse) else {
        tracing::debug!(data = ?q.data, "ignoring unknown callback");
        bot.answer_callback_query(q.id.clone()).await?;
        return Ok(());
    };

    if action == MenuAction::VerifyJoin {
        return verify_join(&bot, &q, &state, &config).await;
    }

    if !gate::is_member(&bot, &config.channel_username, q.from.id).await {
        alert(&bot, &q, "You need to join the channel to use this bot.").await?;
        return show(
            &bot,
            &q,
            join_prompt_text(&config),
            Some(keyboards::join_prompt(config.channel_url.clone())),
        )
        .await;
    }

    let profile = Profile::from(&q.from);
    let record = {
        let mut state = state.lock().await;
        instructions::register_user::handler(&mut state, &profile)
    };

    match action {
        MenuAction::MyPoints => {
            bot.answer_callback_query(q.id.clone()).await?;
            bot.send_message(
                reply_chat(&q),
                format!("You currently have {} points.", record.points),
            )
            .await?;
        }
        MenuAction::ReferralLink => {
            bot.answer_callback_query(q.id.clone()).await?;
            let link = config.referral_link(q.from.id);
            bot.send_message(
                reply_chat(&q),
                format!(
                    "This is your personal referral link:\n\n{}\n\n\
                     Share it with friends. You earn {} point for every friend who joins!",
                    html::code_inline(&link),
                    REFERRAL_REWARD,
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;
        }
        MenuAction::RedeemPrizes => {
            bot.answer_callback_query(q.id.clone()).await?;
            let counts = instructions::stock_counts(&*state.lock().await);
            show(
                &bot,
                &q,
                "Choose a prize to redeem:".to_string(),
                Some(keyboards::prize_menu(&counts)),
            )
            .await?;
        }
        MenuAction::Redeem(prize) => redeem(&bot, &q, &state, prize).await?,
        MenuAction::BackToMain => {
            bot.answer_callback_query(q.id.clone()).await?;
            show(&bot, &q, main_menu_text(), Some(keyboards::main_menu())).await?;
        }
        MenuAction::VerifyJoin => {}
    }

    Ok(())
}

async fn verify_join(
    bot: &Bot,
    q: &CallbackQuery,
    state: &SharedState,
    config: &Config,
) -> HandlerResult {
    if !gate::is_member(bot, &config.channel_username, q.from.id).await {
        return alert(bot, q, "❌ You have not joined the channel yet.").await;
    }

    bot.answer_callback_query(q.id.clone()).await?;
    {
        let mut state = state.lock().await;
        instructions::register_user::handler(&mut state, &Profile::from(&q.from));
    }
    show(bot, q, "✅ Verification successful! Welcome.".to_string(), None).await?;
    bot.send_message(reply_chat(q), main_menu_text())
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}

async fn redeem(bot: &Bot, q: &CallbackQuery, state: &SharedState, prize: Prize) -> HandlerResult {
    let outcome = {
        let mut state = state.lock().await;
        instructions::redeem::handler(&mut state, q.from.id, prize)
    };

    match outcome {
        Ok(redemption) => {
            bot.answer_callback_query(q.id.clone()).await?;
            let text = format!(
                "✅ Redemption successful! You now have {} points.\n\nYour account details:\n{}",
                redemption.remaining_points,
                html::code_inline(&redemption.account_details),
            );
            show_html(bot, q, text).await
        }
        Err(GiveawayError::OutOfStock(_)) => {
            alert(bot, q, "Sorry, no account is currently available for this prize.").await
        }
        Err(GiveawayError::InsufficientPoints { .. }) => {
            alert(bot, q, "❌ You don't have enough points to redeem this prize.").await
        }
        Err(err) => {
            bot.answer_callback_query(q.id.clone()).await?;
            Err(err.into())
        }
    }
}

pub fn main_menu_text() -> String {
    "Welcome to the Giveaway Bot! Use the menu below.".to_string()
}

pub fn join_prompt_text(config: &Config) -> String {
    format!(
        "To use this bot, first join our channel {} and then tap 'Verify'.",
        config.channel_username
    )
}

fn reply_chat(q: &CallbackQuery) -> ChatId {
    q.regular_message()
        .map_or_else(|| ChatId::from(q.from.id), |m| m.chat.id)
}

async fn alert(bot: &Bot, q: &CallbackQuery, text: &str) -> HandlerResult {
    bot.answer_callback_query(q.id.clone())
        .text(text)
        .show_alert(true)
        .await?;
    Ok(())
}

/// Edit the message the button belongs to, or send a fresh one if it is gone
async fn show(
    bot: &Bot,
    q: &CallbackQuery,
    text: String,
    markup: Option<InlineKeyboardMarkup>,
) -> HandlerResult {
    match q.regular_message() {
        Some(message) => {
            let request = bot.edit_message_text(message.chat.id, message.id, text);
            match markup {
                Some(markup) => request.reply_markup(markup).await?,
                None => request.await?,
            };
        }
        None => {
            let request = bot.send_message(reply_chat(q), text);
            match markup {
                Some(markup) => request.reply_markup(markup).await?,
                None => request.await?,
            };
        }
    }
    Ok(())
}

async fn show_html(bot: &Bot, q: &CallbackQuery, text: String) -> HandlerResult {
    match q.regular_message() {
        Some(message) => {
            bot.edit_message_text(message.chat.id, message.id, text)
                .parse_mode(ParseMode::Html)
                .await?;
        }
        None => {
            bot.send_message(reply_chat(q), text)
                .parse_mode(ParseMode::Html)
                .await?;
        }
    }
    Ok(())
}
