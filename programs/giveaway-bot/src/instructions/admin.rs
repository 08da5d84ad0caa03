// instructions/admin.rs
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::constants::*;
use crate::state::*;
use crate::utils::*;

/// Figures shown by `/stats`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stats {
    pub total_users: usize,
    pub total_referrals: u64,
    pub total_redemptions: u64,
    pub total_points_spent: u64,
    pub outstanding_points: u64,
    pub items_in_stock: usize,
}

pub fn stats(state: &BotState) -> Stats {
    Stats {
        total_users: state.users.len(),
        total_referrals: state.total_referrals,
        total_redemptions: state.total_redemptions,
        total_points_spent: state.total_points_spent,
        outstanding_points: state.users.total_points(),
        items_in_stock: state.stock.total(),
    }
}

impl Stats {
    /// HTML body for the `/stats` reply
    pub fn render(&self) -> String {
        format!(
            "📊 <b>Bot Statistics</b> 📊\n\n\
             Total Unique Users: <b>{}</b>\n\
             Referrals Credited: <b>{}</b>\n\
             Redemptions: <b>{}</b>\n\
             Points Spent: <b>{}</b>\n\
             Points Outstanding: <b>{}</b>\n\
             Accounts In Stock: <b>{}</b>",
            self.total_users,
            self.total_referrals,
            self.total_redemptions,
            self.total_points_spent,
            self.outstanding_points,
            self.items_in_stock,
        )
    }
}

/// Plain-text `/users` report, already split to Telegram's message limit.
/// Empty when no user has started the bot.
pub fn user_list_report(state: &BotState) -> Vec<String> {
    if state.users.is_empty() {
        return Vec::new();
    }

    let dash = rule('-', REPORT_RULE_WIDTH);
    let mut report = format!("{USER_LIST_HEADER}\n{}\n\n", rule('=', REPORT_RULE_WIDTH));
    for user in state.users.list_all() {
        // writing to a String never fails
        let _ = write!(
            report,
            "Name: {}\nUsername: {}\nPoints: {}\nReferrals Made: {}\n{dash}\n",
            user.first_name,
            user.handle(),
            user.points,
            user.referrals_made,
        );
    }

    split_message(&report, MAX_MESSAGE_LEN)
}

pub fn stock_counts(state: &BotState) -> BTreeMap<Prize, usize> {
    state.stock.peek_counts()
}

/// HTML body for the `/viewstock` reply
pub fn stock_report(state: &BotState) -> String {
    let mut message = String::from("📦 <b>Current Stock Levels</b> 📦\n\n");
    for (prize, count) in stock_counts(state) {
        let _ = writeln!(message, "<b>{}</b>: {} accounts", prize.label(), count);
    }
    message
}
