// bot/keyboards.rs
use std::collections::BTreeMap;

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use url::Url;

use crate::constants::*;
use crate::state::Prize;

pub fn join_prompt(channel_url: Url) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::url("➡️ Join Channel", channel_url)],
        vec![InlineKeyboardButton::callback("✅ Verify", CB_VERIFY_JOIN)],
    ])
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback("💰 My Points", CB_MY_POINTS)],
        vec![InlineKeyboardButton::callback("🏆 Redeem Prizes", CB_REDEEM_PRIZES)],
        vec![InlineKeyboardButton::callback("🔗 Get Referral Link", CB_REFERRAL_LINK)],
    ])
}

/// One row per prize showing cost and stock, then a back button
pub fn prize_menu(counts: &BTreeMap<Prize, usize>) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = counts
        .iter()
        .map(|(prize, count)| {
            let unit = if prize.cost() == 1 { "Pt" } else { "Pts" };
            vec![InlineKeyboardButton::callback(
                format!("{} ({} {}) - Stock: {}", prize.label(), prize.cost(), unit, count),
                prize.callback_data(),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback("« Back", CB_BACK_TO_MAIN)]);
    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn prize_menu_shows_counts_and_back() {
        let counts = BTreeMap::from([(Prize::Crunchyroll, 3), (Prize::Prime, 0)]);
        let markup = prize_menu(&counts);

        assert_eq!(
            callback_data(&markup),
            vec!["redeem_crunchyroll", "redeem_prime", "back_to_main"]
        );
        assert_eq!(markup.inline_keyboard[0][0].text, "Crunchyroll (1 Pt) - Stock: 3");
        assert_eq!(markup.inline_keyboard[1][0].text, "Prime Video (5 Pts) - Stock: 0");
    }

    #[test]
    fn join_prompt_links_channel() {
        let url = Url::parse("https://t.me/tzgiveaways").unwrap();
        let markup = join_prompt(url.clone());
        assert!(matches!(
            &markup.inline_keyboard[0][0].kind,
            InlineKeyboardButtonKind::Url(u) if *u == url
        ));
        assert_eq!(callback_data(&markup), vec!["verify_join"]);
    }

    #[test]
    fn main_menu_actions() {
        assert_eq!(
            callback_data(&main_menu()),
            vec!["my_points", "redeem_prizes", "get_referral_link"]
        );
    }
}
