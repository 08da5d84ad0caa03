// utils/validation.rs
use teloxide::types::UserId;

use crate::error::*;
use crate::state::Prize;

/// Parse `/addstock` arguments: `<prize> <details...>`
pub fn parse_add_stock_args(args: &str) -> Result<(Prize, String)> {
    let args = args.trim();
    if args.is_empty() {
        return Err(GiveawayError::MissingArguments);
    }

    let (prize_name, detail) = match args.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest),
        None => (args, ""),
    };
    let prize: Prize = prize_name.parse()?;
    let detail = validate_stock_detail(detail)?;
    Ok((prize, detail))
}

/// Account details are opaque words joined by single spaces; blank is rejected
pub fn validate_stock_detail(detail: &str) -> Result<String> {
    let detail = detail.split_whitespace().collect::<Vec<_>>().join(" ");
    if detail.is_empty() {
        return Err(GiveawayError::EmptyStockDetail);
    }
    Ok(detail)
}

/// Parse the `/start` payload as a referrer id; anything else is ignored
pub fn parse_referrer_token(token: &str) -> Option<UserId> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    token.parse::<u64>().ok().map(UserId)
}

/// Validate referrer: a user can never refer themselves
pub fn validate_referrer(owner: UserId, referrer: Option<UserId>) -> Option<UserId> {
    referrer.filter(|r| *r != owner)
}

pub fn is_admin(user: UserId, admin: UserId) -> bool {
    user == admin
}
