// instructions/set_referrer.rs
use teloxide::types::UserId;

use crate::constants::*;
use crate::error::*;
use crate::state::*;
use crate::utils::*;

/// Referrer credited by a successful attribution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferralCredit {
    pub referrer: UserId,
    pub referrer_points: u64,
}

/// Attribute `profile` to the user named by the `/start` payload.
///
/// Returns `None` (and changes nothing) for a non-numeric token, a
/// self-referral, an unknown referrer, or a user already attributed.
pub fn handler(
    state: &mut BotState,
    profile: &Profile,
    referrer_token: &str,
) -> Result<Option<ReferralCredit>> {
    // Validate referrer
    let Some(referrer) = validate_referrer(profile.id, parse_referrer_token(referrer_token)) else {
        return Ok(None);
    };

    if !state.users.contains(referrer) {
        tracing::debug!(referrer = referrer.0, "referrer not found, skipping");
        return Ok(None);
    }

    state.users.get_or_create(profile);

    // Check if user already has a referrer
    let Some(record) = state.users.get_mut(profile.id) else {
        return Err(GiveawayError::UnknownUser(profile.id.0));
    };
    if !record.set_referrer(referrer) {
        tracing::debug!(user = profile.id.0, "user already has a referrer");
        return Ok(None);
    }

    let referrer_points = state.users.credit(referrer, REFERRAL_REWARD)?;
    if let Some(referrer_record) = state.users.get_mut(referrer) {
        referrer_record.add_referral()?;
    }
    state.add_referral();

    tracing::info!(
        user = profile.id.0,
        referrer = referrer.0,
        referrer_points,
        "referral credited"
    );

    Ok(Some(ReferralCredit {
        referrer,
        referrer_points,
    }))
}
