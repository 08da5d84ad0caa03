// instructions/register_user.rs
use crate::state::*;

/// Register a user on first contact or refresh their display fields.
/// Returns a snapshot of the stored record.
pub fn handler(state: &mut BotState, profile: &Profile) -> UserRecord {
    state.users.get_or_create(profile).clone()
}
