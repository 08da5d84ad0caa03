// instructions/initialize.rs
use crate::state::*;

/// Seed the stock ledger with an empty queue per prize.
/// Does nothing once any prize key exists.
pub fn handler(state: &mut BotState) -> bool {
    let seeded = state.stock.initialize();

    if seeded {
        tracing::info!(
            prizes = Prize::ALL.len(),
            started_at = state.started_at,
            "stock ledger initialized"
        );
    } else {
        tracing::debug!(items = state.stock.total(), "stock ledger already populated");
    }

    seeded
}
