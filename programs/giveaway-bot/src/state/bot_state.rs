// state/bot_state.rs
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::Mutex;

use crate::state::{StockLedger, UserLedger};

/// Root of all bot state: both ledgers plus running totals
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotState {
    pub users: UserLedger,
    pub stock: StockLedger,
    pub total_referrals: u64,
    pub total_redemptions: u64,
    pub total_points_spent: u64,
    pub started_at: i64,
}

impl BotState {
    /// Create new bot state
    pub fn new(started_at: i64) -> Self {
        Self {
            started_at,
            ..Self::default()
        }
    }

    /// New state stamped with the current wall clock
    pub fn now() -> Self {
        let started_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as i64);
        Self::new(started_at)
    }

    /// Add referral credit
    pub fn add_referral(&mut self) {
        self.total_referrals += 1;
    }

    /// Add redemption
    pub fn add_redemption(&mut self, cost: u64) {
        self.total_redemptions += 1;
        self.total_points_spent += cost;
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }
}

/// Handle passed to every handler. One lock acquisition per ledger operation,
/// never held across a Telegram request.
pub type SharedState = Arc<Mutex<BotState>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Prize, Profile};
    use teloxide::types::UserId;

    #[test]
    fn redemption_totals_accumulate() {
        let mut state = BotState::new(10);
        state.add_redemption(1);
        state.add_redemption(5);
        state.add_referral();
        assert_eq!(state.total_redemptions, 2);
        assert_eq!(state.total_points_spent, 6);
        assert_eq!(state.total_referrals, 1);
        assert_eq!(state.started_at, 10);
    }

    #[tokio::test]
    async fn shared_state_serializes_writers() {
        let shared = BotState::new(0).into_shared();
        let mut tasks = Vec::new();
        for id in 0..16u64 {
            let shared = shared.clone();
            tasks.push(tokio::spawn(async move {
                let mut state = shared.lock().await;
                state.users.get_or_create(&Profile::new(UserId(id), "u", None));
                state.stock.push(Prize::Crunchyroll, format!("acc-{id}"));
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }
        let state = shared.lock().await;
        assert_eq!(state.users.len(), 16);
        assert_eq!(state.stock.count(Prize::Crunchyroll), 16);
    }

    #[tokio::test]
    async fn panicking_task_leaves_state_usable() {
        let shared = BotState::new(0).into_shared();

        let crashed = {
            let shared = shared.clone();
            tokio::spawn(async move {
                let mut state = shared.lock().await;
                state.add_referral();
                panic!("handler bug");
            })
        };
        assert!(crashed.await.unwrap_err().is_panic());

        let mut state = shared.lock().await;
        state.add_referral();
        assert_eq!(state.total_referrals, 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn snapshot_uses_prize_keys() {
        let mut state = BotState::new(0);
        state.stock.initialize();
        state.stock.push(Prize::Prime, "a@b.com:pw".into());
        state.users.get_or_create(&Profile::new(UserId(5), "Eve", None));

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["stock"]["queues"]["prime"][0], "a@b.com:pw");
        assert_eq!(json["users"]["records"]["5"]["first_name"], "Eve");
    }
}
