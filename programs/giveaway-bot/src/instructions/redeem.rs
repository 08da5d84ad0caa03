// instructions/redeem.rs
use teloxide::types::UserId;

use crate::error::*;
use crate::state::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redemption {
    pub prize: Prize,
    pub account_details: String,
    pub remaining_points: u64,
}

/// Trade points for the oldest stocked account of `prize`.
///
/// Every check runs before any mutation, so a failed redemption leaves both
/// ledgers untouched.
pub fn handler(state: &mut BotState, user: UserId, prize: Prize) -> Result<Redemption> {
    let cost = prize.cost();

    if !state.stock.has_stock(prize) {
        return Err(GiveawayError::OutOfStock(prize));
    }

    let available = state.users.points(user);
    if available < cost {
        return Err(GiveawayError::InsufficientPoints {
            needed: cost,
            available,
        });
    }

    let remaining_points = state.users.debit(user, cost)?;
    let account_details = state
        .stock
        .pop(prize)
        .ok_or(GiveawayError::OutOfStock(prize))?;
    state.add_redemption(cost);

    tracing::info!(
        user = user.0,
        prize = prize.key(),
        cost,
        remaining_points,
        left_in_stock = state.stock.count(prize),
        "prize redeemed"
    );

    Ok(Redemption {
        prize,
        account_details,
        remaining_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(points: u64) -> BotState {
        let mut state = BotState::new(0);
        state.stock.initialize();
        state.users.get_or_create(&Profile::new(UserId(1), "Alice", None));
        state.users.credit(UserId(1), points).unwrap();
        state
    }

    #[test]
    fn redeem_debits_cost_and_pops_oldest() {
        let mut state = state_with(6);
        state.stock.push(Prize::Prime, "a@b.com:pw".into());
        state.stock.push(Prize::Prime, "c@d.com:pw".into());

        let redemption = handler(&mut state, UserId(1), Prize::Prime).unwrap();
        assert_eq!(redemption.account_details, "a@b.com:pw");
        assert_eq!(redemption.remaining_points, 1);
        assert_eq!(state.users.points(UserId(1)), 1);
        assert_eq!(state.stock.count(Prize::Prime), 1);
        assert_eq!(state.total_redemptions, 1);
        assert_eq!(state.total_points_spent, 5);
    }

    #[test]
    fn out_of_stock_changes_nothing() {
        let mut state = state_with(10);
        assert_eq!(
            handler(&mut state, UserId(1), Prize::Crunchyroll),
            Err(GiveawayError::OutOfStock(Prize::Crunchyroll))
        );
        assert_eq!(state.users.points(UserId(1)), 10);
        assert_eq!(state.total_redemptions, 0);
    }

    #[test]
    fn insufficient_points_changes_nothing() {
        let mut state = state_with(4);
        state.stock.push(Prize::Prime, "acc".into());
        assert_eq!(
            handler(&mut state, UserId(1), Prize::Prime),
            Err(GiveawayError::InsufficientPoints { needed: 5, available: 4 })
        );
        assert_eq!(state.users.points(UserId(1)), 4);
        assert_eq!(state.stock.count(Prize::Prime), 1);
    }

    #[test]
    fn unknown_user_has_no_points() {
        let mut state = state_with(0);
        state.stock.push(Prize::Crunchyroll, "acc".into());
        assert!(matches!(
            handler(&mut state, UserId(77), Prize::Crunchyroll),
            Err(GiveawayError::InsufficientPoints { available: 0, .. })
        ));
        assert_eq!(state.stock.count(Prize::Crunchyroll), 1);
    }
}
