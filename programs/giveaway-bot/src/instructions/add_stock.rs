// instructions/add_stock.rs
use crate::error::*;
use crate::state::*;
use crate::utils::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StockAdded {
    pub prize: Prize,
    pub in_stock: usize,
}

/// `/addstock <prize> <details...>`
pub fn handler(state: &mut BotState, args: &str) -> Result<StockAdded> {
    let (prize, detail) = parse_add_stock_args(args)?;
    Ok(push(state, prize, detail))
}

/// Typed entry point: prize name plus raw detail string
pub fn add_stock(state: &mut BotState, prize_name: &str, detail: &str) -> Result<StockAdded> {
    let prize: Prize = prize_name.parse()?;
    let detail = validate_stock_detail(detail)?;
    Ok(push(state, prize, detail))
}

fn push(state: &mut BotState, prize: Prize, detail: String) -> StockAdded {
    let in_stock = state.stock.push(prize, detail);
    tracing::info!(prize = prize.key(), in_stock, "stock added");
    StockAdded { prize, in_stock }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_stock_grows_queue_by_one() {
        let mut state = BotState::new(0);
        state.stock.initialize();
        let before = state.stock.peek_counts()[&Prize::Prime];

        let added = add_stock(&mut state, "prime", "a@b.com:pw").unwrap();
        assert_eq!(added, StockAdded { prize: Prize::Prime, in_stock: 1 });
        assert_eq!(state.stock.peek_counts()[&Prize::Prime], before + 1);
    }

    #[test]
    fn unknown_prize_leaves_stock_unchanged() {
        let mut state = BotState::new(0);
        state.stock.initialize();
        let before = state.stock.peek_counts();

        let err = add_stock(&mut state, "unknown_prize", "x").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(state.stock.peek_counts(), before);
    }

    #[test]
    fn command_args_are_parsed() {
        let mut state = BotState::new(0);
        let added = handler(&mut state, "CRUNCHYROLL user@mail.com:secret").unwrap();
        assert_eq!(added.prize, Prize::Crunchyroll);
        assert_eq!(state.stock.pop(Prize::Crunchyroll).as_deref(), Some("user@mail.com:secret"));
        assert_eq!(handler(&mut state, "prime"), Err(GiveawayError::EmptyStockDetail));
    }
}
