// error.rs
use thiserror::Error;

use crate::state::Prize;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GiveawayError {
    // 📦 STOCK / VALIDATION
    #[error("Unknown prize: {0}")]
    UnknownPrize(String),

    #[error("Account details must not be empty")]
    EmptyStockDetail,

    #[error("Missing command arguments")]
    MissingArguments,

    // 🏆 REDEMPTION
    #[error("No {0} accounts left in stock")]
    OutOfStock(Prize),

    #[error("Not enough points: need {needed}, have {available}")]
    InsufficientPoints { needed: u64, available: u64 },

    // 👤 USERS
    #[error("User {0} not found")]
    UnknownUser(u64),

    // 🧮 MISC
    #[error("Math overflow")]
    MathOverflow,
}

impl GiveawayError {
    /// Bad admin input, answered with a usage hint.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnknownPrize(_) | Self::EmptyStockDetail | Self::MissingArguments
        )
    }
}

pub type Result<T> = std::result::Result<T, GiveawayError>;
