// Instructions module exports
pub mod add_stock;
pub mod admin;
pub mod initialize;
pub mod redeem;
pub mod register_user;
pub mod set_referrer;

pub use add_stock::{StockAdded, add_stock};
pub use admin::{Stats, stats, stock_counts, stock_report, user_list_report};
pub use redeem::Redemption;
pub use set_referrer::ReferralCredit;
