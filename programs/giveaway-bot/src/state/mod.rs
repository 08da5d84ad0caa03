// state/mod.rs
pub mod bot_state;
pub mod stock;
pub mod user;

pub use bot_state::*;
pub use stock::*;
pub use user::*;
