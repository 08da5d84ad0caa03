// utils/mod.rs
pub mod formatting;
pub mod validation;

pub use formatting::*;
pub use validation::*;
