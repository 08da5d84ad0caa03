// Import modules
pub mod bot;
pub mod config;
pub mod constants;
pub mod error;
pub mod health;
pub mod instructions;
pub mod state;
pub mod utils;

// Re-export for convenience
pub use config::*;
pub use constants::*;
pub use error::*;
pub use state::*;

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber; `RUST_LOG` overrides the default `info` level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
