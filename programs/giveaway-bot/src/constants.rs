// constants.rs
use std::time::Duration;

// ============================================================================
// PRIZE CONFIGURATION
// ============================================================================

/// Cost in points to redeem one Crunchyroll account
pub const CRUNCHYROLL_COST: u64 = 1;

/// Cost in points to redeem one Prime Video account
pub const PRIME_COST: u64 = 5;

/// Callback data prefix for a redeem button (`redeem_<prize>`)
pub const REDEEM_CALLBACK_PREFIX: &str = "redeem_";

// ============================================================================
// REFERRALS
// ============================================================================

/// Points credited to a referrer for every attributed user
pub const REFERRAL_REWARD: u64 = 1;

// ============================================================================
// TELEGRAM LIMITS
// ============================================================================

/// Maximum characters Telegram accepts in a single text message
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Pause between two broadcast deliveries
pub const BROADCAST_DELAY: Duration = Duration::from_millis(100);

// ============================================================================
// CALLBACK DATA
// ============================================================================

pub const CB_VERIFY_JOIN: &str = "verify_join";
pub const CB_MY_POINTS: &str = "my_points";
pub const CB_REFERRAL_LINK: &str = "get_referral_link";
pub const CB_REDEEM_PRIZES: &str = "redeem_prizes";
pub const CB_BACK_TO_MAIN: &str = "back_to_main";

// ============================================================================
// DEFAULT CONFIGURATION
// ============================================================================

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CHANNEL_USERNAME: &str = "@tzgiveaways";
pub const DEFAULT_BOT_USERNAME: &str = "tzgiveawaybot";

/// Body returned by the liveness endpoint
pub const LIVENESS_BODY: &str = "alive";

// ============================================================================
// REPORT LAYOUT
// ============================================================================

pub const USER_LIST_HEADER: &str = "User List";
pub const REPORT_RULE_WIDTH: usize = 20;
