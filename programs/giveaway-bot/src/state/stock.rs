// state/stock.rs
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::GiveawayError;

/// Prizes that can be stocked and redeemed
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Prize {
    Crunchyroll,
    Prime,
}

impl Prize {
    pub const ALL: [Prize; 2] = [Prize::Crunchyroll, Prize::Prime];

    /// Key used in commands and callback data
    pub fn key(self) -> &'static str {
        match self {
            Prize::Crunchyroll => "crunchyroll",
            Prize::Prime => "prime",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Prize::Crunchyroll => "Crunchyroll",
            Prize::Prime => "Prime Video",
        }
    }

    pub fn cost(self) -> u64 {
        match self {
            Prize::Crunchyroll => CRUNCHYROLL_COST,
            Prize::Prime => PRIME_COST,
        }
    }

    pub fn callback_data(self) -> String {
        format!("{}{}", REDEEM_CALLBACK_PREFIX, self.key())
    }

    /// Comma separated list of every prize key, for usage hints
    pub fn allowed_keys() -> String {
        Self::ALL.iter().map(|p| p.key()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for Prize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Prize {
    type Err = GiveawayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.key() == wanted)
            .ok_or(GiveawayError::UnknownPrize(wanted))
    }
}

/// Prize -> FIFO queue of account details
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StockLedger {
    queues: BTreeMap<Prize, VecDeque<String>>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no prize key has been created yet
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Creates an empty queue for every prize, only if nothing exists yet
    pub fn initialize(&mut self) -> bool {
        if !self.is_empty() {
            return false;
        }
        for prize in Prize::ALL {
            self.queues.insert(prize, VecDeque::new());
        }
        true
    }

    pub fn push(&mut self, prize: Prize, detail: String) -> usize {
        let queue = self.queues.entry(prize).or_default();
        queue.push_back(detail);
        queue.len()
    }

    /// Removes the oldest entry of a prize queue
    pub fn pop(&mut self, prize: Prize) -> Option<String> {
        self.queues.get_mut(&prize)?.pop_front()
    }

    pub fn count(&self, prize: Prize) -> usize {
        self.queues.get(&prize).map_or(0, VecDeque::len)
    }

    pub fn has_stock(&self, prize: Prize) -> bool {
        self.count(prize) > 0
    }

    /// Counts for every known prize, missing keys reported as zero
    pub fn peek_counts(&self) -> BTreeMap<Prize, usize> {
        Prize::ALL.into_iter().map(|p| (p, self.count(p))).collect()
    }

    pub fn total(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }
}
