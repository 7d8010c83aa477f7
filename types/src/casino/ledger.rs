use super::{Item, STARTING_BALANCE};
use serde::{Deserialize, Serialize};

/// Cumulative wagering statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub wagered: u64,
    pub won: u64,
    pub lost: u64,
    pub games: u64,
    pub wins: u64,
    pub biggest_win: u64,
}

impl Stats {
    /// Net result over every recorded round.
    pub fn profit(&self) -> i64 {
        self.won as i64 - self.lost as i64
    }

    /// Share of recorded rounds won, as a rounded percentage.
    pub fn win_rate(&self) -> u64 {
        if self.games == 0 {
            return 0;
        }
        (self.wins as f64 / self.games as f64 * 100.0).round() as u64
    }

    pub fn losses(&self) -> u64 {
        self.games.saturating_sub(self.wins)
    }
}

/// The single persisted record: balance, statistics and inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub balance: u64,
    pub stats: Stats,
    #[serde(default)]
    pub inventory: Vec<Item>,
}

impl Default for LedgerRecord {
    fn default() -> Self {
        Self {
            balance: STARTING_BALANCE,
            stats: Stats::default(),
            inventory: Vec::new(),
        }
    }
}
