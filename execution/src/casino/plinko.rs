//! Plinko with three risk tables over nine slots.
//!
//! The landing slot is drawn uniformly before anything else. A twelve-row
//! path is then synthesised for the presentation with a random walk from the
//! centre that leans towards the slot and is forced once the remaining rows
//! can no longer reach it. The walk is cosmetic: the drawn slot decides the
//! payout.

use super::{payout, CasinoGame, GameError, GameResult, GameRng};
use royal_types::casino::{PLINKO_ROWS, PLINKO_SLOTS};
use serde::{Deserialize, Serialize};

const START: i32 = (PLINKO_SLOTS / 2) as i32;
const LAST: i32 = PLINKO_SLOTS as i32 - 1;
const BIAS: f64 = 0.3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    #[default]
    Low,
    Medium,
    High,
}

impl Risk {
    pub fn table(&self) -> &'static [f64; PLINKO_SLOTS] {
        match self {
            Risk::Low => &[0.5, 0.7, 1.0, 1.3, 1.5, 1.3, 1.0, 0.7, 0.5],
            Risk::Medium => &[0.3, 0.5, 1.0, 2.0, 3.0, 2.0, 1.0, 0.5, 0.3],
            Risk::High => &[0.2, 0.3, 0.5, 2.0, 5.0, 2.0, 0.5, 0.3, 0.2],
        }
    }
}

/// Settlement for a slot multiplier: 1x and above wins, below 1x refunds
/// `floor(bet * m)` as a loss.
pub fn settle(bet: u64, multiplier: f64) -> GameResult {
    let amount = payout(bet, multiplier);
    if multiplier >= 1.0 {
        GameResult::Win(amount)
    } else {
        GameResult::Refund(amount)
    }
}

/// Walk from the centre towards `target`, one position per row.
pub fn drop_path(target: usize, rng: &mut GameRng) -> Vec<u8> {
    let target = target as i32;
    let mut position = START;
    let mut path = Vec::with_capacity(PLINKO_ROWS);
    for row in 0..PLINKO_ROWS {
        let remaining = (PLINKO_ROWS - row) as i32;
        let need = target - position;
        let right = if position <= 0 {
            true
        } else if position >= LAST {
            false
        } else if need > remaining {
            true
        } else if need < -remaining {
            false
        } else {
            let lean = 0.5 + (need as f64 / remaining as f64) * BIAS;
            rng.next_f64() < lean
        };
        position = if right {
            (position + 1).min(LAST)
        } else {
            (position - 1).max(0)
        };
        path.push(position as u8);
    }
    path
}

#[derive(Clone, Debug)]
pub struct Plinko {
    bet: u64,
    pub risk: Risk,
    pub slot: usize,
    /// Ball position after each row.
    pub path: Vec<u8>,
}

impl Plinko {
    pub fn multiplier(&self) -> f64 {
        self.risk.table()[self.slot]
    }
}

impl CasinoGame for Plinko {
    type Options = Risk;

    fn init(bet: u64, risk: Risk, rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        let slot = rng.next_index(PLINKO_SLOTS);
        let path = drop_path(slot, rng);
        let game = Plinko {
            bet,
            risk,
            slot,
            path,
        };
        let result = settle(bet, game.multiplier());
        Ok((game, result))
    }

    fn bet(&self) -> u64 {
        self.bet
    }
}
