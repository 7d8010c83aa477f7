//! Over/under dice.
//!
//! One roll in [0, 100). Under wins below 50, over wins above 50, and an
//! exact 50 loses both ways. Wins pay 1.98x.

use super::{payout_bps, CasinoGame, GameError, GameResult, GameRng};
use serde::{Deserialize, Serialize};

const PIVOT: u8 = 50;
const WIN_MULTIPLIER: u64 = 19_800;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Under,
    Over,
}

pub fn wins(prediction: Prediction, roll: u8) -> bool {
    match prediction {
        Prediction::Under => roll < PIVOT,
        Prediction::Over => roll > PIVOT,
    }
}

#[derive(Clone, Debug)]
pub struct Dice {
    bet: u64,
    pub prediction: Prediction,
    pub roll: u8,
}

impl CasinoGame for Dice {
    type Options = Prediction;

    fn init(
        bet: u64,
        prediction: Prediction,
        rng: &mut GameRng,
    ) -> Result<(Self, GameResult), GameError> {
        let roll = rng.next_bounded(100) as u8;
        let result = if wins(prediction, roll) {
            GameResult::Win(payout_bps(bet, WIN_MULTIPLIER))
        } else {
            GameResult::Loss
        };
        Ok((Dice { bet, prediction, roll }, result))
    }

    fn bet(&self) -> u64 {
        self.bet
    }
}
