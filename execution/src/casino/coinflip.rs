//! Coinflip: call the side, 1.98x on a match.

use super::{payout_bps, CasinoGame, GameError, GameResult, GameRng};
use serde::{Deserialize, Serialize};

const WIN_MULTIPLIER: u64 = 19_800;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Heads,
    Tails,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Heads => "heads",
            Side::Tails => "tails",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Coinflip {
    bet: u64,
    pub call: Side,
    pub landed: Side,
}

impl CasinoGame for Coinflip {
    type Options = Side;

    fn init(bet: u64, call: Side, rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        let landed = if rng.next_f64() < 0.5 {
            Side::Heads
        } else {
            Side::Tails
        };
        let result = if landed == call {
            GameResult::Win(payout_bps(bet, WIN_MULTIPLIER))
        } else {
            GameResult::Loss
        };
        Ok((Coinflip { bet, call, landed }, result))
    }

    fn bet(&self) -> u64 {
        self.bet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_sides_land() {
        let mut heads = 0;
        for round in 0..1_000 {
            let mut rng = GameRng::new(9, round, 0);
            let (game, result) = Coinflip::init(50, Side::Heads, &mut rng).unwrap();
            if game.landed == Side::Heads {
                heads += 1;
                assert_eq!(result, GameResult::Win(99));
            } else {
                assert_eq!(result, GameResult::Loss);
            }
        }
        assert!((400..600).contains(&heads), "heads = {heads}");
    }
}
