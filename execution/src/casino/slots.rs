//! Three-reel slots.
//!
//! Each reel draws one of seven symbols uniformly. Paytable:
//! - three sevens: 50x
//! - three of a kind: 10x
//! - any pair: 2x

use super::{payout_bps, CasinoGame, GameError, GameResult, GameRng};

/// Reel alphabet. The last symbol is the jackpot.
pub const SYMBOLS: [&str; 7] = ["🍒", "🍋", "🍊", "🍇", "⭐", "💎", "7️⃣"];
const JACKPOT: u8 = 6;
const REELS: usize = 3;

const JACKPOT_MULTIPLIER: u64 = 500_000;
const THREE_OF_A_KIND_MULTIPLIER: u64 = 100_000;
const PAIR_MULTIPLIER: u64 = 20_000;

/// Multiplier in basis points for a reel result.
pub fn multiplier(reels: &[u8; REELS]) -> u64 {
    let [a, b, c] = *reels;
    if a == b && b == c {
        if a == JACKPOT {
            JACKPOT_MULTIPLIER
        } else {
            THREE_OF_A_KIND_MULTIPLIER
        }
    } else if a == b || b == c || a == c {
        PAIR_MULTIPLIER
    } else {
        0
    }
}

#[derive(Clone, Debug)]
pub struct Slots {
    bet: u64,
    /// Symbol indices into [`SYMBOLS`], left to right.
    pub reels: [u8; REELS],
}

impl Slots {
    pub fn symbols(&self) -> [&'static str; REELS] {
        self.reels.map(|reel| SYMBOLS[reel as usize])
    }

    fn settle(&self) -> GameResult {
        match multiplier(&self.reels) {
            0 => GameResult::Loss,
            bps => GameResult::Win(payout_bps(self.bet, bps)),
        }
    }
}

impl CasinoGame for Slots {
    type Options = ();

    fn init(bet: u64, _: (), rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        let mut reels = [0u8; REELS];
        for reel in reels.iter_mut() {
            *reel = rng.next_bounded(SYMBOLS.len() as u32) as u8;
        }
        let game = Slots { bet, reels };
        let result = game.settle();
        Ok((game, result))
    }

    fn bet(&self) -> u64 {
        self.bet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paytable() {
        assert_eq!(multiplier(&[6, 6, 6]), 500_000);
        assert_eq!(multiplier(&[0, 0, 0]), 100_000);
        assert_eq!(multiplier(&[5, 5, 5]), 100_000);
        assert_eq!(multiplier(&[1, 1, 4]), 20_000);
        assert_eq!(multiplier(&[1, 4, 1]), 20_000);
        assert_eq!(multiplier(&[4, 1, 1]), 20_000);
        assert_eq!(multiplier(&[6, 6, 0]), 20_000);
        assert_eq!(multiplier(&[0, 1, 2]), 0);
    }

    #[test]
    fn test_settle_payouts() {
        let jackpot = Slots { bet: 10, reels: [6, 6, 6] };
        assert_eq!(jackpot.settle(), GameResult::Win(500));
        let triple = Slots { bet: 10, reels: [2, 2, 2] };
        assert_eq!(triple.settle(), GameResult::Win(100));
        let pair = Slots { bet: 15, reels: [3, 0, 3] };
        assert_eq!(pair.settle(), GameResult::Win(30));
        let miss = Slots { bet: 15, reels: [3, 0, 1] };
        assert_eq!(miss.settle(), GameResult::Loss);
    }

    #[test]
    fn test_init_draws_valid_symbols() {
        for round in 0..200 {
            let mut rng = GameRng::new(3, round, 0);
            let (game, result) = Slots::init(100, (), &mut rng).unwrap();
            assert!(game.reels.iter().all(|&r| (r as usize) < SYMBOLS.len()));
            assert!(result.is_complete());
            assert_eq!(game.symbols()[0], SYMBOLS[game.reels[0] as usize]);
        }
    }
}
