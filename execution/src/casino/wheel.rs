//! Wheel of fortune with twelve fixed segments.
//!
//! The landing segment is drawn first; the dial rotation handed to the
//! presentation is derived from it and never feeds back into the payout.
//! Segments above 1x win. Segments in (0, 1] return part of the stake but
//! still count as a loss.

use super::{payout, CasinoGame, GameError, GameResult, GameRng};

pub const SEGMENTS: [f64; 12] = [0.0, 1.5, 0.5, 2.0, 0.0, 1.2, 3.0, 0.5, 1.5, 5.0, 0.0, 2.0];

const MIN_SPINS: f64 = 5.0;
const EXTRA_SPINS: f64 = 3.0;

/// Settlement for a given segment multiplier.
pub fn settle(bet: u64, multiplier: f64) -> GameResult {
    if multiplier > 1.0 {
        GameResult::Win(payout(bet, multiplier))
    } else if multiplier > 0.0 {
        GameResult::Refund(payout(bet, multiplier))
    } else {
        GameResult::Loss
    }
}

pub fn label(multiplier: f64) -> String {
    format!("{multiplier}x")
}

#[derive(Clone, Debug)]
pub struct Wheel {
    bet: u64,
    pub segment: usize,
    /// Total dial rotation in degrees that lands the pointer on `segment`.
    pub rotation: f64,
}

impl Wheel {
    pub fn multiplier(&self) -> f64 {
        SEGMENTS[self.segment]
    }
}

/// Dial rotation that centres `segment` under the pointer after `spins` turns.
fn rotation(segment: usize, spins: f64) -> f64 {
    let width = 360.0 / SEGMENTS.len() as f64;
    let centre = segment as f64 * width - 90.0 + width / 2.0;
    spins * 360.0 - centre + 90.0
}

impl CasinoGame for Wheel {
    type Options = ();

    fn init(bet: u64, _: (), rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        let segment = rng.next_index(SEGMENTS.len());
        let spins = MIN_SPINS + rng.next_f64() * EXTRA_SPINS;
        let game = Wheel {
            bet,
            segment,
            rotation: rotation(segment, spins),
        };
        let result = settle(bet, game.multiplier());
        Ok((game, result))
    }

    fn bet(&self) -> u64 {
        self.bet
    }
}
