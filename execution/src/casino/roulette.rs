//! Single-zero roulette with colour bets only.
//!
//! Pocket 0 is green; the remaining pockets alternate, even pockets black and
//! odd pockets red. Green pays 14x, red and black pay 2x.

use super::{payout_bps, CasinoGame, GameError, GameResult, GameRng};
use royal_types::casino::ROULETTE_POCKETS;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Black,
    Green,
}

impl Color {
    pub fn name(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
            Color::Green => "green",
        }
    }

    /// Return multiplier in basis points.
    pub fn multiplier(&self) -> u64 {
        match self {
            Color::Green => 140_000,
            Color::Red | Color::Black => 20_000,
        }
    }
}

/// Colour of a pocket.
pub fn color_of(pocket: u8) -> Color {
    if pocket == 0 {
        Color::Green
    } else if pocket % 2 == 0 {
        Color::Black
    } else {
        Color::Red
    }
}

#[derive(Clone, Debug)]
pub struct Roulette {
    bet: u64,
    pub pick: Color,
    pub pocket: u8,
}

impl Roulette {
    pub fn color(&self) -> Color {
        color_of(self.pocket)
    }
}

impl CasinoGame for Roulette {
    type Options = Color;

    fn init(bet: u64, pick: Color, rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        let pocket = rng.next_bounded(ROULETTE_POCKETS as u32) as u8;
        let result = if color_of(pocket) == pick {
            GameResult::Win(payout_bps(bet, pick.multiplier()))
        } else {
            GameResult::Loss
        };
        Ok((Roulette { bet, pick, pocket }, result))
    }

    fn bet(&self) -> u64 {
        self.bet
    }
}
