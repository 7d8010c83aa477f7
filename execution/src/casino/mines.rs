//! Mines: a 5x5 board with a chosen number of hidden bombs.
//!
//! Bomb positions are fixed when the round opens. Every safe reveal raises the
//! running multiplier; a bomb forfeits the stake. Clearing every safe cell
//! cashes out automatically.

use super::{payout, CasinoGame, GameError, GameResult, GameRng, Move};
use royal_types::casino::{MAX_BOMBS, MINES_CELLS, MINES_MAX_MULTIPLIER, MIN_BOMBS};

const HOUSE_FACTOR: f64 = 0.96;

/// Running multiplier after `revealed` safe cells with `bombs` on the board.
pub fn multiplier(bombs: u8, revealed: u8) -> f64 {
    if revealed == 0 {
        return 1.0;
    }
    let b = bombs as f64;
    let safe = (MINES_CELLS - bombs) as f64;
    let mut mult = 1.0;
    for i in 0..revealed {
        mult *= (safe + b * 0.5) / (safe - i as f64);
    }
    mult *= 1.0 + b / MINES_CELLS as f64 * 0.5;
    (mult * HOUSE_FACTOR).min(MINES_MAX_MULTIPLIER)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    /// Round lost on the given cell.
    Busted(u8),
    CashedOut,
}

#[derive(Clone, Debug)]
pub struct Mines {
    bet: u64,
    pub bombs: u8,
    /// Bomb cells, ascending. Hidden from the player until the round ends.
    mines: Vec<u8>,
    /// Safe cells in reveal order.
    pub revealed: Vec<u8>,
    pub status: Status,
}

impl Mines {
    fn safe_cells(&self) -> u8 {
        MINES_CELLS - self.bombs
    }

    pub fn is_bomb(&self, cell: u8) -> bool {
        self.mines.binary_search(&cell).is_ok()
    }

    /// Bomb layout, available once the round is over.
    pub fn mines(&self) -> Option<&[u8]> {
        match self.status {
            Status::Playing => None,
            _ => Some(&self.mines),
        }
    }

    /// Amount a cash-out would pay right now.
    pub fn cashout_value(&self) -> u64 {
        payout(self.bet, multiplier(self.bombs, self.revealed.len() as u8))
    }

    fn reveal(&mut self, cell: u8) -> Result<GameResult, GameError> {
        if cell >= MINES_CELLS {
            return Err(GameError::InvalidCell(cell));
        }
        if self.revealed.contains(&cell) {
            return Err(GameError::CellAlreadyRevealed(cell));
        }
        if self.is_bomb(cell) {
            self.status = Status::Busted(cell);
            return Ok(GameResult::Loss);
        }
        self.revealed.push(cell);
        if self.revealed.len() as u8 == self.safe_cells() {
            return self.cashout();
        }
        Ok(GameResult::Continue)
    }

    fn cashout(&mut self) -> Result<GameResult, GameError> {
        if self.revealed.is_empty() {
            return Err(GameError::NothingToCashOut);
        }
        self.status = Status::CashedOut;
        Ok(GameResult::Win(self.cashout_value()))
    }
}

impl CasinoGame for Mines {
    type Options = u8;

    fn init(bet: u64, bombs: u8, rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        if !(MIN_BOMBS..=MAX_BOMBS).contains(&bombs) {
            return Err(GameError::InvalidBombCount(bombs));
        }
        let game = Mines {
            bet,
            bombs,
            mines: rng.sample_distinct(MINES_CELLS, bombs),
            revealed: Vec::new(),
            status: Status::Playing,
        };
        Ok((game, GameResult::Continue))
    }

    fn process_move(&mut self, mv: Move, _rng: &mut GameRng) -> Result<GameResult, GameError> {
        if self.status != Status::Playing {
            return Err(GameError::GameAlreadyComplete);
        }
        match mv {
            Move::Reveal(cell) => self.reveal(cell),
            Move::Cashout => self.cashout(),
            _ => Err(GameError::InvalidMove),
        }
    }

    fn bet(&self) -> u64 {
        self.bet
    }

    fn multiplier(&self) -> Option<f64> {
        Some(multiplier(self.bombs, self.revealed.len() as u8))
    }
}
