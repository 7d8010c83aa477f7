//! Ladder: climb eight rows of three tiles, one safe tile per row.
//!
//! The whole board is drawn when the round opens. Each safe pick multiplies the
//! running multiplier by 1.5 and unlocks the next row; a wrong pick forfeits
//! the stake. Clearing the top row cashes out automatically.

use super::{payout, CasinoGame, GameError, GameResult, GameRng, Move};
use royal_types::casino::{LADDER_ROWS, LADDER_TILES};

const STEP: f64 = 1.5;

/// Multiplier after `cleared` rows.
pub fn multiplier(cleared: u8) -> f64 {
    STEP.powi(cleared as i32)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Climbing,
    /// Wrong tile picked on the given row.
    Fell(u8),
    CashedOut,
}

#[derive(Clone, Debug)]
pub struct Ladder {
    bet: u64,
    /// Safe tile per row, bottom row first.
    pub(crate) board: Vec<u8>,
    /// Rows cleared so far; also the row currently open.
    pub row: u8,
    pub status: Status,
}

impl Ladder {
    fn with_board(bet: u64, board: Vec<u8>) -> Self {
        Ladder {
            bet,
            board,
            row: 0,
            status: Status::Climbing,
        }
    }

    /// Safe tile of a row the player has already played.
    pub fn safe_tile(&self, row: u8) -> Option<u8> {
        let played = match self.status {
            Status::Climbing => row < self.row,
            _ => true,
        };
        played.then(|| self.board.get(row as usize).copied()).flatten()
    }

    /// Amount a cash-out would pay right now.
    pub fn cashout_value(&self) -> u64 {
        payout(self.bet, multiplier(self.row))
    }

    fn pick(&mut self, row: u8, tile: u8) -> Result<GameResult, GameError> {
        if row != self.row {
            return Err(GameError::WrongRow {
                expected: self.row,
                got: row,
            });
        }
        if tile >= LADDER_TILES {
            return Err(GameError::InvalidTile(tile));
        }
        if self.board[row as usize] != tile {
            self.status = Status::Fell(row);
            return Ok(GameResult::Loss);
        }
        self.row += 1;
        if self.row >= LADDER_ROWS {
            return self.cashout();
        }
        Ok(GameResult::Continue)
    }

    fn cashout(&mut self) -> Result<GameResult, GameError> {
        if self.row == 0 {
            return Err(GameError::NothingToCashOut);
        }
        self.status = Status::CashedOut;
        Ok(GameResult::Win(self.cashout_value()))
    }
}

impl CasinoGame for Ladder {
    type Options = ();

    fn init(bet: u64, _: (), rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        let board = (0..LADDER_ROWS)
            .map(|_| rng.next_bounded(LADDER_TILES as u32) as u8)
            .collect();
        Ok((Ladder::with_board(bet, board), GameResult::Continue))
    }

    fn process_move(&mut self, mv: Move, _rng: &mut GameRng) -> Result<GameResult, GameError> {
        if self.status != Status::Climbing {
            return Err(GameError::GameAlreadyComplete);
        }
        match mv {
            Move::Pick { row, tile } => self.pick(row, tile),
            Move::Cashout => self.cashout(),
            _ => Err(GameError::InvalidMove),
        }
    }

    fn bet(&self) -> u64 {
        self.bet
    }

    fn multiplier(&self) -> Option<f64> {
        Some(multiplier(self.row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> GameRng {
        GameRng::new(1, 1, 1)
    }

    fn pick(row: u8, tile: u8) -> Move {
        Move::Pick { row, tile }
    }

    #[test]
    fn test_three_rows_then_cashout() {
        let mut game = Ladder::with_board(100, vec![0, 1, 2, 0, 1, 2, 0, 1]);
        let mut rng = rng();
        assert_eq!(game.process_move(pick(0, 0), &mut rng), Ok(GameResult::Continue));
        assert_eq!(game.process_move(pick(1, 1), &mut rng), Ok(GameResult::Continue));
        assert_eq!(game.process_move(pick(2, 2), &mut rng), Ok(GameResult::Continue));
        assert_eq!(game.multiplier(), Some(3.375));
        assert_eq!(game.process_move(Move::Cashout, &mut rng), Ok(GameResult::Win(337)));
        assert_eq!(game.status, Status::CashedOut);
    }

    #[test]
    fn test_wrong_tile_falls() {
        let mut game = Ladder::with_board(100, vec![2; 8]);
        let mut rng = rng();
        assert_eq!(game.safe_tile(0), None);
        game.process_move(pick(0, 2), &mut rng).unwrap();
        assert_eq!(game.safe_tile(0), Some(2));
        assert_eq!(game.safe_tile(1), None);
        assert_eq!(game.process_move(pick(1, 0), &mut rng), Ok(GameResult::Loss));
        assert_eq!(game.status, Status::Fell(1));
        assert_eq!(game.safe_tile(7), Some(2));
        assert_eq!(
            game.process_move(Move::Cashout, &mut rng),
            Err(GameError::GameAlreadyComplete)
        );
    }

    #[test]
    fn test_top_row_cashes_out() {
        let mut game = Ladder::with_board(10, vec![1; 8]);
        let mut rng = rng();
        for row in 0..7 {
            assert_eq!(game.process_move(pick(row, 1), &mut rng), Ok(GameResult::Continue));
        }
        // 10 * 1.5^8 = 256.29
        assert_eq!(game.process_move(pick(7, 1), &mut rng), Ok(GameResult::Win(256)));
    }

    #[test]
    fn test_rejects_out_of_order_moves() {
        let mut game = Ladder::with_board(10, vec![1; 8]);
        let mut rng = rng();
        assert_eq!(
            game.process_move(Move::Cashout, &mut rng),
            Err(GameError::NothingToCashOut)
        );
        assert_eq!(
            game.process_move(pick(1, 1), &mut rng),
            Err(GameError::WrongRow { expected: 0, got: 1 })
        );
        assert_eq!(game.process_move(pick(0, 3), &mut rng), Err(GameError::InvalidTile(3)));
        assert_eq!(game.process_move(Move::Stand, &mut rng), Err(GameError::InvalidMove));
        assert_eq!(game.status, Status::Climbing);
    }

    #[test]
    fn test_board_generation() {
        let mut rng = GameRng::new(10, 4, 0);
        let (game, result) = Ladder::init(10, (), &mut rng).unwrap();
        assert_eq!(result, GameResult::Continue);
        assert_eq!(game.board.len(), LADDER_ROWS as usize);
        assert!(game.board.iter().all(|&tile| tile < LADDER_TILES));
    }
}
