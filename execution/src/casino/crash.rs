//! Crash: a multiplier climbs from 1.00x until it reaches a hidden crash point.
//!
//! The crash point is drawn once when the round opens as
//! `max(1, 0.99 / (1 - r))`. Each tick adds 0.01x. Reaching the crash point
//! forfeits the stake; cashing out before it pays `floor(bet * multiplier)`.
//!
//! The running multiplier is kept in hundredths so repeated ticks never drift.

use super::{CasinoGame, GameError, GameResult, GameRng, Move};

const HOUSE_NUMERATOR: f64 = 0.99;
const START_HUNDREDTHS: u64 = 100;

/// Crash point for a uniform draw `r` in [0, 1).
pub fn crash_point(r: f64) -> f64 {
    (HOUSE_NUMERATOR / (1.0 - r)).max(1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Flying,
    CashedOut,
    Crashed,
}

#[derive(Clone, Debug)]
pub struct Crash {
    bet: u64,
    crash_point: f64,
    hundredths: u64,
    pub status: Status,
}

impl Crash {
    fn new(bet: u64, crash_point: f64) -> Self {
        Crash {
            bet,
            crash_point,
            hundredths: START_HUNDREDTHS,
            status: Status::Flying,
        }
    }

    /// Crash point, revealed once the round is over.
    pub fn crash_point(&self) -> Option<f64> {
        match self.status {
            Status::Flying => None,
            _ => Some(self.crash_point),
        }
    }

    pub fn current(&self) -> f64 {
        self.hundredths as f64 / 100.0
    }

    /// Amount a cash-out would pay right now.
    pub fn cashout_value(&self) -> u64 {
        (self.bet as u128 * self.hundredths as u128 / 100) as u64
    }

    /// Advance the multiplier by one step.
    pub fn tick(&mut self) -> Result<GameResult, GameError> {
        if self.status != Status::Flying {
            return Err(GameError::GameAlreadyComplete);
        }
        self.hundredths += 1;
        if self.current() >= self.crash_point {
            self.status = Status::Crashed;
            return Ok(GameResult::Loss);
        }
        Ok(GameResult::Continue)
    }
}

impl CasinoGame for Crash {
    type Options = ();

    fn init(bet: u64, _: (), rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        let point = crash_point(rng.next_f64());
        Ok((Crash::new(bet, point), GameResult::Continue))
    }

    fn process_move(&mut self, mv: Move, _rng: &mut GameRng) -> Result<GameResult, GameError> {
        if self.status != Status::Flying {
            return Err(GameError::GameAlreadyComplete);
        }
        match mv {
            Move::Cashout => {
                self.status = Status::CashedOut;
                Ok(GameResult::Win(self.cashout_value()))
            }
            _ => Err(GameError::InvalidMove),
        }
    }

    fn bet(&self) -> u64 {
        self.bet
    }

    fn multiplier(&self) -> Option<f64> {
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rng() -> GameRng {
        GameRng::new(1, 1, 1)
    }

    fn tick_to(game: &mut Crash, hundredths: u64) -> GameResult {
        let mut result = GameResult::Continue;
        while game.hundredths < hundredths && result == GameResult::Continue {
            result = game.tick().unwrap();
        }
        result
    }

    #[test]
    fn test_crash_point() {
        assert_eq!(crash_point(0.5), 1.98);
        assert_eq!(crash_point(0.0), 1.0);
        assert_eq!(crash_point(0.005), 1.0);
        assert!((crash_point(0.9) - 9.9).abs() < 1e-9);
        assert!(crash_point(0.999_999) > 1_000.0);
    }

    #[test]
    fn test_cashout_before_crash() {
        let mut game = Crash::new(100, crash_point(0.5));
        assert_eq!(tick_to(&mut game, 150), GameResult::Continue);
        assert_eq!(game.current(), 1.5);
        assert_eq!(game.crash_point(), None);
        assert_eq!(game.process_move(Move::Cashout, &mut rng()), Ok(GameResult::Win(150)));
        assert_eq!(game.status, Status::CashedOut);
        assert_eq!(game.crash_point(), Some(1.98));
        assert_eq!(game.tick(), Err(GameError::GameAlreadyComplete));
    }

    #[test]
    fn test_reaching_crash_point_loses() {
        let mut game = Crash::new(100, crash_point(0.5));
        assert_eq!(tick_to(&mut game, 197), GameResult::Continue);
        assert_eq!(game.tick(), Ok(GameResult::Loss));
        assert_eq!(game.hundredths, 198);
        assert_eq!(game.status, Status::Crashed);
        assert_eq!(
            game.process_move(Move::Cashout, &mut rng()),
            Err(GameError::GameAlreadyComplete)
        );
    }

    #[test]
    fn test_minimum_crash_point_busts_on_first_tick() {
        let mut game = Crash::new(100, 1.0);
        assert_eq!(game.tick(), Ok(GameResult::Loss));
    }

    #[test]
    fn test_cashout_before_first_tick_returns_stake() {
        let mut game = Crash::new(37, 3.0);
        assert_eq!(game.process_move(Move::Cashout, &mut rng()), Ok(GameResult::Win(37)));
    }

    #[test]
    fn test_payout_floors() {
        let mut game = Crash::new(15, 10.0);
        tick_to(&mut game, 133);
        // 15 * 1.33 = 19.95
        assert_eq!(game.cashout_value(), 19);
    }

    #[test]
    fn test_rejects_foreign_moves() {
        let mut game = Crash::new(15, 10.0);
        assert_eq!(game.process_move(Move::Hit, &mut rng()), Err(GameError::InvalidMove));
        assert_eq!(game.status, Status::Flying);
    }
}
