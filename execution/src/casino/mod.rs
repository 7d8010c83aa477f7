//! Casino game execution module.
//!
//! This module contains the game logic for all casino games:
//! - Slots, Dice, Coinflip, Roulette, Wheel, Plinko (settle on the opening draw)
//! - Mines, Ladder, Crash (progressive, settle on cash-out or bust)
//! - Blackjack
//! - Case opening and Upgrade (trade in inventory items)
//!
//! Every outcome is drawn when the round starts or when the deciding move is
//! made; presentation sequences never feed back into a result.

pub mod blackjack;
pub mod cases;
pub mod coinflip;
pub mod crash;
pub mod dice;
pub mod ladder;
pub mod mines;
pub mod plinko;
pub mod roulette;
pub mod slots;
pub mod upgrade;
pub mod wheel;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use royal_types::casino::{GameType, Loot, BASE_MULTIPLIER, MAX_BOMBS, MIN_BET, MIN_BOMBS};
use thiserror::Error;

/// Deterministic random number generator for a single round step.
///
/// The stream is keyed by the table seed, the round id and the move number, so
/// replaying a round with the same inputs reproduces every draw.
#[derive(Clone)]
pub struct GameRng {
    inner: ChaCha20Rng,
}

impl GameRng {
    /// Create a new RNG from a seed, round ID, and move number.
    pub fn new(seed: u64, round: u64, move_number: u32) -> Self {
        let mut key = [0u8; 32];
        key[..8].copy_from_slice(&seed.to_be_bytes());
        key[8..16].copy_from_slice(&round.to_be_bytes());
        key[16..20].copy_from_slice(&move_number.to_be_bytes());
        Self {
            inner: ChaCha20Rng::from_seed(key),
        }
    }

    /// Get a random f64 value in range [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Get a random value in range [0, max).
    pub fn next_bounded(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.inner.gen_range(0..max)
    }

    /// Pick a uniformly random index into a collection of `len` elements.
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_bounded(len as u32) as usize
    }

    /// Shuffle a slice in place using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_bounded((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Create a shuffled deck of 52 cards.
    /// Cards are 0-51: suit = card/13, rank = card%13.
    pub fn create_deck(&mut self) -> Vec<u8> {
        let mut deck: Vec<u8> = (0..52).collect();
        self.shuffle(&mut deck);
        deck
    }

    /// Draw `count` distinct values from [0, n), returned in ascending order.
    pub fn sample_distinct(&mut self, n: u8, count: u8) -> Vec<u8> {
        let mut pool: Vec<u8> = (0..n).collect();
        self.shuffle(&mut pool);
        pool.truncate(count as usize);
        pool.sort_unstable();
        pool
    }
}

/// Result of processing a game step.
#[derive(Clone, Debug, PartialEq)]
pub enum GameResult {
    /// Round is still in progress.
    Continue,
    /// Round won. Value is the TOTAL RETURN credited (stake + profit).
    Win(u64),
    /// Round lost, stake forfeited.
    Loss,
    /// Part of the stake comes back, but the round still counts as a loss.
    Refund(u64),
    /// Tie, the stake is returned and nothing is recorded.
    Push,
    /// An item was won and goes into the inventory.
    Prize(Loot),
    /// An upgrade consumed item `consumed` and produced `prize` on success.
    Upgrade { consumed: u64, prize: Option<Loot> },
}

impl GameResult {
    pub fn is_complete(&self) -> bool {
        !matches!(self, GameResult::Continue)
    }
}

/// Rejection of a player action. Nothing is mutated when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("minimum bet is ${min} (got ${bet})")]
    BetTooSmall { bet: u64, min: u64 },
    #[error("insufficient balance: have ${balance}, need ${bet}")]
    InsufficientFunds { bet: u64, balance: u64 },
    #[error("bombs must be 3-24 (got {0})")]
    InvalidBombCount(u8),
    #[error("a {0} round is already in progress")]
    RoundInProgress(GameType),
    #[error("no {0} round in progress")]
    NoActiveRound(GameType),
    #[error("invalid move for current game state")]
    InvalidMove,
    #[error("game session has already completed")]
    GameAlreadyComplete,
    #[error("cell {0} is off the board")]
    InvalidCell(u8),
    #[error("cell {0} is already revealed")]
    CellAlreadyRevealed(u8),
    #[error("tile {0} is off the board")]
    InvalidTile(u8),
    #[error("row {got} cannot be played (current row is {expected})")]
    WrongRow { expected: u8, got: u8 },
    #[error("nothing to cash out yet")]
    NothingToCashOut,
    #[error("unknown case {0}")]
    UnknownCase(u8),
    #[error("item {0} is not in the inventory")]
    ItemNotFound(u64),
    #[error("no item selected")]
    NoSelection,
    #[error("deck is exhausted")]
    DeckExhausted,
}

/// Check a wager against the minimum bet and the available balance.
pub fn validate_wager(bet: u64, balance: u64) -> Result<(), GameError> {
    if bet < MIN_BET {
        return Err(GameError::BetTooSmall { bet, min: MIN_BET });
    }
    if bet > balance {
        return Err(GameError::InsufficientFunds { bet, balance });
    }
    Ok(())
}

/// Apply a multiplier given in basis points, rounding down.
pub fn payout_bps(bet: u64, multiplier_bps: u64) -> u64 {
    (bet as u128 * multiplier_bps as u128 / BASE_MULTIPLIER as u128) as u64
}

/// Apply a fractional multiplier, rounding down.
pub fn payout(bet: u64, multiplier: f64) -> u64 {
    (bet as f64 * multiplier).floor() as u64
}

/// Player moves inside an open round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    /// Mines: uncover a cell.
    Reveal(u8),
    /// Blackjack: draw a card.
    Hit,
    /// Blackjack: hand over to the dealer.
    Stand,
    /// Ladder: pick a tile on a row.
    Pick { row: u8, tile: u8 },
    /// Mines, Ladder, Crash: take the running multiplier.
    Cashout,
    /// Upgrade: roll against the success chance.
    Attempt,
}

/// Choices fixed when a wagered round starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Start {
    Slots,
    Mines { bombs: u8 },
    Dice(dice::Prediction),
    Coinflip(coinflip::Side),
    Blackjack,
    Crash,
    Roulette(roulette::Color),
    Wheel,
    Plinko(plinko::Risk),
    Ladder,
}

impl Start {
    pub fn game_type(&self) -> GameType {
        match self {
            Start::Slots => GameType::Slots,
            Start::Mines { .. } => GameType::Mines,
            Start::Dice(_) => GameType::Dice,
            Start::Coinflip(_) => GameType::Coinflip,
            Start::Blackjack => GameType::Blackjack,
            Start::Crash => GameType::Crash,
            Start::Roulette(_) => GameType::Roulette,
            Start::Wheel => GameType::Wheel,
            Start::Plinko(_) => GameType::Plinko,
            Start::Ladder => GameType::Ladder,
        }
    }

    /// Check the round options before any money moves.
    pub fn validate(&self) -> Result<(), GameError> {
        match *self {
            Start::Mines { bombs } if !(MIN_BOMBS..=MAX_BOMBS).contains(&bombs) => {
                Err(GameError::InvalidBombCount(bombs))
            }
            _ => Ok(()),
        }
    }
}

/// Trait for casino game implementations.
pub trait CasinoGame: Sized {
    /// Choices fixed at round start.
    type Options;

    /// Open a round with a stake that has already been debited.
    /// Returns the round state and its immediate result.
    fn init(
        bet: u64,
        options: Self::Options,
        rng: &mut GameRng,
    ) -> Result<(Self, GameResult), GameError>;

    /// Process a player move. Games that settle on the opening draw accept none.
    fn process_move(&mut self, mv: Move, rng: &mut GameRng) -> Result<GameResult, GameError> {
        let _ = (mv, rng);
        Err(GameError::GameAlreadyComplete)
    }

    /// Stake captured when the round opened.
    fn bet(&self) -> u64;

    /// Running multiplier of a progressive round.
    fn multiplier(&self) -> Option<f64> {
        None
    }
}

/// State of one round, tagged by game.
#[derive(Clone, Debug)]
pub enum GameSession {
    Slots(slots::Slots),
    Mines(mines::Mines),
    Dice(dice::Dice),
    Coinflip(coinflip::Coinflip),
    Blackjack(blackjack::Blackjack),
    Crash(crash::Crash),
    Roulette(roulette::Roulette),
    Wheel(wheel::Wheel),
    Plinko(plinko::Plinko),
    Ladder(ladder::Ladder),
    Case(cases::CaseOpening),
    Upgrade(upgrade::Upgrade),
}

impl GameSession {
    /// Dispatch round initialization to the appropriate game module.
    pub fn start(
        bet: u64,
        start: Start,
        rng: &mut GameRng,
    ) -> Result<(Self, GameResult), GameError> {
        start.validate()?;
        Ok(match start {
            Start::Slots => wrap(slots::Slots::init(bet, (), rng)?, GameSession::Slots),
            Start::Mines { bombs } => wrap(mines::Mines::init(bet, bombs, rng)?, GameSession::Mines),
            Start::Dice(prediction) => wrap(dice::Dice::init(bet, prediction, rng)?, GameSession::Dice),
            Start::Coinflip(side) => {
                wrap(coinflip::Coinflip::init(bet, side, rng)?, GameSession::Coinflip)
            }
            Start::Blackjack => {
                wrap(blackjack::Blackjack::init(bet, (), rng)?, GameSession::Blackjack)
            }
            Start::Crash => wrap(crash::Crash::init(bet, (), rng)?, GameSession::Crash),
            Start::Roulette(color) => {
                wrap(roulette::Roulette::init(bet, color, rng)?, GameSession::Roulette)
            }
            Start::Wheel => wrap(wheel::Wheel::init(bet, (), rng)?, GameSession::Wheel),
            Start::Plinko(risk) => wrap(plinko::Plinko::init(bet, risk, rng)?, GameSession::Plinko),
            Start::Ladder => wrap(ladder::Ladder::init(bet, (), rng)?, GameSession::Ladder),
        })
    }

    /// Dispatch move processing to the appropriate game module.
    pub fn process_move(&mut self, mv: Move, rng: &mut GameRng) -> Result<GameResult, GameError> {
        match self {
            GameSession::Slots(game) => game.process_move(mv, rng),
            GameSession::Mines(game) => game.process_move(mv, rng),
            GameSession::Dice(game) => game.process_move(mv, rng),
            GameSession::Coinflip(game) => game.process_move(mv, rng),
            GameSession::Blackjack(game) => game.process_move(mv, rng),
            GameSession::Crash(game) => game.process_move(mv, rng),
            GameSession::Roulette(game) => game.process_move(mv, rng),
            GameSession::Wheel(game) => game.process_move(mv, rng),
            GameSession::Plinko(game) => game.process_move(mv, rng),
            GameSession::Ladder(game) => game.process_move(mv, rng),
            GameSession::Case(game) => game.process_move(mv, rng),
            GameSession::Upgrade(game) => game.process_move(mv, rng),
        }
    }

    /// Advance a timer-driven round by one step. Only Crash has one.
    pub fn tick(&mut self) -> Result<GameResult, GameError> {
        match self {
            GameSession::Crash(game) => game.tick(),
            _ => Err(GameError::InvalidMove),
        }
    }

    pub fn game_type(&self) -> GameType {
        match self {
            GameSession::Slots(_) => GameType::Slots,
            GameSession::Mines(_) => GameType::Mines,
            GameSession::Dice(_) => GameType::Dice,
            GameSession::Coinflip(_) => GameType::Coinflip,
            GameSession::Blackjack(_) => GameType::Blackjack,
            GameSession::Crash(_) => GameType::Crash,
            GameSession::Roulette(_) => GameType::Roulette,
            GameSession::Wheel(_) => GameType::Wheel,
            GameSession::Plinko(_) => GameType::Plinko,
            GameSession::Ladder(_) => GameType::Ladder,
            GameSession::Case(_) => GameType::Cases,
            GameSession::Upgrade(_) => GameType::Upgrade,
        }
    }

    pub fn bet(&self) -> u64 {
        match self {
            GameSession::Slots(game) => game.bet(),
            GameSession::Mines(game) => game.bet(),
            GameSession::Dice(game) => game.bet(),
            GameSession::Coinflip(game) => game.bet(),
            GameSession::Blackjack(game) => game.bet(),
            GameSession::Crash(game) => game.bet(),
            GameSession::Roulette(game) => game.bet(),
            GameSession::Wheel(game) => game.bet(),
            GameSession::Plinko(game) => game.bet(),
            GameSession::Ladder(game) => game.bet(),
            GameSession::Case(game) => game.bet(),
            GameSession::Upgrade(game) => game.bet(),
        }
    }

    pub fn multiplier(&self) -> Option<f64> {
        match self {
            GameSession::Mines(game) => game.multiplier(),
            GameSession::Crash(game) => game.multiplier(),
            GameSession::Ladder(game) => game.multiplier(),
            _ => None,
        }
    }
}

fn wrap<G>(
    (game, result): (G, GameResult),
    variant: fn(G) -> GameSession,
) -> (GameSession, GameResult) {
    (variant(game), result)
}
