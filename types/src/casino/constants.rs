/// Key the ledger record is persisted under.
pub const STORAGE_KEY: &str = "royalCasinoV5";

/// Balance granted to a fresh (or reset) ledger.
pub const STARTING_BALANCE: u64 = 1_000;

/// Amount added by a credit top-up.
pub const CREDIT_AMOUNT: u64 = 500;

/// Smallest wager accepted by any game.
pub const MIN_BET: u64 = 10;

/// Multipliers expressed in basis points (1.0x = 10000).
pub const BASE_MULTIPLIER: u64 = 10_000;

/// Mines board size and bomb bounds
pub const MINES_CELLS: u8 = 25;
pub const MIN_BOMBS: u8 = 3;
pub const MAX_BOMBS: u8 = 24;
pub const MINES_MAX_MULTIPLIER: f64 = 200.0;

/// Ladder board dimensions
pub const LADDER_ROWS: u8 = 8;
pub const LADDER_TILES: u8 = 3;

/// Plinko board dimensions
pub const PLINKO_ROWS: usize = 12;
pub const PLINKO_SLOTS: usize = 9;

/// Roulette pockets (0 is green)
pub const ROULETTE_POCKETS: u8 = 37;

/// Case opening reel
pub const REEL_LENGTH: usize = 50;
pub const REEL_WINNING_INDEX: usize = 45;
