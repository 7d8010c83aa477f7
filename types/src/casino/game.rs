use serde::{Deserialize, Serialize};
use std::fmt;

/// Casino game types, one per table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum GameType {
    Slots = 0,
    Mines = 1,
    Dice = 2,
    Coinflip = 3,
    Blackjack = 4,
    Crash = 5,
    Roulette = 6,
    Wheel = 7,
    Plinko = 8,
    Ladder = 9,
    Cases = 10,
    Upgrade = 11,
}

impl GameType {
    pub const ALL: [GameType; 12] = [
        GameType::Slots,
        GameType::Mines,
        GameType::Dice,
        GameType::Coinflip,
        GameType::Blackjack,
        GameType::Crash,
        GameType::Roulette,
        GameType::Wheel,
        GameType::Plinko,
        GameType::Ladder,
        GameType::Cases,
        GameType::Upgrade,
    ];

    /// Games that settle from a running multiplier the player can cash out of.
    pub fn is_progressive(&self) -> bool {
        matches!(self, GameType::Mines | GameType::Crash | GameType::Ladder)
    }

    pub fn name(&self) -> &'static str {
        match self {
            GameType::Slots => "slots",
            GameType::Mines => "mines",
            GameType::Dice => "dice",
            GameType::Coinflip => "coinflip",
            GameType::Blackjack => "blackjack",
            GameType::Crash => "crash",
            GameType::Roulette => "roulette",
            GameType::Wheel => "wheel",
            GameType::Plinko => "plinko",
            GameType::Ladder => "ladder",
            GameType::Cases => "cases",
            GameType::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameType::ALL
            .into_iter()
            .find(|game| game.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown game: {s}"))
    }
}

/// Severity class attached to a status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Win,
    Lose,
}

/// How a round ended, as reported to the presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Payout credited and counted as a win.
    Win,
    /// Stake forfeited.
    Loss,
    /// Stake returned, nothing recorded.
    Push,
    /// Part of the stake returned, counted as a loss.
    Refund,
    /// An inventory item was awarded.
    Prize,
}

impl Outcome {
    pub fn severity(&self) -> Severity {
        match self {
            Outcome::Win | Outcome::Prize => Severity::Win,
            Outcome::Loss | Outcome::Refund => Severity::Lose,
            Outcome::Push => Severity::Info,
        }
    }
}
