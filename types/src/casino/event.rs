use super::{GameType, Item, Outcome, Severity};
use serde::{Deserialize, Serialize};

/// Notifications emitted by the engine for the presentation to render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    RoundStarted {
        game: GameType,
        round: u64,
        bet: u64,
    },
    /// Running multiplier of a progressive round and what a cash-out would pay.
    Progress {
        game: GameType,
        round: u64,
        multiplier: f64,
        cashout: u64,
    },
    RoundSettled {
        game: GameType,
        round: u64,
        bet: u64,
        payout: u64,
        outcome: Outcome,
    },
    /// The presentation sequence of a settled round has elapsed; the game is idle.
    RoundFinished {
        game: GameType,
        round: u64,
    },
    BalanceChanged {
        balance: u64,
    },
    ItemAcquired {
        item: Item,
    },
    ItemRemoved {
        id: u64,
    },
    Status {
        game: Option<GameType>,
        severity: Severity,
        message: String,
    },
}

impl Event {
    pub fn status(game: impl Into<Option<GameType>>, severity: Severity, message: impl Into<String>) -> Self {
        Event::Status {
            game: game.into(),
            severity,
            message: message.into(),
        }
    }
}
