use crate::{
    casino::{GameError, GameResult, GameSession},
    config::{Timings, ValidatedConfig},
    ledger::Ledger,
    scheduler::{Scheduler, Task, TaskKind},
    state::Store,
};
use royal_types::casino::{Event, GameType, Outcome, Severity, CREDIT_AMOUNT};
use std::{collections::BTreeMap, time::Duration};
use tracing::{debug, info};

mod handlers;

/// Where a game table is in its round lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// Round open and accepting moves.
    InRound(u64),
    /// Round settled; its presentation is still playing.
    Settling(u64),
}

impl Phase {
    pub fn round(&self) -> Option<u64> {
        match self {
            Phase::Idle => None,
            Phase::InRound(round) | Phase::Settling(round) => Some(*round),
        }
    }
}

#[derive(Default)]
struct Table {
    phase: Phase,
    /// Current round, or the last settled one once the table is idle again.
    session: Option<GameSession>,
    /// Moves applied to the current round, including the opening draw.
    moves: u32,
}

/// Front door of the engine: owns the ledger, every game table and the clock.
///
/// Each operation either applies in full and returns the events it produced,
/// or is rejected with a [GameError] before anything is mutated.
pub struct Layer<S: Store> {
    ledger: Ledger<S>,
    scheduler: Scheduler,
    timings: Timings,
    crash_tick: Duration,
    seed: u64,
    rounds: u64,
    tables: BTreeMap<GameType, Table>,
}

impl<S: Store> Layer<S> {
    pub fn new(ledger: Ledger<S>, config: ValidatedConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!(seed, "table seed");
        Self {
            ledger,
            scheduler: Scheduler::default(),
            timings: config.timings,
            crash_tick: config.crash_tick,
            seed,
            rounds: 0,
            tables: GameType::ALL
                .into_iter()
                .map(|game| (game, Table::default()))
                .collect(),
        }
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Virtual time elapsed since the layer was created.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn phase(&self, game: GameType) -> Phase {
        self.table(game).phase
    }

    /// Current round of `game`, or its last settled round.
    pub fn session(&self, game: GameType) -> Option<&GameSession> {
        self.table(game).session.as_ref()
    }

    /// Presentation task still pending for `game`.
    pub fn pending(&self, game: GameType) -> Option<&Task> {
        self.scheduler.pending(game)
    }

    /// Moves the clock forward, firing every task that falls due on the way.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Event> {
        let until = self.scheduler.now() + elapsed;
        let mut events = Vec::new();
        while let Some(task) = self.scheduler.next_due(until) {
            match task.kind {
                TaskKind::Reveal => events.extend(self.finish(task.game, task.round)),
                TaskKind::Tick { .. } => events.extend(self.tick(task.game, task.round)),
            }
        }
        self.scheduler.advance_to(until);
        events
    }

    pub fn take_credit(&mut self) -> Vec<Event> {
        self.ledger.take_credit();
        vec![
            Event::BalanceChanged {
                balance: self.ledger.balance(),
            },
            Event::status(
                None,
                Severity::Info,
                format!("Credit taken: ${CREDIT_AMOUNT}"),
            ),
        ]
    }

    /// Wipes the ledger back to its defaults and abandons every open round.
    pub fn reset(&mut self) -> Vec<Event> {
        self.scheduler.cancel_all();
        for table in self.tables.values_mut() {
            *table = Table::default();
        }
        self.ledger.reset();
        info!("all tables reset");
        vec![
            Event::BalanceChanged {
                balance: self.ledger.balance(),
            },
            Event::status(None, Severity::Info, "All data has been reset"),
        ]
    }

    fn table(&self, game: GameType) -> &Table {
        &self.tables[&game]
    }

    fn table_mut(&mut self, game: GameType) -> &mut Table {
        self.tables.entry(game).or_default()
    }

    fn ensure_idle(&self, game: GameType) -> Result<(), GameError> {
        match self.phase(game) {
            Phase::Idle => Ok(()),
            _ => Err(GameError::RoundInProgress(game)),
        }
    }

    fn balance_event(&self) -> Event {
        Event::BalanceChanged {
            balance: self.ledger.balance(),
        }
    }

    /// Advances a timer-driven round by one step.
    fn tick(&mut self, game: GameType, round: u64) -> Vec<Event> {
        if self.phase(game) != Phase::InRound(round) {
            self.scheduler.cancel(game, round);
            return Vec::new();
        }
        let Some(session) = self.table_mut(game).session.as_mut() else {
            return Vec::new();
        };
        match session.tick() {
            Ok(GameResult::Continue) => self.progress(game, round).into_iter().collect(),
            Ok(result) => self.settle(game, round, result),
            Err(e) => {
                debug!(%game, round, "tick rejected: {}", e);
                self.scheduler.cancel(game, round);
                Vec::new()
            }
        }
    }

    /// Running multiplier of a progressive round.
    fn progress(&self, game: GameType, round: u64) -> Option<Event> {
        let session = self.session(game)?;
        let multiplier = session.multiplier()?;
        let cashout = match session {
            GameSession::Mines(mines) => mines.cashout_value(),
            GameSession::Ladder(ladder) => ladder.cashout_value(),
            GameSession::Crash(crash) => crash.cashout_value(),
            _ => return None,
        };
        Some(Event::Progress {
            game,
            round,
            multiplier,
            cashout,
        })
    }

    /// Applies a finished round to the ledger and starts its presentation delay.
    fn settle(&mut self, game: GameType, round: u64, result: GameResult) -> Vec<Event> {
        // Repeating ticks stop here, exactly once.
        self.scheduler.cancel(game, round);

        let Some(session) = self.table(game).session.clone() else {
            return Vec::new();
        };
        let bet = session.bet();
        let mut events = Vec::new();
        let (payout, outcome) = match &result {
            GameResult::Continue => return events,
            GameResult::Win(payout) => {
                self.ledger.credit(*payout);
                self.ledger.record_round(bet, *payout, true);
                (*payout, Outcome::Win)
            }
            GameResult::Loss => {
                self.ledger.record_round(bet, 0, false);
                (0, Outcome::Loss)
            }
            GameResult::Refund(payout) => {
                self.ledger.credit(*payout);
                self.ledger.record_round(bet, 0, false);
                (*payout, Outcome::Refund)
            }
            GameResult::Push => {
                self.ledger.credit(bet);
                (bet, Outcome::Push)
            }
            GameResult::Prize(loot) => {
                let item = self.ledger.acquire(loot.clone());
                let value = item.value();
                events.push(Event::ItemAcquired { item });
                (value, Outcome::Prize)
            }
            GameResult::Upgrade { consumed, prize } => {
                if self.ledger.remove_item(*consumed).is_some() {
                    events.push(Event::ItemRemoved { id: *consumed });
                }
                match prize {
                    Some(loot) => {
                        let item = self.ledger.acquire(loot.clone());
                        let value = item.value();
                        events.push(Event::ItemAcquired { item });
                        (value, Outcome::Prize)
                    }
                    None => (0, Outcome::Loss),
                }
            }
        };
        debug!(%game, round, bet, payout, ?outcome, "round settled");

        events.insert(
            0,
            Event::RoundSettled {
                game,
                round,
                bet,
                payout,
                outcome,
            },
        );
        if matches!(outcome, Outcome::Win | Outcome::Refund | Outcome::Push) {
            events.push(self.balance_event());
        }
        let message = handlers::describe(&session, &result, payout);
        events.push(Event::status(game, outcome.severity(), message));

        let delay = self.timings.delay(game);
        if delay.is_zero() {
            self.table_mut(game).phase = Phase::Idle;
            events.push(Event::RoundFinished { game, round });
        } else {
            self.table_mut(game).phase = Phase::Settling(round);
            self.scheduler
                .schedule(game, round, delay, TaskKind::Reveal);
        }
        events
    }

    /// Returns a settling table to idle.
    fn finish(&mut self, game: GameType, round: u64) -> Vec<Event> {
        let table = self.table_mut(game);
        if table.phase != Phase::Settling(round) {
            return Vec::new();
        }
        table.phase = Phase::Idle;
        vec![Event::RoundFinished { game, round }]
    }
}
