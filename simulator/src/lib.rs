//! Headless players for the royal casino engine.
//!
//! A [Simulator] plays a fixed strategy against one game for many rounds,
//! each player on its own in-memory ledger, and reports how much of the
//! wagered money came back.

use rayon::prelude::*;
use royal_execution::{
    casino::{
        coinflip::Side, dice::Prediction, plinko::Risk, roulette::Color, GameError, GameSession,
        Move, Start,
    },
    Config, ConfigError, Layer, Ledger, Memory, Phase, ValidatedConfig,
};
use royal_types::casino::{Event, GameType, Outcome};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Fixed choices made on behalf of the player.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Strategy {
    pub bombs: u8,
    /// Safe cells to uncover before cashing out of Mines.
    pub mines_reveals: u8,
    /// Rows to climb before cashing out of Ladder.
    pub ladder_rows: u8,
    /// Crash multiplier at which to cash out.
    pub crash_cashout: f64,
    /// Blackjack: hit while the hand is below this value.
    pub hit_below: u8,
    pub prediction: Prediction,
    pub side: Side,
    pub color: Color,
    pub risk: Risk,
    pub case_id: u8,
}

impl Default for Strategy {
    fn default() -> Self {
        Self {
            bombs: 3,
            mines_reveals: 2,
            ladder_rows: 2,
            crash_cashout: 1.5,
            hit_below: 17,
            prediction: Prediction::Under,
            side: Side::Heads,
            color: Color::Red,
            risk: Risk::Low,
            case_id: 1,
        }
    }
}

/// Contents of a simulation config file.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub engine: Config,
    pub strategy: Strategy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: Config::instant(),
            strategy: Strategy::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{0} cannot be simulated")]
    Unsupported(GameType),
    #[error("invalid engine config: {0}")]
    Config(#[from] ConfigError),
    #[error("round rejected: {0}")]
    Rejected(#[from] GameError),
}

/// Totals over every simulated round.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Report {
    pub game: Option<GameType>,
    pub players: usize,
    pub rounds: u64,
    pub wins: u64,
    pub wagered: u64,
    pub returned: u64,
    /// Times a broke player topped up with a credit.
    pub credits: u64,
    pub rtp: f64,
}

impl Report {
    fn merge(mut self, other: Report) -> Report {
        self.game = self.game.or(other.game);
        self.players += other.players;
        self.rounds += other.rounds;
        self.wins += other.wins;
        self.wagered += other.wagered;
        self.returned += other.returned;
        self.credits += other.credits;
        self.rtp = if self.wagered == 0 {
            0.0
        } else {
            self.returned as f64 / self.wagered as f64
        };
        self
    }

    fn tally(&mut self, events: &[Event]) {
        for event in events {
            if let Event::RoundSettled {
                bet,
                payout,
                outcome,
                ..
            } = event
            {
                self.rounds += 1;
                self.wagered += bet;
                self.returned += payout;
                if matches!(outcome, Outcome::Win | Outcome::Prize) {
                    self.wins += 1;
                }
            }
        }
    }
}

pub struct Simulator {
    game: GameType,
    bet: u64,
    rounds: u64,
    strategy: Strategy,
    engine: ValidatedConfig,
}

impl Simulator {
    pub fn new(game: GameType, bet: u64, rounds: u64, settings: Settings) -> Result<Self, SimError> {
        if game == GameType::Upgrade {
            return Err(SimError::Unsupported(game));
        }
        Ok(Self {
            game,
            bet,
            rounds,
            strategy: settings.strategy,
            engine: settings.engine.validate()?,
        })
    }

    /// Runs every player in parallel and merges their reports.
    pub fn run(&self, players: usize) -> Result<Report, SimError> {
        let reports = (0..players as u64)
            .into_par_iter()
            .map(|player| self.play(player))
            .collect::<Result<Vec<_>, _>>()?;
        let report = reports
            .into_iter()
            .fold(Report::default(), Report::merge);
        info!(
            game = %self.game,
            rounds = report.rounds,
            rtp = report.rtp,
            "simulation finished"
        );
        Ok(report)
    }

    fn play(&self, player: u64) -> Result<Report, SimError> {
        let mut engine = self.engine.clone();
        engine.seed = engine.seed.map(|seed| seed.wrapping_add(player));
        let mut layer = Layer::new(Ledger::open(Memory::default()), engine);
        let stake = self.stake()?;

        let mut report = Report {
            game: Some(self.game),
            players: 1,
            ..Report::default()
        };
        for _ in 0..self.rounds {
            while layer.balance() < stake {
                layer.take_credit();
                report.credits += 1;
            }
            let events = self.round(&mut layer)?;
            report.tally(&events);
            self.wait_idle(&mut layer);
        }
        debug!(player, balance = layer.balance(), "player finished");
        Ok(report.merge(Report::default()))
    }

    fn stake(&self) -> Result<u64, SimError> {
        match self.game {
            GameType::Cases => Ok(royal_execution::casino::cases::find(self.strategy.case_id)?.price),
            _ => Ok(self.bet),
        }
    }

    fn wait_idle(&self, layer: &mut Layer<Memory>) {
        let step = self.engine.timings.delay(self.game).max(Duration::from_millis(1));
        while layer.phase(self.game) != Phase::Idle {
            layer.advance(step);
        }
    }

    /// Plays one round to settlement, returning every event it produced.
    fn round(&self, layer: &mut Layer<Memory>) -> Result<Vec<Event>, SimError> {
        let strategy = &self.strategy;
        let bet = self.bet;
        let mut events = match self.game {
            GameType::Slots => layer.start(bet, Start::Slots)?,
            GameType::Dice => layer.start(bet, Start::Dice(strategy.prediction))?,
            GameType::Coinflip => layer.start(bet, Start::Coinflip(strategy.side))?,
            GameType::Roulette => layer.start(bet, Start::Roulette(strategy.color))?,
            GameType::Wheel => layer.start(bet, Start::Wheel)?,
            GameType::Plinko => layer.start(bet, Start::Plinko(strategy.risk))?,
            GameType::Cases => layer.open_case(strategy.case_id)?,
            GameType::Mines => layer.start(
                bet,
                Start::Mines {
                    bombs: strategy.bombs,
                },
            )?,
            GameType::Ladder => layer.start(bet, Start::Ladder)?,
            GameType::Crash => layer.start(bet, Start::Crash)?,
            GameType::Blackjack => layer.start(bet, Start::Blackjack)?,
            GameType::Upgrade => return Err(SimError::Unsupported(self.game)),
        };

        match self.game {
            GameType::Mines => {
                for cell in 0..strategy.mines_reveals {
                    if !self.in_round(layer) {
                        break;
                    }
                    events.extend(layer.play(self.game, Move::Reveal(cell))?);
                }
                events.extend(self.cash_out(layer)?);
            }
            GameType::Ladder => {
                for row in 0..strategy.ladder_rows {
                    if !self.in_round(layer) {
                        break;
                    }
                    let tile = row % 3;
                    events.extend(layer.play(self.game, Move::Pick { row, tile })?);
                }
                events.extend(self.cash_out(layer)?);
            }
            GameType::Crash => {
                while self.in_round(layer) {
                    let multiplier = layer
                        .session(self.game)
                        .and_then(GameSession::multiplier)
                        .unwrap_or(1.0);
                    if multiplier >= strategy.crash_cashout {
                        events.extend(layer.play(self.game, Move::Cashout)?);
                    } else {
                        events.extend(layer.advance(self.engine.crash_tick));
                    }
                }
            }
            GameType::Blackjack => {
                while self.in_round(layer) {
                    let mv = match layer.session(self.game) {
                        Some(GameSession::Blackjack(hand))
                            if hand.player_value() < strategy.hit_below =>
                        {
                            Move::Hit
                        }
                        _ => Move::Stand,
                    };
                    events.extend(layer.play(self.game, mv)?);
                }
            }
            _ => {}
        }
        Ok(events)
    }

    fn in_round(&self, layer: &Layer<Memory>) -> bool {
        matches!(layer.phase(self.game), Phase::InRound(_))
    }

    /// Cashes out if the round survived; a round with nothing revealed yet is
    /// pushed one step first so there is something to take.
    fn cash_out(&self, layer: &mut Layer<Memory>) -> Result<Vec<Event>, SimError> {
        if !self.in_round(layer) {
            return Ok(Vec::new());
        }
        match layer.play(self.game, Move::Cashout) {
            Ok(events) => Ok(events),
            Err(GameError::NothingToCashOut) => {
                let mv = match self.game {
                    GameType::Ladder => Move::Pick { row: 0, tile: 0 },
                    _ => Move::Reveal(0),
                };
                let mut events = layer.play(self.game, mv)?;
                events.extend(self.cash_out(layer)?);
                Ok(events)
            }
            Err(e) => Err(e.into()),
        }
    }
}
