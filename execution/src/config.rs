//! Engine configuration.
//!
//! Payout tables, bet limits and board sizes are fixed constants; only the
//! RNG seed and presentation timing are configurable.

use royal_types::casino::GameType;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Table seed. A random seed is drawn when absent.
    pub seed: Option<u64>,
    /// Interval between crash multiplier steps.
    pub crash_tick_ms: u64,
    pub timings: Timings,
}

/// How long each game stays in `Settling` while its animation plays.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Timings {
    pub slots_ms: u64,
    pub mines_ms: u64,
    pub dice_ms: u64,
    pub coinflip_ms: u64,
    pub blackjack_ms: u64,
    pub crash_ms: u64,
    pub roulette_ms: u64,
    pub wheel_ms: u64,
    pub plinko_ms: u64,
    pub ladder_ms: u64,
    pub cases_ms: u64,
    pub upgrade_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            // Three reels stopping 300ms apart after 500ms
            slots_ms: 1_100,
            mines_ms: 0,
            // 21 frames at 50ms
            dice_ms: 1_050,
            coinflip_ms: 1_000,
            blackjack_ms: 0,
            crash_ms: 0,
            roulette_ms: 5_000,
            wheel_ms: 5_100,
            // 12 rows at 150ms plus the slot highlight
            plinko_ms: 3_800,
            ladder_ms: 500,
            cases_ms: 8_000,
            upgrade_ms: 2_000,
        }
    }
}

impl Timings {
    /// Timings with every presentation delay removed.
    pub fn instant() -> Self {
        Self {
            slots_ms: 0,
            mines_ms: 0,
            dice_ms: 0,
            coinflip_ms: 0,
            blackjack_ms: 0,
            crash_ms: 0,
            roulette_ms: 0,
            wheel_ms: 0,
            plinko_ms: 0,
            ladder_ms: 0,
            cases_ms: 0,
            upgrade_ms: 0,
        }
    }

    pub fn delay(&self, game: GameType) -> Duration {
        let ms = match game {
            GameType::Slots => self.slots_ms,
            GameType::Mines => self.mines_ms,
            GameType::Dice => self.dice_ms,
            GameType::Coinflip => self.coinflip_ms,
            GameType::Blackjack => self.blackjack_ms,
            GameType::Crash => self.crash_ms,
            GameType::Roulette => self.roulette_ms,
            GameType::Wheel => self.wheel_ms,
            GameType::Plinko => self.plinko_ms,
            GameType::Ladder => self.ladder_ms,
            GameType::Cases => self.cases_ms,
            GameType::Upgrade => self.upgrade_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            crash_tick_ms: 50,
            timings: Timings::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be > 0 (got {value})")]
    InvalidNonZero { field: &'static str, value: u64 },
}

/// A [Config] whose values have been checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub seed: Option<u64>,
    pub crash_tick: Duration,
    pub timings: Timings,
}

impl Config {
    /// Default config with presentation delays removed.
    pub fn instant() -> Self {
        Self {
            timings: Timings::instant(),
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        if self.crash_tick_ms == 0 {
            return Err(ConfigError::InvalidNonZero {
                field: "crash_tick_ms",
                value: self.crash_tick_ms,
            });
        }
        Ok(ValidatedConfig {
            seed: self.seed,
            crash_tick: Duration::from_millis(self.crash_tick_ms),
            timings: self.timings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default().validate().unwrap();
        assert_eq!(config.crash_tick, Duration::from_millis(50));
        assert_eq!(config.timings.delay(GameType::Roulette), Duration::from_secs(5));
        assert_eq!(config.timings.delay(GameType::Mines), Duration::ZERO);
    }

    #[test]
    fn test_zero_tick_rejected() {
        let config = Config {
            crash_tick_ms: 0,
            ..Config::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidNonZero {
                field: "crash_tick_ms",
                value: 0
            })
        );
    }

    #[test]
    fn test_instant_has_no_delays() {
        let config = Config::instant();
        for game in GameType::ALL {
            assert_eq!(config.timings.delay(game), Duration::ZERO);
        }
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = "seed: 7\ntimings:\n  roulette_ms: 250\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.crash_tick_ms, 50);
        assert_eq!(config.timings.roulette_ms, 250);
        assert_eq!(config.timings.slots_ms, 1_100);
    }
}
