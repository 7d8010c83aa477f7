//! Upgrade: stake an inventory item on a chance at a more valuable one.
//!
//! Selecting an item prices a target worth 1.5x to 2x the input. The success
//! chance falls as the value ratio grows and is clamped to 20-80%. Attempting
//! always consumes the input.

use super::{CasinoGame, GameError, GameResult, GameRng, Move};
use royal_types::casino::{Item, Loot, Rarity};

const TARGET_RARITIES: [Rarity; 3] = [Rarity::Uncommon, Rarity::Rare, Rarity::Legendary];
const RARITY_STEP: u64 = 300;
const ICONS: [&str; 7] = ["🗡️", "⚔️", "🐉", "💎", "💚", "🐲", "⚡"];
const MIN_CHANCE: f64 = 20.0;
const MAX_CHANCE: f64 = 80.0;

/// Target value for a uniform draw `u` in [0, 1).
pub fn target_value(value: u64, u: f64) -> u64 {
    (value as f64 * (1.5 + u * 0.5)).floor() as u64
}

pub fn target_rarity(value: u64) -> Rarity {
    TARGET_RARITIES[((value / RARITY_STEP) as usize).min(TARGET_RARITIES.len() - 1)]
}

/// Success chance in percent.
pub fn success_chance(input: u64, target: u64) -> f64 {
    let ratio = target as f64 / input.max(1) as f64;
    (100.0 - (ratio - 1.0) * 50.0).clamp(MIN_CHANCE, MAX_CHANCE)
}

#[derive(Clone, Debug)]
pub struct Upgrade {
    pub input: Item,
    pub target: Loot,
    pub chance: f64,
    pub succeeded: Option<bool>,
}

impl Upgrade {
    fn roll(&mut self, rng: &mut GameRng) -> GameResult {
        let success = rng.next_f64() * 100.0 < self.chance;
        self.succeeded = Some(success);
        GameResult::Upgrade {
            consumed: self.input.id,
            prize: success.then(|| self.target.clone()),
        }
    }
}

impl CasinoGame for Upgrade {
    type Options = Item;

    fn init(_: u64, input: Item, rng: &mut GameRng) -> Result<(Self, GameResult), GameError> {
        let value = target_value(input.value(), rng.next_f64());
        let target = Loot {
            name: format!("Upgraded {}", input.name()),
            rarity: target_rarity(value),
            value,
            icon: ICONS[rng.next_index(ICONS.len())].to_string(),
        };
        let chance = success_chance(input.value(), value);
        let offer = Upgrade {
            input,
            target,
            chance,
            succeeded: None,
        };
        Ok((offer, GameResult::Continue))
    }

    fn process_move(&mut self, mv: Move, rng: &mut GameRng) -> Result<GameResult, GameError> {
        if self.succeeded.is_some() {
            return Err(GameError::GameAlreadyComplete);
        }
        match mv {
            Move::Attempt => Ok(self.roll(rng)),
            _ => Err(GameError::InvalidMove),
        }
    }

    fn bet(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(value: u64) -> Item {
        Item {
            loot: Loot {
                name: "Rare Knife".to_string(),
                rarity: Rarity::Rare,
                value,
                icon: "🗡️".to_string(),
            },
            id: 7,
        }
    }

    #[test]
    fn test_target_value_range() {
        assert_eq!(target_value(100, 0.0), 150);
        assert_eq!(target_value(100, 0.5), 175);
        assert_eq!(target_value(100, 0.999_999), 199);
        assert_eq!(target_value(21, 0.0), 31);
    }

    #[test]
    fn test_target_rarity() {
        assert_eq!(target_rarity(180), Rarity::Uncommon);
        assert_eq!(target_rarity(299), Rarity::Uncommon);
        assert_eq!(target_rarity(300), Rarity::Rare);
        assert_eq!(target_rarity(599), Rarity::Rare);
        assert_eq!(target_rarity(600), Rarity::Legendary);
        assert_eq!(target_rarity(5_000), Rarity::Legendary);
    }

    #[test]
    fn test_success_chance() {
        assert_eq!(success_chance(100, 150), 75.0);
        assert_eq!(success_chance(100, 200), 50.0);
        assert_eq!(success_chance(100, 120), 80.0);
        assert_eq!(success_chance(100, 400), 20.0);
        for u in [0.0, 0.25, 0.5, 0.75, 0.99] {
            let chance = success_chance(120, target_value(120, u));
            assert!((MIN_CHANCE..=MAX_CHANCE).contains(&chance));
        }
    }

    #[test]
    fn test_offer() {
        let mut rng = GameRng::new(3, 3, 0);
        let (offer, result) = Upgrade::init(0, item(120), &mut rng).unwrap();
        assert_eq!(result, GameResult::Continue);
        assert_eq!(offer.target.name, "Upgraded Rare Knife");
        assert!((180..240).contains(&offer.target.value));
        assert_eq!(offer.target.rarity, Rarity::Uncommon);
        assert!(ICONS.contains(&offer.target.icon.as_str()));
        assert_eq!(offer.chance, success_chance(120, offer.target.value));
    }

    #[test]
    fn test_attempt_consumes_input() {
        let mut wins = 0;
        for round in 0..200 {
            let mut rng = GameRng::new(3, round, 0);
            let (mut offer, _) = Upgrade::init(0, item(100), &mut rng).unwrap();
            let mut rng = GameRng::new(3, round, 1);
            match offer.process_move(Move::Attempt, &mut rng).unwrap() {
                GameResult::Upgrade { consumed, prize } => {
                    assert_eq!(consumed, 7);
                    assert_eq!(prize.is_some(), offer.succeeded == Some(true));
                    if let Some(prize) = prize {
                        assert_eq!(prize, offer.target);
                        wins += 1;
                    }
                }
                other => panic!("unexpected result {other:?}"),
            }
            assert_eq!(
                offer.process_move(Move::Attempt, &mut rng),
                Err(GameError::GameAlreadyComplete)
            );
        }
        assert!(wins > 0 && wins < 200);
    }
}
