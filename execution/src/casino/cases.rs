//! Case opening.
//!
//! A case holds five skins ordered from least to most valuable. The tier is
//! drawn against fixed cumulative odds shared by every case; the cosmetic reel
//! is filled afterwards with the winning skin forced into place.

use super::{CasinoGame, GameError, GameResult, GameRng};
use royal_types::casino::{Loot, Rarity, REEL_LENGTH, REEL_WINNING_INDEX};

/// Upper bounds of the tier draw, most valuable tier first.
const TIER_ODDS: [(f64, usize); 4] = [(0.02, 4), (0.10, 3), (0.30, 2), (0.60, 1)];

#[derive(Debug)]
pub struct Skin {
    pub name: &'static str,
    pub rarity: Rarity,
    pub value: u64,
    pub icon: &'static str,
}

impl Skin {
    pub fn loot(&self) -> Loot {
        Loot {
            name: self.name.to_string(),
            rarity: self.rarity,
            value: self.value,
            icon: self.icon.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Case {
    pub id: u8,
    pub name: &'static str,
    pub icon: &'static str,
    pub price: u64,
    pub skins: [Skin; 5],
}

const fn skin(name: &'static str, rarity: Rarity, value: u64, icon: &'static str) -> Skin {
    Skin {
        name,
        rarity,
        value,
        icon,
    }
}

pub static CASES: [Case; 3] = [
    Case {
        id: 1,
        name: "Bronze Case",
        icon: "📦",
        price: 50,
        skins: [
            skin("Basic Knife", Rarity::Common, 20, "🔪"),
            skin("Simple Gun", Rarity::Common, 30, "🔫"),
            skin("Blue Pistol", Rarity::Uncommon, 60, "🔫"),
            skin("Rare Knife", Rarity::Rare, 120, "🗡️"),
            skin("Golden AK", Rarity::Legendary, 300, "💎"),
        ],
    },
    Case {
        id: 2,
        name: "Silver Case",
        icon: "📦",
        price: 150,
        skins: [
            skin("Steel Blade", Rarity::Uncommon, 80, "⚔️"),
            skin("Blue Rifle", Rarity::Uncommon, 100, "🔫"),
            skin("Purple SMG", Rarity::Rare, 200, "🔫"),
            skin("Dragon Knife", Rarity::Rare, 350, "🐉"),
            skin("Diamond AWP", Rarity::Legendary, 800, "💎"),
        ],
    },
    Case {
        id: 3,
        name: "Gold Case",
        icon: "📦",
        price: 300,
        skins: [
            skin("Ruby Dagger", Rarity::Rare, 400, "💎"),
            skin("Sapphire Gun", Rarity::Rare, 500, "💎"),
            skin("Emerald Knife", Rarity::Legendary, 1000, "💚"),
            skin("Golden Dragon", Rarity::Legendary, 1500, "🐲"),
            skin("Mythic Blade", Rarity::Legendary, 2500, "⚡"),
        ],
    },
];

pub fn find(id: u8) -> Result<&'static Case, GameError> {
    CASES
        .iter()
        .find(|case| case.id == id)
        .ok_or(GameError::UnknownCase(id))
}

/// Tier index for a uniform draw in [0, 1). Bounds are half-open.
pub fn tier_for(r: f64) -> usize {
    TIER_ODDS
        .iter()
        .find(|(bound, _)| r < *bound)
        .map(|&(_, tier)| tier)
        .unwrap_or(0)
}

#[derive(Clone, Debug)]
pub struct CaseOpening {
    pub case: &'static Case,
    pub tier: usize,
    /// Skin indices shown on the reel; `reel[REEL_WINNING_INDEX] == tier`.
    pub reel: Vec<usize>,
}

impl CaseOpening {
    pub fn prize(&self) -> &'static Skin {
        &self.case.skins[self.tier]
    }
}

impl CasinoGame for CaseOpening {
    type Options = &'static Case;

    fn init(
        _price: u64,
        case: &'static Case,
        rng: &mut GameRng,
    ) -> Result<(Self, GameResult), GameError> {
        let tier = tier_for(rng.next_f64());
        let reel = (0..REEL_LENGTH)
            .map(|i| {
                if i == REEL_WINNING_INDEX {
                    tier
                } else {
                    rng.next_index(case.skins.len())
                }
            })
            .collect();
        let opening = CaseOpening { case, tier, reel };
        let result = GameResult::Prize(opening.prize().loot());
        Ok((opening, result))
    }

    fn bet(&self) -> u64 {
        self.case.price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(tier_for(0.0), 4);
        assert_eq!(tier_for(0.019), 4);
        assert_eq!(tier_for(0.02), 3);
        assert_eq!(tier_for(0.099), 3);
        assert_eq!(tier_for(0.10), 2);
        assert_eq!(tier_for(0.299), 2);
        assert_eq!(tier_for(0.30), 1);
        assert_eq!(tier_for(0.599), 1);
        assert_eq!(tier_for(0.60), 0);
        assert_eq!(tier_for(0.999), 0);
    }

    #[test]
    fn test_catalog() {
        assert_eq!(find(1).unwrap().price, 50);
        assert_eq!(find(2).unwrap().price, 150);
        assert_eq!(find(3).unwrap().price, 300);
        assert_eq!(find(4).unwrap_err(), GameError::UnknownCase(4));
        for case in CASES.iter() {
            assert!(case.skins.windows(2).all(|w| w[0].value < w[1].value));
            assert_eq!(case.skins[4].rarity, Rarity::Legendary);
        }
    }

    #[test]
    fn test_reel_carries_prize() {
        let case = find(2).unwrap();
        for round in 0..50 {
            let mut rng = GameRng::new(13, round, 0);
            let (opening, result) = CaseOpening::init(case.price, case, &mut rng).unwrap();
            assert_eq!(opening.reel.len(), REEL_LENGTH);
            assert_eq!(opening.reel[REEL_WINNING_INDEX], opening.tier);
            assert!(opening.reel.iter().all(|&i| i < 5));
            assert_eq!(result, GameResult::Prize(case.skins[opening.tier].loot()));
            assert_eq!(opening.bet(), 150);
        }
    }
}
