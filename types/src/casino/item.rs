use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Rarity tier of a collectible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        };
        f.write_str(name)
    }
}

/// A collectible before it has been placed in an inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loot {
    pub name: String,
    pub rarity: Rarity,
    pub value: u64,
    pub icon: String,
}

/// An owned collectible. `id` is the removal key.
///
/// Stored ids may be any JSON number. Fractions are floored and values with
/// no `u64` counterpart load as 0, which the ledger treats as unassigned.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(flatten)]
    pub loot: Loot,
    #[serde(deserialize_with = "any_number_id")]
    pub id: u64,
}

fn any_number_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    struct IdVisitor;

    impl de::Visitor<'_> for IdVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a numeric item id")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            Ok(u64::try_from(v).unwrap_or(0))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v.is_finite() && v >= 0.0 && v < u64::MAX as f64 {
                Ok(v.floor() as u64)
            } else {
                Ok(0)
            }
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

impl Item {
    pub fn name(&self) -> &str {
        &self.loot.name
    }

    pub fn value(&self) -> u64 {
        self.loot.value
    }

    pub fn rarity(&self) -> Rarity {
        self.loot.rarity
    }
}
