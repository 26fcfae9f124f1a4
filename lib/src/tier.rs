//! # Rarity tiers
//!
//! Every item in a catalog belongs to exactly one of four tiers. Tiers drive both
//! the draw probabilities and the economy tables, so most per-tier data lives in
//! a `TierTable`.
use std::fmt;
use std::ops::{Index, IndexMut};

/// Tier represents the rarity class of an item, ordered from most to least common
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
  Common,
  Uncommon,
  Rare,
  Epic,
}

impl Tier {
  /// All tiers, in ascending rarity
  pub const ALL: [Tier; 4] = [Tier::Common, Tier::Uncommon, Tier::Rare, Tier::Epic];

  pub fn as_str(&self) -> &'static str {
    match self {
      Tier::Common => "common",
      Tier::Uncommon => "uncommon",
      Tier::Rare => "rare",
      Tier::Epic => "epic",
    }
  }
}

impl fmt::Display for Tier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// TierTable holds one value per tier
///
/// Serializes as a map keyed by tier name, e.g. `{"common": 10, "uncommon": 20, ...}`
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierTable<T> {
  pub common: T,
  pub uncommon: T,
  pub rare: T,
  pub epic: T,
}

impl<T> TierTable<T> {
  pub fn new(common: T, uncommon: T, rare: T, epic: T) -> Self {
    Self {
      common,
      uncommon,
      rare,
      epic,
    }
  }

  /// Returns a table where each entry is produced by calling `f` with its tier
  pub fn from_fn<F: FnMut(Tier) -> T>(mut f: F) -> Self {
    Self {
      common: f(Tier::Common),
      uncommon: f(Tier::Uncommon),
      rare: f(Tier::Rare),
      epic: f(Tier::Epic),
    }
  }

  pub fn map<U, F: FnMut(Tier, &T) -> U>(&self, mut f: F) -> TierTable<U> {
    TierTable::from_fn(|tier| f(tier, &self[tier]))
  }

  /// Iterates `(tier, value)` pairs in ascending rarity
  pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
    Tier::ALL.iter().map(move |tier| (*tier, &self[*tier]))
  }
}

impl<T: Clone> TierTable<T> {
  /// Returns a table with `value` for every tier
  pub fn splat(value: T) -> Self {
    Self::from_fn(|_| value.clone())
  }
}

impl<T> Index<Tier> for TierTable<T> {
  type Output = T;

  fn index(&self, tier: Tier) -> &T {
    match tier {
      Tier::Common => &self.common,
      Tier::Uncommon => &self.uncommon,
      Tier::Rare => &self.rare,
      Tier::Epic => &self.epic,
    }
  }
}

impl<T> IndexMut<Tier> for TierTable<T> {
  fn index_mut(&mut self, tier: Tier) -> &mut T {
    match tier {
      Tier::Common => &mut self.common,
      Tier::Uncommon => &mut self.uncommon,
      Tier::Rare => &mut self.rare,
      Tier::Epic => &mut self.epic,
    }
  }
}
