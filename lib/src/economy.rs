//! # Surplus and completion economy
//!
//! Copies beyond the third of an item can be converted into credits, and
//! credits can be spent to create missing copies. A collection is complete
//! once its surplus value covers the cost of everything still missing.
use crate::catalog::Catalog;
use crate::ledger::Ledger;
use crate::tier::{Tier, TierTable};

/// Copies of an item a collector keeps before the rest become surplus
pub const KEEP_COPIES: u32 = 3;

/// Economy holds the per-tier conversion value and completion cost
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
  /// Credits yielded by converting one surplus copy
  pub conversion_value: TierTable<u64>,
  /// Credits required to create one missing copy
  pub completion_cost: TierTable<u64>,
}

impl Economy {
  pub fn new() -> Self {
    Self {
      conversion_value: TierTable::new(10, 20, 200, 1200),
      completion_cost: TierTable::new(50, 90, 750, 3500),
    }
  }

  /// Returns the credits obtainable by converting every copy past the third
  ///
  /// Credit sums saturate at `u64::MAX` rather than wrapping.
  pub fn surplus_value(&self, ledger: &Ledger, catalog: &Catalog) -> u64 {
    let mut total: u64 = 0;
    for tier in Tier::ALL.iter() {
      let surplus: u64 = catalog
        .items_of_tier(*tier)
        .iter()
        .map(|id| ledger.count_of(*id).saturating_sub(KEEP_COPIES) as u64)
        .sum();
      total = total.saturating_add(self.conversion_value[*tier].saturating_mul(surplus));
    }
    total
  }

  /// Returns the credits needed to bring every item up to its tier's target
  pub fn completion_cost(&self, ledger: &Ledger, catalog: &Catalog, targets: &CopyTargets) -> u64 {
    self
      .shortfall(ledger, catalog, targets)
      .iter()
      .fold(0u64, |total, (tier, missing)| {
        total.saturating_add(self.completion_cost[tier].saturating_mul(*missing as u64))
      })
  }

  /// Returns the number of missing copies per tier
  pub fn shortfall(&self, ledger: &Ledger, catalog: &Catalog, targets: &CopyTargets) -> TierTable<u32> {
    TierTable::from_fn(|tier| {
      let target = targets.target(tier);
      catalog
        .items_of_tier(tier)
        .iter()
        .map(|id| target.saturating_sub(ledger.count_of(*id)))
        .fold(0u32, u32::saturating_add)
    })
  }
}

impl Default for Economy {
  fn default() -> Self {
    Self::new()
  }
}

/// CopyTargets is the number of copies per item that counts as complete, per tier
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CopyTargets(pub TierTable<u32>);

impl CopyTargets {
  /// Every tier complete at `copies`
  pub fn all(copies: u32) -> Self {
    Self(TierTable::splat(copies))
  }

  /// Three of everything, but a single copy of each epic
  pub fn epic_once() -> Self {
    let mut targets = Self::all(KEEP_COPIES);
    targets.0.epic = 1;
    targets
  }

  pub fn target(&self, tier: Tier) -> u32 {
    self.0[tier]
  }
}

impl Default for CopyTargets {
  fn default() -> Self {
    Self::all(KEEP_COPIES)
  }
}
