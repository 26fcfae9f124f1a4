//! # Collection ledger
//!
use crate::catalog::ItemId;
use crate::pack::Pack;

/// Ledger counts the copies of each item a collector owns during one run
///
/// Counts start at zero and only ever grow. Surplus conversion is computed
/// from the counts by the economy, never written back here.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
  /// Indexed by `ItemId::index`, grown on demand
  counts: Vec<u32>,
  recorded: usize,
}

impl Ledger {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns an empty ledger sized for a catalog of `items` items
  pub fn with_capacity(items: usize) -> Self {
    Self {
      counts: vec![0; items],
      recorded: 0,
    }
  }

  /// Adds one copy of `item`
  pub fn record_draw(&mut self, item: ItemId) {
    let i = item.index();
    if i >= self.counts.len() {
      self.counts.resize(i + 1, 0);
    }
    self.counts[i] += 1;
    self.recorded += 1;
  }

  /// Adds every item in `pack`
  pub fn record_pack(&mut self, pack: &Pack) {
    for pull in &pack.pulls {
      self.record_draw(pull.item);
    }
  }

  pub fn count_of(&self, item: ItemId) -> u32 {
    self.counts.get(item.index()).copied().unwrap_or(0)
  }

  /// Total number of copies recorded
  pub fn total(&self) -> usize {
    self.recorded
  }
}

#[cfg(test)]
mod tests {
  use crate::catalog::Catalog;
  use crate::ledger::*;
  use crate::tier::{Tier, TierTable};

  #[test]
  fn counts_default_to_zero_and_accumulate() {
    let catalog = Catalog::from_counts("t", TierTable::new(2, 1, 1, 1)).unwrap();
    let a = catalog.items_of_tier(Tier::Common)[0];
    let b = catalog.items_of_tier(Tier::Epic)[0];
    let mut ledger = Ledger::new();
    assert_eq!(ledger.count_of(a), 0);
    assert_eq!(ledger.count_of(b), 0);
    ledger.record_draw(b);
    ledger.record_draw(b);
    ledger.record_draw(a);
    assert_eq!(ledger.count_of(a), 1);
    assert_eq!(ledger.count_of(b), 2);
    assert_eq!(ledger.total(), 3);
  }

  #[test]
  fn presized_and_grown_ledgers_agree() {
    let catalog = Catalog::from_counts("t", TierTable::new(3, 3, 3, 3)).unwrap();
    let mut sized = Ledger::with_capacity(catalog.len());
    let mut grown = Ledger::new();
    for item in catalog.iter().rev() {
      sized.record_draw(item.id);
      grown.record_draw(item.id);
    }
    for item in catalog.iter() {
      assert_eq!(sized.count_of(item.id), grown.count_of(item.id));
    }
    assert_eq!(sized.total(), grown.total());
  }
}
