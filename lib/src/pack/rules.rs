use crate::catalog::Catalog;
use crate::pack::{GuaranteeCounter, Pack, PackOpener, Pull, TierThresholds};
use crate::tier::Tier;
use rand::prelude::*;

/// Number of items in a pack
pub const SLOTS_PER_PACK: usize = 8;
/// Number of consecutive epic-free packs after which the next pack holds an epic
pub const GUARANTEE_AFTER: u32 = 10;

/// SlotRule is the rule used to pick the tier for one slot
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SlotRule {
  /// The guarantee fired: the slot is always epic
  Guaranteed,
  /// Any slot but the last, drawn from `PackRules::leading`
  Leading,
  /// The final slot, drawn from `PackRules::last`
  Last,
}

/// PackRules is the standard pack: `slots` items, the last drawn from its
/// own distribution, and the first replaced by an epic once the counter
/// reaches `guarantee_after`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackRules {
  pub slots: usize,
  pub leading: TierThresholds,
  pub last: TierThresholds,
  pub guarantee_after: u32,
}

impl PackRules {
  pub fn new() -> Self {
    Self {
      slots: SLOTS_PER_PACK,
      leading: TierThresholds::leading_slots(),
      last: TierThresholds::last_slot(),
      guarantee_after: GUARANTEE_AFTER,
    }
  }

  /// Returns the rule for `slot` given the counter carried into the pack
  pub fn slot_rule(&self, slot: usize, counter: GuaranteeCounter) -> SlotRule {
    if slot == 0 && counter.is_due(self.guarantee_after) {
      SlotRule::Guaranteed
    } else if slot + 1 == self.slots {
      SlotRule::Last
    } else {
      SlotRule::Leading
    }
  }
}

impl Default for PackRules {
  fn default() -> Self {
    Self::new()
  }
}

impl PackOpener for PackRules {
  fn open_pack(&self, rng: &mut impl Rng, catalog: &Catalog, counter: GuaranteeCounter) -> Pack {
    let mut pulls = Vec::with_capacity(self.slots);
    let mut guarantee_fired = false;
    for slot in 0..self.slots {
      let tier = match self.slot_rule(slot, counter) {
        SlotRule::Guaranteed => {
          guarantee_fired = true;
          Tier::Epic
        }
        SlotRule::Leading => self.leading.select(rng.gen::<f64>()),
        SlotRule::Last => self.last.select(rng.gen::<f64>()),
      };
      // Items are drawn with replacement, so duplicates within a pack are expected
      let candidates = catalog.items_of_tier(tier);
      let item = candidates[rng.gen_range(0, candidates.len())];
      pulls.push(Pull { item, tier });
    }
    let had_epic = pulls.iter().any(|p| p.tier == Tier::Epic);
    if guarantee_fired {
      trace!("guarantee fired after {} epic-free packs", counter);
    }
    Pack {
      pulls,
      guarantee_fired,
      counter: counter.advance(had_epic),
    }
  }
}
