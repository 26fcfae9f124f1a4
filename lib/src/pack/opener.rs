use crate::catalog::{Catalog, ItemId};
use crate::pack::GuaranteeCounter;
use crate::tier::Tier;
use rand::prelude::*;

/// Pull is a single item drawn into a pack slot
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pull {
  pub item: ItemId,
  pub tier: Tier,
}

/// Pack is the result of opening one pack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pack {
  /// Items in slot order
  pub pulls: Vec<Pull>,
  /// True if the guarantee replaced the normal draw for the first slot
  pub guarantee_fired: bool,
  /// The guarantee counter after this pack
  pub counter: GuaranteeCounter,
}

impl Pack {
  pub fn len(&self) -> usize {
    self.pulls.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pulls.is_empty()
  }

  pub fn has_tier(&self, tier: Tier) -> bool {
    self.pulls.iter().any(|p| p.tier == tier)
  }

  pub fn count_tier(&self, tier: Tier) -> usize {
    self.pulls.iter().filter(|p| p.tier == tier).count()
  }
}

/// The base trait for any pack type
pub trait PackOpener {
  /// Returns a randomly drawn `Pack`
  ///
  /// # Arguments
  ///
  /// * `rng` - A random number generator used to pick tiers and items
  /// * `catalog` - The set the pack is drawn from. Every tier must be non-empty
  /// * `counter` - The guarantee counter carried in from the previous pack
  fn open_pack(&self, rng: &mut impl Rng, catalog: &Catalog, counter: GuaranteeCounter) -> Pack;
}
