//! # Catalog
//!
//! A catalog is the immutable list of collectible items for one card set,
//! partitioned by tier. Every other component borrows it.
use crate::tier::{Tier, TierTable};
use std::collections::HashSet;
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;
use std::ops::Deref;

/// ItemId is an opaque handle to an item in a specific `Catalog`
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemId(u32);

impl ItemId {
  /// Position of the item within its catalog
  pub fn index(self) -> usize {
    self.0 as usize
  }
}

/// Item represents a single collectible card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id: ItemId,
  pub name: String,
  pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogError {
  /// No items exist for a tier that packs can draw from
  EmptyTier(Tier),
  /// Two items share the same name
  DuplicateItem(String),
}

impl fmt::Display for CatalogError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CatalogError::EmptyTier(tier) => write!(f, "catalog has no {} items", tier),
      CatalogError::DuplicateItem(name) => write!(f, "catalog lists {} more than once", name),
    }
  }
}

impl Error for CatalogError {}

/// Catalog is an ordered set of items, with a lookup table per tier
///
/// Serializes as its name and `(item name, tier)` pairs. Deserializing goes
/// through `Catalog::from_items`, so a decoded catalog is validated the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogEntries", into = "CatalogEntries")]
pub struct Catalog {
  pub name: String,
  items: Vec<Item>,
  by_tier: TierTable<Vec<ItemId>>,
}

impl Catalog {
  /// Returns a catalog from `(name, tier)` pairs, in the given order
  pub fn from_items<S: Into<String>>(
    name: S,
    entries: Vec<(String, Tier)>,
  ) -> Result<Self, CatalogError> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut items = Vec::with_capacity(entries.len());
    let mut by_tier: TierTable<Vec<ItemId>> = TierTable::default();
    for (i, (item_name, tier)) in entries.into_iter().enumerate() {
      if !seen.insert(item_name.clone()) {
        return Err(CatalogError::DuplicateItem(item_name));
      }
      let id = ItemId(i as u32);
      by_tier[tier].push(id);
      items.push(Item {
        id,
        name: item_name,
        tier,
      });
    }
    for (tier, ids) in by_tier.iter() {
      if ids.is_empty() {
        return Err(CatalogError::EmptyTier(tier));
      }
    }
    Ok(Self {
      name: name.into(),
      items,
      by_tier,
    })
  }

  /// Returns a catalog with `counts[tier]` generated items per tier
  ///
  /// Items are named `<prefix>_<tier>_<NNN>` with a 1-based index, so
  /// `from_counts("ie", ...)` yields `ie_common_001`, `ie_common_002`, ...
  pub fn from_counts(prefix: &str, counts: TierTable<usize>) -> Result<Self, CatalogError> {
    let total = counts.iter().map(|(_, n)| *n).sum::<usize>();
    let mut entries = Vec::with_capacity(total);
    for (tier, count) in counts.iter() {
      for i in 0..*count {
        entries.push((format!("{}_{}_{:03}", prefix, tier, i + 1), tier));
      }
    }
    Self::from_items(prefix, entries)
  }

  /// Returns the ids of every item of `tier`, in catalog order
  pub fn items_of_tier(&self, tier: Tier) -> &[ItemId] {
    &self.by_tier[tier]
  }

  /// Returns the number of items of each tier
  pub fn tier_counts(&self) -> TierTable<usize> {
    self.by_tier.map(|_, ids| ids.len())
  }

  pub fn item(&self, id: ItemId) -> &Item {
    &self.items[id.index()]
  }

  pub fn tier_of(&self, id: ItemId) -> Tier {
    self.item(id).tier
  }

  /// Returns an item from its name
  pub fn item_from_name(&self, name: &str) -> Option<&Item> {
    self.items.iter().find(|item| item.name == name)
  }
}

/// Wire form of a `Catalog`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntries {
  name: String,
  items: Vec<(String, Tier)>,
}

impl From<Catalog> for CatalogEntries {
  fn from(catalog: Catalog) -> Self {
    Self {
      name: catalog.name,
      items: catalog
        .items
        .into_iter()
        .map(|item| (item.name, item.tier))
        .collect(),
    }
  }
}

impl TryFrom<CatalogEntries> for Catalog {
  type Error = CatalogError;

  fn try_from(entries: CatalogEntries) -> Result<Self, Self::Error> {
    Catalog::from_items(entries.name, entries.items)
  }
}

impl Deref for Catalog {
  type Target = [Item];

  fn deref(&self) -> &Self::Target {
    &self.items
  }
}
