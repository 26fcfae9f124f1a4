use crate::catalog::{Catalog, CatalogError};
use crate::tier::TierTable;

/// Names and per-tier item counts of the built-in card sets
pub const PRESET_COUNTS: [(&str, &str, TierTable<usize>); 3] = [
  (
    "heirs_of_the_omen",
    "ho",
    TierTable {
      common: 23,
      uncommon: 22,
      rare: 16,
      epic: 16,
    },
  ),
  (
    "infinity_evolved",
    "ie",
    TierTable {
      common: 23,
      uncommon: 22,
      rare: 16,
      epic: 16,
    },
  ),
  (
    "legends_rise",
    "lr",
    TierTable {
      common: 45,
      uncommon: 37,
      rare: 37,
      epic: 23,
    },
  ),
];

fn preset_catalog(name: &str, prefix: &str, counts: TierTable<usize>) -> Result<Catalog, CatalogError> {
  let mut catalog = Catalog::from_counts(prefix, counts)?;
  catalog.name = name.to_string();
  Ok(catalog)
}

lazy_static! {
  pub static ref PRESETS: Vec<Catalog> = PRESET_COUNTS
    .iter()
    .map(|(name, prefix, counts)| preset_catalog(name, prefix, *counts))
    .collect::<Result<Vec<_>, _>>()
    .expect("preset catalogs have items in every tier");
}

impl Catalog {
  /// Returns a built-in catalog by name
  pub fn preset(name: &str) -> Option<&'static Catalog> {
    PRESETS.iter().find(|c| c.name == name)
  }

  /// Returns the names of all built-in catalogs
  pub fn preset_names() -> Vec<&'static str> {
    PRESET_COUNTS.iter().map(|(name, _, _)| *name).collect()
  }
}

#[cfg(test)]
mod tests {
  use crate::catalog::Catalog;
  use crate::tier::{Tier, TierTable};

  #[test]
  fn presets_are_available_by_name() {
    assert_eq!(Catalog::preset_names().len(), 3);
    for name in Catalog::preset_names() {
      let catalog = Catalog::preset(name).unwrap();
      assert_eq!(catalog.name, name);
    }
    assert!(Catalog::preset("no_such_set").is_none());
  }

  #[test]
  fn legends_rise_counts() {
    let catalog = Catalog::preset("legends_rise").unwrap();
    assert_eq!(catalog.len(), 142);
    assert_eq!(catalog.tier_counts(), TierTable::new(45, 37, 37, 23));
    let last_epic = *catalog.items_of_tier(Tier::Epic).last().unwrap();
    assert_eq!(catalog.item(last_epic).name, "lr_epic_023");
  }
}
