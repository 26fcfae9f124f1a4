use std::fmt;

/// GuaranteeCounter counts consecutive packs opened without an epic item
///
/// The counter is owned by a single run. It advances by one after every
/// epic-free pack and returns to zero after any pack holding an epic.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GuaranteeCounter(u32);

impl GuaranteeCounter {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns a counter that has already seen `packs` epic-free packs
  pub fn from_value(packs: u32) -> Self {
    Self(packs)
  }

  pub fn value(self) -> u32 {
    self.0
  }

  /// True once `threshold` epic-free packs have been opened in a row
  pub fn is_due(self, threshold: u32) -> bool {
    self.0 >= threshold
  }

  /// Returns the counter after a pack with or without an epic
  pub fn advance(self, pack_had_epic: bool) -> Self {
    if pack_had_epic {
      Self(0)
    } else {
      Self(self.0 + 1)
    }
  }
}

impl fmt::Display for GuaranteeCounter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
