//! # Purchase rate
//!
//! Converts pack counts into purchases. This is presentation only: runs never
//! consult it.

/// PurchaseRate is a fixed bundle of packs sold at a fixed price
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRate {
  pub packs_per_unit: usize,
  pub price_per_unit: f64,
}

impl PurchaseRate {
  /// 50 packs for 80.00
  pub fn new() -> Self {
    Self {
      packs_per_unit: 50,
      price_per_unit: 80.0,
    }
  }

  /// Whole bundles needed to obtain `packs` packs
  pub fn units_for(&self, packs: usize) -> usize {
    if self.packs_per_unit == 0 {
      return 0;
    }
    packs / self.packs_per_unit + (packs % self.packs_per_unit != 0) as usize
  }

  /// Price of `packs` packs at the bundle rate, allowing fractional bundles
  pub fn price_for(&self, packs: f64) -> f64 {
    if self.packs_per_unit == 0 {
      return 0.0;
    }
    packs / self.packs_per_unit as f64 * self.price_per_unit
  }
}

impl Default for PurchaseRate {
  fn default() -> Self {
    Self::new()
  }
}
