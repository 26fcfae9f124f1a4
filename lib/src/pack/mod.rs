//! # Pack opening
//!
//! The `pack` module defines the `PackOpener` trait and the standard
//! eight-slot pack with a guaranteed epic every ten epic-free packs.

mod guarantee;
mod opener;
mod rules;
mod thresholds;

pub use guarantee::GuaranteeCounter;
pub use opener::{Pack, PackOpener, Pull};
pub use rules::{PackRules, SlotRule, GUARANTEE_AFTER, SLOTS_PER_PACK};
pub use thresholds::{ThresholdError, ThresholdSteps, TierThresholds};
