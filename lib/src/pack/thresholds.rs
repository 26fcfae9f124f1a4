use crate::tier::Tier;
use std::convert::TryFrom;
use std::fmt;

/// Public pull rates round the common tier up from 67.44% to 67.5%; the
/// remaining 0.06% of the distribution is undisclosed and folded into common.
pub const UNDISCLOSED_RATE: f64 = 0.0006;

/// TierThresholds selects a tier from a uniform roll in `[0, 1)`
///
/// `steps` are cumulative upper bounds sorted in ascending order. A roll picks
/// the first step whose bound it does not exceed, and `rest` when it exceeds
/// them all. Bounds are inclusive: a roll of exactly `0.675` against the
/// standard table is common, not uncommon.
///
/// Decoding goes through `TierThresholds::new`, so a table read from JSON is
/// validated the same way as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ThresholdSteps", into = "ThresholdSteps")]
pub struct TierThresholds {
  steps: Vec<(f64, Tier)>,
  rest: Tier,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdError {
  /// A bound is not a number in `[0, 1]`
  OutOfRange(f64),
  /// A bound is smaller than the one before it
  Unsorted(f64, f64),
}

impl fmt::Display for ThresholdError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ThresholdError::OutOfRange(bound) => write!(f, "threshold {} is outside [0, 1]", bound),
      ThresholdError::Unsorted(a, b) => write!(f, "threshold {} follows the larger {}", b, a),
    }
  }
}

impl std::error::Error for ThresholdError {}

/// Wire form of `TierThresholds`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSteps {
  steps: Vec<(f64, Tier)>,
  rest: Tier,
}

impl From<TierThresholds> for ThresholdSteps {
  fn from(t: TierThresholds) -> Self {
    Self {
      steps: t.steps,
      rest: t.rest,
    }
  }
}

impl TryFrom<ThresholdSteps> for TierThresholds {
  type Error = ThresholdError;

  fn try_from(wire: ThresholdSteps) -> Result<Self, Self::Error> {
    Self::new(wire.steps, wire.rest)
  }
}

impl TierThresholds {
  /// Returns a table over `steps`, which must be ascending bounds in `[0, 1]`
  pub fn new(steps: Vec<(f64, Tier)>, rest: Tier) -> Result<Self, ThresholdError> {
    if let Some((bound, _)) = steps.iter().find(|(bound, _)| !(0.0..=1.0).contains(bound)) {
      return Err(ThresholdError::OutOfRange(*bound));
    }
    if let Some(w) = steps.windows(2).find(|w| w[0].0 > w[1].0) {
      return Err(ThresholdError::Unsorted(w[0].0, w[1].0));
    }
    Ok(Self { steps, rest })
  }

  pub fn steps(&self) -> &[(f64, Tier)] {
    &self.steps
  }

  pub fn rest(&self) -> Tier {
    self.rest
  }

  /// Distribution for the first seven slots of a pack:
  /// 67.5% common, 25% uncommon, 6% rare, 1.5% epic
  pub fn leading_slots() -> Self {
    Self {
      steps: vec![
        (0.675, Tier::Common),
        (0.925, Tier::Uncommon),
        (0.985, Tier::Rare),
      ],
      rest: Tier::Epic,
    }
  }

  /// Distribution for the last slot of a pack, which is never common:
  /// 92.5% uncommon, 6% rare, 1.5% epic
  pub fn last_slot() -> Self {
    Self {
      steps: vec![(0.925, Tier::Uncommon), (0.985, Tier::Rare)],
      rest: Tier::Epic,
    }
  }

  pub fn select(&self, roll: f64) -> Tier {
    self
      .steps
      .iter()
      .find(|(bound, _)| roll <= *bound)
      .map(|(_, tier)| *tier)
      .unwrap_or(self.rest)
  }

  /// Returns the probability of drawing `tier` from a uniform roll
  pub fn probability(&self, tier: Tier) -> f64 {
    let mut lower = 0.0;
    let mut p = 0.0;
    for (bound, step_tier) in &self.steps {
      if *step_tier == tier {
        p += bound - lower;
      }
      lower = *bound;
    }
    if self.rest == tier {
      p += 1.0 - lower;
    }
    p
  }
}
