//! # Simulation engine and experiment summaries
//!
//! A run opens packs into an empty ledger until the surplus value of the
//! collection covers the cost of the copies still missing. An experiment
//! repeats independent runs and summarizes how many packs each one needed.
use crate::catalog::Catalog;
use crate::economy::{CopyTargets, Economy};
use crate::ledger::Ledger;
use crate::pack::{GuaranteeCounter, PackOpener};
use crate::tier::Tier;
use rand::prelude::*;
use rand::rngs::SmallRng;
use std::error::Error;
use std::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default ceiling on packs per run before giving up on convergence
pub const DEFAULT_MAX_PACKS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationError {
  /// A run opened `packs_opened` packs without completing its collection
  NonConvergence { packs_opened: usize },
  /// An experiment was configured with zero runs
  NoRuns,
}

impl fmt::Display for SimulationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SimulationError::NonConvergence { packs_opened } => write!(
        f,
        "collection did not complete within {} packs",
        packs_opened
      ),
      SimulationError::NoRuns => write!(f, "experiment needs at least one run"),
    }
  }
}

impl Error for SimulationError {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
  /// The number of independent runs to perform
  pub run_count: usize,
  /// Packs a single run may open before it is reported as non-converging
  pub max_packs: usize,
  /// Base seed; run `i` is seeded from `run_seed(seed, i)`
  pub seed: u64,
  /// Copies per item, per tier, that count as complete
  pub targets: CopyTargets,
}

impl Default for SimulationConfig {
  fn default() -> Self {
    Self {
      run_count: 1000,
      max_packs: DEFAULT_MAX_PACKS,
      seed: 0,
      targets: CopyTargets::default(),
    }
  }
}

/// RunOutcome describes a single completed run
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
  pub packs_opened: usize,
  /// Surplus conversion value when the run completed
  pub surplus_value: u64,
  /// Remaining completion cost when the run completed
  pub completion_cost: u64,
  /// Packs whose first slot was forced to an epic
  pub guarantees_fired: usize,
  pub epics_drawn: usize,
}

/// Run is the state of one collector, from an empty ledger to completion
pub struct Run<'a, P: PackOpener> {
  catalog: &'a Catalog,
  economy: &'a Economy,
  opener: &'a P,
  targets: &'a CopyTargets,
  ledger: Ledger,
  counter: GuaranteeCounter,
  outcome: RunOutcome,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunState {
  Running,
  Done,
}

impl<'a, P: PackOpener> Run<'a, P> {
  pub fn new(
    catalog: &'a Catalog,
    economy: &'a Economy,
    opener: &'a P,
    targets: &'a CopyTargets,
  ) -> Self {
    Self {
      catalog,
      economy,
      opener,
      targets,
      ledger: Ledger::with_capacity(catalog.len()),
      counter: GuaranteeCounter::new(),
      outcome: RunOutcome::default(),
    }
  }

  /// Opens one pack, records it and re-evaluates the stopping condition
  pub fn step(&mut self, rng: &mut impl Rng) -> RunState {
    let pack = self.opener.open_pack(rng, self.catalog, self.counter);
    self.ledger.record_pack(&pack);
    self.counter = pack.counter;
    self.outcome.packs_opened += 1;
    if pack.guarantee_fired {
      self.outcome.guarantees_fired += 1;
    }
    self.outcome.epics_drawn += pack.count_tier(Tier::Epic);
    self.outcome.surplus_value = self.economy.surplus_value(&self.ledger, self.catalog);
    self.outcome.completion_cost =
      self
        .economy
        .completion_cost(&self.ledger, self.catalog, self.targets);
    if self.outcome.surplus_value >= self.outcome.completion_cost {
      RunState::Done
    } else {
      RunState::Running
    }
  }

  /// Steps until the collection is complete, or fails once `max_packs` packs
  /// have been opened without completing it
  pub fn run_to_completion(
    mut self,
    rng: &mut impl Rng,
    max_packs: usize,
  ) -> Result<RunOutcome, SimulationError> {
    while self.outcome.packs_opened < max_packs {
      if self.step(rng) == RunState::Done {
        trace!(
          "{}: complete after {} packs",
          self.catalog.name,
          self.outcome.packs_opened
        );
        return Ok(self.outcome);
      }
    }
    warn!(
      "{}: run still incomplete after {} packs (surplus {}, cost {})",
      self.catalog.name,
      self.outcome.packs_opened,
      self.outcome.surplus_value,
      self.outcome.completion_cost
    );
    Err(SimulationError::NonConvergence {
      packs_opened: self.outcome.packs_opened,
    })
  }

  pub fn ledger(&self) -> &Ledger {
    &self.ledger
  }

  pub fn counter(&self) -> GuaranteeCounter {
    self.counter
  }

  pub fn outcome(&self) -> RunOutcome {
    self.outcome
  }
}

/// Returns the number of packs one collector opens to complete `catalog`
pub fn simulate_run<P: PackOpener>(
  rng: &mut impl Rng,
  catalog: &Catalog,
  economy: &Economy,
  opener: &P,
  targets: &CopyTargets,
  max_packs: usize,
) -> Result<RunOutcome, SimulationError> {
  Run::new(catalog, economy, opener, targets).run_to_completion(rng, max_packs)
}

/// Returns the seed for run `index` of an experiment seeded with `seed`
///
/// Uses the SplitMix64 finalizer so neighbouring indices get unrelated streams.
pub fn run_seed(seed: u64, index: u64) -> u64 {
  let mut z = seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
  z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
  z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
  z ^ (z >> 31)
}

/// Summary of the pack counts of an experiment
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
  pub runs: usize,
  pub mean: f64,
  pub min: usize,
  pub max: usize,
}

/// Experiment holds the outcome of every run, in run order
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Experiment {
  pub outcomes: Vec<RunOutcome>,
}

impl Experiment {
  pub fn from_config<P: PackOpener + Sync>(
    catalog: &Catalog,
    economy: &Economy,
    opener: &P,
    config: &SimulationConfig,
  ) -> Result<Self, SimulationError> {
    if config.run_count == 0 {
      return Err(SimulationError::NoRuns);
    }
    debug!(
      "{}: starting {} runs with seed {}",
      catalog.name, config.run_count, config.seed
    );
    let run = |i: usize| {
      let mut rng = SmallRng::seed_from_u64(run_seed(config.seed, i as u64));
      simulate_run(
        &mut rng,
        catalog,
        economy,
        opener,
        &config.targets,
        config.max_packs,
      )
    };
    #[cfg(feature = "parallel")]
    let outcomes = (0..config.run_count)
      .into_par_iter()
      .map(run)
      .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let outcomes = (0..config.run_count)
      .map(run)
      .collect::<Result<Vec<_>, _>>()?;
    let experiment = Self { outcomes };
    debug!("{}: {:?}", catalog.name, experiment.summary());
    Ok(experiment)
  }

  pub fn pack_counts(&self) -> Vec<usize> {
    self.outcomes.iter().map(|o| o.packs_opened).collect()
  }

  pub fn summary(&self) -> Summary {
    let runs = self.outcomes.len();
    if runs == 0 {
      return Summary::default();
    }
    let total = self.outcomes.iter().map(|o| o.packs_opened).sum::<usize>();
    Summary {
      runs,
      mean: total as f64 / runs as f64,
      min: self.outcomes.iter().map(|o| o.packs_opened).min().unwrap_or(0),
      max: self.outcomes.iter().map(|o| o.packs_opened).max().unwrap_or(0),
    }
  }

  /// Mean number of guaranteed epics per run
  pub fn mean_guarantees(&self) -> f64 {
    if self.outcomes.is_empty() {
      return 0.0;
    }
    let total = self.outcomes.iter().map(|o| o.guarantees_fired).sum::<usize>();
    total as f64 / self.outcomes.len() as f64
  }
}

#[cfg(test)]
mod tests {
  use crate::catalog::Catalog;
  use crate::economy::{CopyTargets, Economy};
  use crate::pack::{GuaranteeCounter, Pack, PackOpener, PackRules, Pull};
  use crate::simulation::*;
  use crate::tier::{Tier, TierTable};
  use rand::prelude::*;
  use rand::rngs::SmallRng;

  fn heirs() -> Catalog {
    Catalog::from_counts("ho", TierTable::new(23, 22, 16, 16)).unwrap()
  }

  /// Opens packs holding only the first common item
  struct OnlyCommons;

  impl PackOpener for OnlyCommons {
    fn open_pack(&self, _rng: &mut impl Rng, catalog: &Catalog, counter: GuaranteeCounter) -> Pack {
      let item = catalog.items_of_tier(Tier::Common)[0];
      Pack {
        pulls: vec![
          Pull {
            item,
            tier: Tier::Common
          };
          8
        ],
        guarantee_fired: false,
        counter: counter.advance(false),
      }
    }
  }

  #[test]
  fn run_terminates_with_fixed_seed() {
    let catalog = heirs();
    let mut rng = SmallRng::seed_from_u64(2024);
    let outcome = simulate_run(
      &mut rng,
      &catalog,
      &Economy::new(),
      &PackRules::new(),
      &CopyTargets::all(3),
      DEFAULT_MAX_PACKS,
    )
    .unwrap();
    assert!(outcome.packs_opened > 0);
    assert!(outcome.packs_opened < DEFAULT_MAX_PACKS);
    assert!(outcome.surplus_value >= outcome.completion_cost);
    // Same seed, same run
    let mut rng = SmallRng::seed_from_u64(2024);
    let again = simulate_run(
      &mut rng,
      &catalog,
      &Economy::new(),
      &PackRules::new(),
      &CopyTargets::all(3),
      DEFAULT_MAX_PACKS,
    )
    .unwrap();
    assert_eq!(outcome, again);
  }

  #[test]
  fn run_stops_at_the_first_complete_pack() {
    let catalog = heirs();
    let economy = Economy::new();
    let rules = PackRules::new();
    let targets = CopyTargets::all(3);
    let mut rng = SmallRng::seed_from_u64(77);
    let mut run = Run::new(&catalog, &economy, &rules, &targets);
    loop {
      let state = run.step(&mut rng);
      let outcome = run.outcome();
      let complete = outcome.surplus_value >= outcome.completion_cost;
      assert_eq!(state == RunState::Done, complete);
      if complete {
        break;
      }
    }
    assert_eq!(run.ledger().total(), run.outcome().packs_opened * 8);
  }

  #[test]
  fn single_item_tiers_complete_after_twelve_items() {
    // With unit values every copy moves surplus minus cost by exactly one,
    // so completion needs 12 items: two packs.
    let catalog = Catalog::from_counts("one", TierTable::splat(1)).unwrap();
    let economy = Economy {
      conversion_value: TierTable::splat(1),
      completion_cost: TierTable::splat(1),
    };
    let rules = PackRules::new();
    let targets = CopyTargets::all(3);
    for seed in 0..200 {
      let mut rng = SmallRng::seed_from_u64(seed);
      let mut run = Run::new(&catalog, &economy, &rules, &targets);
      while run.step(&mut rng) == RunState::Running {}
      assert!(run.ledger().total() >= 12);
      assert_eq!(run.outcome().packs_opened, 2);
    }
  }

  #[test]
  fn non_convergence_is_reported() {
    let catalog = heirs();
    let mut rng = SmallRng::seed_from_u64(1);
    let res = simulate_run(
      &mut rng,
      &catalog,
      &Economy::new(),
      &OnlyCommons,
      &CopyTargets::all(3),
      50,
    );
    assert_eq!(
      res.unwrap_err(),
      SimulationError::NonConvergence { packs_opened: 50 }
    );
  }

  #[test]
  fn tight_ceiling_fails_a_full_run() {
    let catalog = heirs();
    let config = SimulationConfig {
      run_count: 10,
      max_packs: 20,
      seed: 4,
      targets: CopyTargets::all(3),
    };
    let res = Experiment::from_config(&catalog, &Economy::new(), &PackRules::new(), &config);
    assert_eq!(
      res.unwrap_err(),
      SimulationError::NonConvergence { packs_opened: 20 }
    );
  }

  #[test]
  fn zero_runs_is_an_error() {
    let config = SimulationConfig {
      run_count: 0,
      ..SimulationConfig::default()
    };
    let res = Experiment::from_config(&heirs(), &Economy::new(), &PackRules::new(), &config);
    assert_eq!(res.unwrap_err(), SimulationError::NoRuns);
  }

  #[test]
  fn run_seeds_differ_per_index() {
    let seeds: Vec<_> = (0..100).map(|i| run_seed(42, i)).collect();
    let mut deduped = seeds.clone();
    deduped.sort();
    deduped.dedup();
    assert_eq!(deduped.len(), seeds.len());
    assert_ne!(run_seed(1, 0), run_seed(2, 0));
  }

  #[test]
  fn experiment_is_reproducible_from_its_seed() {
    let catalog = heirs();
    let config = SimulationConfig {
      run_count: 50,
      seed: 99,
      ..SimulationConfig::default()
    };
    let a = Experiment::from_config(&catalog, &Economy::new(), &PackRules::new(), &config).unwrap();
    let b = Experiment::from_config(&catalog, &Economy::new(), &PackRules::new(), &config).unwrap();
    assert_eq!(a.pack_counts(), b.pack_counts());
    assert_eq!(a.summary(), b.summary());
  }

  #[test]
  fn summary_reports_mean_min_max() {
    let experiment = Experiment {
      outcomes: [100, 300, 200]
        .iter()
        .map(|p| RunOutcome {
          packs_opened: *p,
          ..RunOutcome::default()
        })
        .collect(),
    };
    let summary = experiment.summary();
    assert_eq!(summary.runs, 3);
    assert_eq!(summary.min, 100);
    assert_eq!(summary.max, 300);
    assert!(f64::abs(summary.mean - 200.0) < 1e-9);
    assert_eq!(Experiment::default().summary(), Summary::default());
  }

  // Reference means: 255.7 packs for a 23/22/16/16 set at three copies of
  // everything, 137.1 packs when a single copy of each epic is enough.
  #[test]
  fn heirs_of_the_omen_mean_matches_baseline() {
    let catalog = heirs();
    let config = SimulationConfig {
      run_count: 1000,
      seed: 20251019,
      ..SimulationConfig::default()
    };
    let experiment =
      Experiment::from_config(&catalog, &Economy::new(), &PackRules::new(), &config).unwrap();
    let summary = experiment.summary();
    let expected = 255.7;
    assert!(f64::abs(expected - summary.mean) < 8.0, "mean {}", summary.mean);
    assert!(summary.min as f64 > 150.0);
    assert!((summary.max as f64) < 400.0);
    assert!(experiment.mean_guarantees() > 0.0);
  }

  #[test]
  fn epic_once_mean_matches_baseline() {
    let catalog = heirs();
    let config = SimulationConfig {
      run_count: 300,
      seed: 7,
      targets: CopyTargets::epic_once(),
      ..SimulationConfig::default()
    };
    let experiment =
      Experiment::from_config(&catalog, &Economy::new(), &PackRules::new(), &config).unwrap();
    let summary = experiment.summary();
    let expected = 137.1;
    assert!(f64::abs(expected - summary.mean) < 8.0, "mean {}", summary.mean);
  }
}
