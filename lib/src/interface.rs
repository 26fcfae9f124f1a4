//! # JSON and web interface
//!
//! Defines the JSON input and output of a whole experiment, shared by the
//! command line driver and the wasm build.
use crate::catalog::{Catalog, CatalogError};
use crate::economy::{CopyTargets, Economy};
use crate::pack::PackRules;
use crate::purchase::PurchaseRate;
use crate::simulation::{Experiment, SimulationConfig, SimulationError, Summary, DEFAULT_MAX_PACKS};
use crate::tier::TierTable;
use std::fmt;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Error {
  BadInput(String),
  UnknownPreset(String),
  /// Neither a preset nor explicit counts were given
  MissingCatalog,
  BadCatalog(CatalogError),
  Simulation(SimulationError),
}

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Error::BadInput(e) => write!(f, "bad input: {}", e),
      Error::UnknownPreset(name) => write!(f, "unknown preset {}", name),
      Error::MissingCatalog => write!(f, "input needs a preset or per-tier counts"),
      Error::BadCatalog(e) => write!(f, "bad catalog: {}", e),
      Error::Simulation(e) => write!(f, "{}", e),
    }
  }
}

impl std::error::Error for Error {}

impl From<CatalogError> for Error {
  fn from(error: CatalogError) -> Self {
    Self::BadCatalog(error)
  }
}

impl From<SimulationError> for Error {
  fn from(error: SimulationError) -> Self {
    Self::Simulation(error)
  }
}

impl From<serde_json::Error> for Error {
  fn from(error: serde_json::Error) -> Self {
    Self::BadInput(error.to_string())
  }
}

fn default_runs() -> usize {
  1000
}

fn default_max_packs() -> usize {
  DEFAULT_MAX_PACKS
}

/// Input describes one experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Input {
  /// Name of a built-in catalog, see `Catalog::preset_names`
  #[serde(default)]
  pub preset: Option<String>,
  /// Items per tier for a generated catalog; exclusive with `preset`
  #[serde(default)]
  pub counts: Option<TierTable<usize>>,
  /// The number of runs to perform
  #[serde(default = "default_runs")]
  pub runs: usize,
  /// Seed for the experiment; a random seed is chosen when absent
  #[serde(default)]
  pub seed: Option<u64>,
  #[serde(default = "default_max_packs")]
  pub max_packs: usize,
  /// Stop at a single copy of each epic instead of three
  #[serde(default)]
  pub epic_once: bool,
  #[serde(default)]
  pub economy: Option<Economy>,
  #[serde(default)]
  pub purchase: Option<PurchaseRate>,
}

impl Input {
  /// Returns an input for `preset` with every other field at its default
  pub fn for_preset(preset: &str) -> Self {
    Self {
      preset: Some(preset.to_string()),
      counts: None,
      runs: default_runs(),
      seed: None,
      max_packs: default_max_packs(),
      epic_once: false,
      economy: None,
      purchase: None,
    }
  }
}

/// Output of one experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Output {
  pub catalog: String,
  pub catalog_size: usize,
  pub tier_counts: TierTable<usize>,
  pub seed: u64,
  pub targets: CopyTargets,
  pub summary: Summary,
  pub mean_guarantees: f64,
  pub purchase: PurchaseRate,
  /// Whole purchase units needed for the mean pack count
  pub mean_units: usize,
  /// Price of the mean pack count at the purchase rate
  pub mean_price: f64,
  /// Price of the largest pack count at the purchase rate
  pub max_price: f64,
}

/// Runs an experiment for a JSON encoded `Input` and returns a JSON encoded `Output`
///
/// # Example
///
///  ```js
///  const output = require('@packsim/packsim').packsim_run({preset: "legends_rise", runs: 500});
///  console.log(output.summary.mean);
///  ```
#[wasm_bindgen]
pub fn packsim_run(input: &JsValue) -> JsValue {
  let input: Input = match input.into_serde() {
    Err(e) => {
      return JsValue::from_str(&format!("Error deserializing simulation inputs: {:#?}", e));
    }
    Ok(v) => v,
  };
  let result = match run(&input) {
    Err(e) => {
      return JsValue::from_str(&format!("Error running simulation for input: {}", e));
    }
    Ok(v) => v,
  };
  JsValue::from_serde(&result)
    .unwrap_or_else(|e| JsValue::from_str(&format!("Error serializing output: {}", e)))
}

/// Same as `run`, over JSON strings
pub fn run_json(input: &str) -> Result<String, Error> {
  let input: Input = serde_json::from_str(input)?;
  let output = run(&input)?;
  Ok(serde_json::to_string(&output)?)
}

pub fn run(input: &Input) -> Result<Output, Error> {
  let generated;
  let catalog = match (&input.preset, &input.counts) {
    (Some(_), Some(_)) => {
      return Err(Error::BadInput(
        "give either a preset or per-tier counts, not both".to_string(),
      ))
    }
    (Some(name), None) => {
      Catalog::preset(name).ok_or_else(|| Error::UnknownPreset(name.clone()))?
    }
    (None, Some(counts)) => {
      generated = Catalog::from_counts("custom", *counts)?;
      &generated
    }
    (None, None) => return Err(Error::MissingCatalog),
  };
  let economy = input.economy.unwrap_or_default();
  let purchase = input.purchase.unwrap_or_default();
  let targets = if input.epic_once {
    CopyTargets::epic_once()
  } else {
    CopyTargets::default()
  };
  let seed = input.seed.unwrap_or_else(rand::random);
  let config = SimulationConfig {
    run_count: input.runs,
    max_packs: input.max_packs,
    seed,
    targets,
  };
  let experiment = Experiment::from_config(catalog, &economy, &PackRules::new(), &config)?;
  let summary = experiment.summary();
  Ok(Output {
    catalog: catalog.name.clone(),
    catalog_size: catalog.len(),
    tier_counts: catalog.tier_counts(),
    seed,
    targets,
    summary,
    mean_guarantees: experiment.mean_guarantees(),
    purchase,
    mean_units: purchase.units_for(summary.mean.ceil() as usize),
    mean_price: purchase.price_for(summary.mean),
    max_price: purchase.price_for(summary.max as f64),
  })
}
