//! # Card Pack Collection Simulation Library
//!
//! packsim estimates how many randomized card packs a collector opens before their
//! collection is complete. A collection counts as complete once the credits from
//! converting surplus copies cover the cost of creating every copy still missing.
//! Each run is simulated pack by pack, including the guaranteed epic that follows
//! ten epic-free packs.

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate rand;
#[cfg(feature = "parallel")]
extern crate rayon;
extern crate wasm_bindgen;

pub mod catalog;
pub mod economy;
pub mod interface;
pub mod ledger;
pub mod pack;
pub mod presets;
pub mod purchase;
pub mod simulation;
pub mod tier;

pub use crate::catalog::{Catalog, CatalogError, ItemId};
pub use crate::economy::{CopyTargets, Economy};
pub use crate::interface::{packsim_run, run_json};
pub use crate::pack::{PackOpener, PackRules};
pub use crate::simulation::{simulate_run, Experiment, SimulationConfig, SimulationError};
pub use crate::tier::{Tier, TierTable};
