//! Fleet trajectory planning for stratospheric balloons drifting on
//! altitude-dependent winds.
//!
//! The workspace crates are re-exported here so front-ends (CLI, tests) depend on
//! a single library.

pub use strato_config as config;
pub use strato_core as model;
pub use strato_coverage as coverage;
pub use strato_export as export;
pub use strato_importer as importer;
pub use strato_planner as planner;
pub use strato_sim as sim;
pub use strato_wind as wind;

pub mod run;

/// Returns the version of the library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
