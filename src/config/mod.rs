//! Configuration for the Shift Reconciliation Engine.
//!
//! Configuration is read once from a directory of YAML files and assembled
//! into a single immutable [`EngineConfig`]; nothing in the engine reads
//! settings ad hoc mid-computation.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineSettings, StackingMode};
