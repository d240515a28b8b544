//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from a directory of YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{BankHolidaysConfig, BreakRulesConfig, EngineConfig, EngineSettings};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── engine.yaml         # week window, default break, stacking mode
/// ├── break_rules.yaml    # break rules reference data
/// └── bank_holidays.yaml  # bank-holiday date set
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("week starts on {}", loader.config().week_window().week_start);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, contains invalid
    /// YAML, or the assembled settings fail validation (unknown timezone,
    /// unknown week-start weekday).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let break_rules = Self::load_yaml::<BreakRulesConfig>(&path.join("break_rules.yaml"))?;
        let bank_holidays =
            Self::load_yaml::<BankHolidaysConfig>(&path.join("bank_holidays.yaml"))?;

        let config = EngineConfig::new(
            settings,
            break_rules.break_rules,
            bank_holidays.bank_holidays,
        )?;

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the assembled engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
