//! Error types for the Shift Reconciliation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during reconciliation.
//!
//! Data-quality gaps (an unparsable clock time, a missing contract) are
//! deliberately *not* represented here: they are handled by defined
//! defaults in the pipeline (skip the shift, zero overtime eligibility)
//! rather than surfaced as errors.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Shift Reconciliation Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the host application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The configured timezone is not a valid IANA zone name.
    #[error("Unknown IANA timezone: {name}")]
    InvalidTimezone {
        /// The timezone name that failed to resolve.
        name: String,
    },

    /// The configured week-start weekday could not be parsed.
    #[error("Invalid week-start weekday: {value}")]
    InvalidWeekStart {
        /// The raw weekday value from configuration.
        value: String,
    },

    /// The configured stacking mode is recognised but not yet implemented.
    #[error("Unsupported stacking mode: {mode}")]
    UnsupportedStackingMode {
        /// The stacking mode that was requested.
        mode: String,
    },

    /// A new contract would overlap an existing contract for the employee.
    ///
    /// Raised by the write path before any mutation is applied.
    #[error("Contract for employee '{employee_id}' effective {effective_from} overlaps contract '{existing_id}'")]
    ContractOverlap {
        /// The employee the contract belongs to.
        employee_id: String,
        /// The effective-from date of the rejected contract.
        effective_from: NaiveDate,
        /// The id of the existing contract it would overlap.
        existing_id: String,
    },

    /// A contract's date range or uplift values are invalid.
    #[error("Invalid contract '{contract_id}': {message}")]
    InvalidContract {
        /// The id of the invalid contract.
        contract_id: String,
        /// A description of what made the contract invalid.
        message: String,
    },

    /// An admin edit to a shift was rejected before being applied.
    #[error("Invalid edit to shift '{shift_id}': {message}")]
    InvalidShiftEdit {
        /// The id of the shift the edit targeted.
        shift_id: String,
        /// A description of what made the edit invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
