//! Calculation logic for the Shift Reconciliation Engine.
//!
//! This module contains the reconciliation pipeline and its parts: break
//! rule resolution, contract resolution with the atomic write path,
//! enhancement classification under the non-stacking policy, weekly
//! overtime allocation, and period aggregation.

mod aggregation;
mod break_resolution;
mod classification;
mod contract_resolution;
mod pipeline;
mod weekly_overtime;

pub use aggregation::{AggregateReport, PeriodTotals, UNASSIGNED_DEPARTMENT, aggregate};
pub use break_resolution::{BreakOutcome, resolve_break, unpaid_break_minutes};
pub use classification::{
    ClassificationPolicy, ClassifiedMinutes, DayFacts, ExclusivePolicy, policy_for,
};
pub use contract_resolution::{ContractBook, ContractInsertOutcome};
pub use pipeline::{ReconciliationInput, ReconciliationOutput, reconcile};
pub use weekly_overtime::{ShiftComputation, allocate_weekly_overtime};
