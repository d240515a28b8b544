//! Domain models for the Shift Reconciliation Engine.

mod audit;
mod break_rule;
mod calendar;
mod contract;
mod result;
mod shift;

pub use audit::{AuditEntry, AuditLog, ShiftEdit, apply_shift_edit};
pub use break_rule::BreakRule;
pub use calendar::{BankHolidayCalendar, PayrollWeekWindow};
pub use contract::{PayContract, Uplift, UpliftCategory};
pub use result::ShiftBreakdown;
pub use shift::{CloseReason, Shift};
