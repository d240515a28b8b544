//! Per-shift reconciliation result.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The classified minutes of one reconciled shift.
///
/// Conservation invariant: `ot_minutes + bank_holiday_minutes +
/// weekend_minutes + base_minutes == paid_minutes`, with at most one of the
/// three non-overtime buckets non-zero under the exclusive policy.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ShiftBreakdown;
/// use chrono::NaiveDate;
///
/// let breakdown = ShiftBreakdown {
///     shift_id: "shift_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     day: NaiveDate::from_ymd_opt(2024, 6, 7).unwrap(),
///     week_start: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     worked_minutes: 630,
///     paid_minutes: 630,
///     unpaid_break_minutes: 0,
///     ot_minutes: 300,
///     bank_holiday_minutes: 0,
///     weekend_minutes: 0,
///     base_minutes: 330,
///     training_minutes: 0,
///     is_callout: false,
///     is_autoclosed: false,
/// };
/// assert_eq!(
///     breakdown.ot_minutes + breakdown.bank_holiday_minutes
///         + breakdown.weekend_minutes + breakdown.base_minutes,
///     breakdown.paid_minutes,
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftBreakdown {
    /// The shift this breakdown belongs to.
    pub shift_id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The local calendar day the shift anchors to (clock-in's day).
    pub day: NaiveDate,
    /// The start date of the payroll week the shift anchors to.
    pub week_start: NaiveDate,
    /// Total minutes between clock-in and clock-out.
    pub worked_minutes: i64,
    /// Worked minutes less unpaid break minutes (never negative).
    pub paid_minutes: i64,
    /// Break minutes deducted from paid time.
    pub unpaid_break_minutes: i64,
    /// Minutes allocated to weekly overtime.
    pub ot_minutes: i64,
    /// Non-overtime minutes classified as bank-holiday work.
    pub bank_holiday_minutes: i64,
    /// Non-overtime minutes classified as weekend work.
    pub weekend_minutes: i64,
    /// Non-overtime minutes at the base category.
    pub base_minutes: i64,
    /// Training minutes tracked separately from pay.
    pub training_minutes: i64,
    /// Carried from the shift for review workflows; does not affect
    /// classification.
    pub is_callout: bool,
    /// Carried from the shift for review workflows.
    pub is_autoclosed: bool,
}

impl ShiftBreakdown {
    /// Returns the non-overtime paid minutes of the shift.
    pub fn non_overtime_minutes(&self) -> i64 {
        self.paid_minutes - self.ot_minutes
    }
}
