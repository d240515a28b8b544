//! Break rule model.
//!
//! Break rules are reference data mapping a shift's local start time to a
//! break-minutes outcome. Windows are half-open `[start_time, end_time)`
//! and may wrap past midnight (a night-shift rule such as 20:00–06:00).

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A break rule matched against a shift's local start time.
///
/// Multiple rules may match the same start time; the resolver picks the
/// enabled rule with the highest `priority`. Rules are never overlap-checked
/// by the engine.
///
/// # Example
///
/// ```
/// use payroll_engine::models::BreakRule;
/// use chrono::NaiveTime;
///
/// let rule = BreakRule {
///     id: "day_break".to_string(),
///     start_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
///     break_minutes: 30,
///     is_paid_break: false,
///     priority: 10,
///     is_enabled: true,
/// };
///
/// assert!(rule.matches(NaiveTime::from_hms_opt(9, 0, 0).unwrap()));
/// assert!(!rule.matches(NaiveTime::from_hms_opt(14, 0, 0).unwrap())); // half-open
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRule {
    /// Unique identifier for the rule.
    pub id: String,
    /// Start of the local-time window (inclusive).
    pub start_time: NaiveTime,
    /// End of the local-time window (exclusive). May be earlier than
    /// `start_time`, in which case the window wraps past midnight.
    pub end_time: NaiveTime,
    /// Break minutes granted by this rule.
    pub break_minutes: i64,
    /// Whether the rule considers the break paid. Advisory only: the
    /// contract's `breaks_paid` flag decides the actual deduction.
    pub is_paid_break: bool,
    /// Tie-break between overlapping rules; highest wins.
    pub priority: i32,
    /// Disabled rules are ignored by the resolver.
    pub is_enabled: bool,
}

impl BreakRule {
    /// Returns true if the window contains the given local time.
    ///
    /// The window is half-open and wrap-around aware. A window whose start
    /// and end coincide is empty and matches nothing.
    pub fn matches(&self, time: NaiveTime) -> bool {
        if self.start_time < self.end_time {
            time >= self.start_time && time < self.end_time
        } else if self.start_time > self.end_time {
            // Wraps past midnight, e.g. 20:00-06:00
            time >= self.start_time || time < self.end_time
        } else {
            false
        }
    }
}
