//! Period aggregation of reconciled shifts.
//!
//! A pure reduction: classified per-shift minutes summed by employee-day,
//! employee-week, employee-month, and department. No side effects; safe to
//! re-run for idempotent reporting. All maps are ordered so repeated runs
//! serialize byte-identically.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::ShiftBreakdown;

/// The department bucket for employees with no current assignment.
pub const UNASSIGNED_DEPARTMENT: &str = "unassigned";

/// Summed minutes for one aggregation bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Number of shifts in the bucket.
    pub shift_count: u64,
    /// Total paid minutes.
    pub paid_minutes: i64,
    /// Total break minutes deducted from paid time.
    pub unpaid_break_minutes: i64,
    /// Total overtime minutes.
    pub ot_minutes: i64,
    /// Total bank-holiday minutes.
    pub bank_holiday_minutes: i64,
    /// Total weekend minutes.
    pub weekend_minutes: i64,
    /// Total base-category minutes.
    pub base_minutes: i64,
    /// Total training minutes (tracked separately from pay).
    pub training_minutes: i64,
}

impl PeriodTotals {
    fn absorb(&mut self, breakdown: &ShiftBreakdown) {
        self.shift_count += 1;
        self.paid_minutes += breakdown.paid_minutes;
        self.unpaid_break_minutes += breakdown.unpaid_break_minutes;
        self.ot_minutes += breakdown.ot_minutes;
        self.bank_holiday_minutes += breakdown.bank_holiday_minutes;
        self.weekend_minutes += breakdown.weekend_minutes;
        self.base_minutes += breakdown.base_minutes;
        self.training_minutes += breakdown.training_minutes;
    }
}

/// Aggregate totals keyed by period and by department.
///
/// Day and week maps are keyed per employee by the anchored local date and
/// payroll week-start date; months use `"YYYY-MM"` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Totals per employee per anchored calendar day.
    pub by_employee_day: BTreeMap<String, BTreeMap<chrono::NaiveDate, PeriodTotals>>,
    /// Totals per employee per payroll week (keyed by week-start date).
    pub by_employee_week: BTreeMap<String, BTreeMap<chrono::NaiveDate, PeriodTotals>>,
    /// Totals per employee per calendar month (`"YYYY-MM"`).
    pub by_employee_month: BTreeMap<String, BTreeMap<String, PeriodTotals>>,
    /// Totals per department, resolved from the employee's current
    /// assignment at aggregation time (not historically).
    pub by_department: BTreeMap<String, PeriodTotals>,
}

/// Reduces reconciled shifts into day/week/month/department totals.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::aggregate;
/// use payroll_engine::models::ShiftBreakdown;
/// use chrono::NaiveDate;
/// use std::collections::HashMap;
///
/// let breakdown = ShiftBreakdown {
///     shift_id: "shift_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     day: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     week_start: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
///     worked_minutes: 480,
///     paid_minutes: 480,
///     unpaid_break_minutes: 0,
///     ot_minutes: 0,
///     bank_holiday_minutes: 0,
///     weekend_minutes: 0,
///     base_minutes: 480,
///     training_minutes: 0,
///     is_callout: false,
///     is_autoclosed: false,
/// };
///
/// let mut departments = HashMap::new();
/// departments.insert("emp_001".to_string(), "care".to_string());
///
/// let report = aggregate(&[breakdown], &departments);
/// assert_eq!(report.by_department["care"].paid_minutes, 480);
/// assert_eq!(report.by_employee_month["emp_001"]["2024-06"].base_minutes, 480);
/// ```
pub fn aggregate(
    shifts: &[ShiftBreakdown],
    departments: &HashMap<String, String>,
) -> AggregateReport {
    let mut report = AggregateReport::default();

    for breakdown in shifts {
        let employee = breakdown.employee_id.clone();
        let month_key = format!("{:04}-{:02}", breakdown.day.year(), breakdown.day.month());

        report
            .by_employee_day
            .entry(employee.clone())
            .or_default()
            .entry(breakdown.day)
            .or_default()
            .absorb(breakdown);

        report
            .by_employee_week
            .entry(employee.clone())
            .or_default()
            .entry(breakdown.week_start)
            .or_default()
            .absorb(breakdown);

        report
            .by_employee_month
            .entry(employee.clone())
            .or_default()
            .entry(month_key)
            .or_default()
            .absorb(breakdown);

        let department = departments
            .get(&breakdown.employee_id)
            .map(String::as_str)
            .unwrap_or(UNASSIGNED_DEPARTMENT);
        report
            .by_department
            .entry(department.to_string())
            .or_default()
            .absorb(breakdown);
    }

    report
}
