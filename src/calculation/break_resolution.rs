//! Break rule resolution.
//!
//! Maps a shift's local start time to a break-minutes outcome by selecting
//! the highest-priority enabled rule whose window contains the start time,
//! falling back to the configured default. Whether the break is actually
//! deducted from paid time is decided separately by the contract's
//! `breaks_paid` flag, which overrides the rule-level paid flag.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{BreakRule, PayContract};

/// The resolved break for one shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakOutcome {
    /// Break minutes granted by the winning rule or the default.
    pub break_minutes: i64,
    /// The winning rule's paid flag; `false` for the default fallback.
    /// Advisory only: deduction is decided by the contract.
    pub is_paid_break_rule: bool,
    /// The id of the winning rule, or `None` when the default applied.
    pub rule_id: Option<String>,
}

/// Resolves the break for a shift starting at the given local time.
///
/// Selects the enabled rule whose half-open window contains `local_start`,
/// breaking ties by highest priority. When no rule matches, the configured
/// default applies with `is_paid_break_rule = false`.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_break;
/// use payroll_engine::models::BreakRule;
/// use chrono::NaiveTime;
///
/// let rules = vec![BreakRule {
///     id: "day_break".to_string(),
///     start_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
///     break_minutes: 30,
///     is_paid_break: false,
///     priority: 10,
///     is_enabled: true,
/// }];
///
/// let outcome = resolve_break(&rules, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 20);
/// assert_eq!(outcome.break_minutes, 30);
/// assert_eq!(outcome.rule_id.as_deref(), Some("day_break"));
///
/// let fallback = resolve_break(&rules, NaiveTime::from_hms_opt(15, 0, 0).unwrap(), 20);
/// assert_eq!(fallback.break_minutes, 20);
/// assert_eq!(fallback.rule_id, None);
/// ```
pub fn resolve_break(
    rules: &[BreakRule],
    local_start: NaiveTime,
    default_break_minutes: i64,
) -> BreakOutcome {
    let winner = rules
        .iter()
        .filter(|rule| rule.is_enabled && rule.matches(local_start))
        .max_by_key(|rule| rule.priority);

    match winner {
        Some(rule) => BreakOutcome {
            break_minutes: rule.break_minutes,
            is_paid_break_rule: rule.is_paid_break,
            rule_id: Some(rule.id.clone()),
        },
        None => BreakOutcome {
            break_minutes: default_break_minutes,
            is_paid_break_rule: false,
            rule_id: None,
        },
    }
}

/// Returns the break minutes to deduct from paid time.
///
/// A shift-level override replaces the resolved minutes when present. The
/// contract's `breaks_paid` flag then decides deduction: paid breaks deduct
/// nothing. With no contract, breaks are unpaid by default.
pub fn unpaid_break_minutes(
    outcome: &BreakOutcome,
    override_minutes: Option<i64>,
    contract: Option<&PayContract>,
) -> i64 {
    let minutes = override_minutes.unwrap_or(outcome.break_minutes).max(0);
    let breaks_paid = contract.is_some_and(|c| c.breaks_paid);
    if breaks_paid { 0 } else { minutes }
}
