//! The end-to-end reconciliation pipeline.
//!
//! A synchronous, single-threaded, stateless pure function over a snapshot
//! of records supplied by the caller: `(shifts, rules, contracts, bank
//! holidays, week window) -> per-shift breakdowns`. All I/O belongs to the
//! host; nothing here blocks, suspends, or retries.

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::calculation::break_resolution::{resolve_break, unpaid_break_minutes};
use crate::calculation::classification::{DayFacts, policy_for};
use crate::calculation::contract_resolution::ContractBook;
use crate::calculation::weekly_overtime::{ShiftComputation, allocate_weekly_overtime};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{Shift, ShiftBreakdown};

/// The record snapshot a reconciliation run computes over.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationInput {
    /// Closed shift records. Voided shifts are tolerated and excluded.
    pub shifts: Vec<Shift>,
    /// Effective-dated contracts for every employee in the snapshot.
    pub contracts: ContractBook,
    /// Each employee's current department assignment, used by aggregation.
    pub departments: HashMap<String, String>,
}

/// The result of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationOutput {
    /// Per-shift breakdowns, in snapshot order.
    pub shifts: Vec<ShiftBreakdown>,
    /// Ids of shifts dropped for data-quality reasons (missing or
    /// inconsistent clock times). Each drop also emits a `tracing` warning.
    pub skipped: Vec<String>,
}

/// Reconciles a snapshot of shifts into classified per-shift minutes.
///
/// Per shift: anchor to the local calendar day and payroll week of
/// `clock_in_at`; resolve the break rule from the local start time; resolve
/// the contract at the week's start date; reduce to paid minutes. Per
/// employee-week group: allocate overtime reverse-chronologically, then
/// classify each shift's non-overtime remainder against its anchored day.
///
/// Data-quality gaps are never fatal: a shift with missing clock times is
/// skipped with a diagnostic, and a missing contract yields zero overtime
/// eligibility and unpaid breaks. Running twice over the same snapshot
/// yields identical output.
///
/// # Errors
///
/// Only configuration-level problems error: an unsupported stacking mode.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{ContractBook, ReconciliationInput, reconcile};
/// use payroll_engine::config::{EngineConfig, EngineSettings, StackingMode};
/// use payroll_engine::models::Shift;
///
/// let config = EngineConfig::new(
///     EngineSettings {
///         week_start: "monday".to_string(),
///         timezone: "UTC".to_string(),
///         default_break_minutes: 0,
///         stacking_mode: StackingMode::Exclusive,
///     },
///     vec![],
///     vec![],
/// )
/// .unwrap();
///
/// let shift: Shift = serde_json::from_str(r#"{
///     "id": "shift_001",
///     "employee_id": "emp_001",
///     "clock_in_at": "2024-06-03T09:00:00Z",
///     "clock_out_at": "2024-06-03T17:00:00Z"
/// }"#).unwrap();
///
/// let input = ReconciliationInput {
///     shifts: vec![shift],
///     contracts: ContractBook::new(),
///     departments: Default::default(),
/// };
///
/// let output = reconcile(&config, &input).unwrap();
/// assert_eq!(output.shifts[0].paid_minutes, 480);
/// assert_eq!(output.shifts[0].base_minutes, 480); // no contract: no OT
/// ```
pub fn reconcile(
    config: &EngineConfig,
    input: &ReconciliationInput,
) -> EngineResult<ReconciliationOutput> {
    let policy = policy_for(config.stacking_mode())?;
    let window = config.week_window();

    let mut arena: Vec<ShiftComputation> = Vec::with_capacity(input.shifts.len());
    let mut skipped: Vec<String> = Vec::new();

    for (shift_index, shift) in input.shifts.iter().enumerate() {
        if shift.is_void() {
            debug!(shift_id = %shift.id, "excluding voided shift");
            continue;
        }

        let (clock_in, clock_out) = match (shift.clock_in_at, shift.clock_out_at) {
            (Some(clock_in), Some(clock_out)) => (clock_in, clock_out),
            _ => {
                warn!(
                    shift_id = %shift.id,
                    employee_id = %shift.employee_id,
                    "skipping shift with missing or unparsable clock times"
                );
                skipped.push(shift.id.clone());
                continue;
            }
        };

        let worked_minutes = (clock_out - clock_in).num_minutes();
        if worked_minutes < 0 {
            warn!(
                shift_id = %shift.id,
                employee_id = %shift.employee_id,
                "skipping shift with clock-out before clock-in"
            );
            skipped.push(shift.id.clone());
            continue;
        }

        // Anchoring: the whole shift belongs to clock-in's local day and week.
        let day = window.local_date(clock_in);
        let week_start = window.week_start_for(day);
        let local_start = window.local_time(clock_in);

        let outcome = resolve_break(
            config.break_rules(),
            local_start,
            config.default_break_minutes(),
        );
        let contract = input.contracts.resolve(&shift.employee_id, week_start);
        let unpaid = unpaid_break_minutes(&outcome, shift.break_minutes_override, contract);
        let paid_minutes = (worked_minutes - unpaid).max(0);

        arena.push(ShiftComputation {
            shift_index,
            clock_in_at: clock_in,
            day,
            week_start,
            worked_minutes,
            paid_minutes,
            unpaid_break_minutes: unpaid,
            ot_minutes: 0,
        });
    }

    // Group arena entries by employee-week; BTreeMap keeps iteration stable.
    let mut groups: BTreeMap<(String, chrono::NaiveDate), Vec<usize>> = BTreeMap::new();
    for (arena_index, computation) in arena.iter().enumerate() {
        let employee_id = input.shifts[computation.shift_index].employee_id.clone();
        groups
            .entry((employee_id, computation.week_start))
            .or_default()
            .push(arena_index);
    }

    for ((employee_id, week_start), indices) in &groups {
        let threshold_minutes = input
            .contracts
            .resolve(employee_id, *week_start)
            .map(|contract| contract.weekly_threshold_minutes())
            .unwrap_or(0);

        let allocated = allocate_weekly_overtime(&mut arena, indices, threshold_minutes);
        debug!(
            employee_id = %employee_id,
            week_start = %week_start,
            threshold_minutes,
            allocated,
            "allocated weekly overtime"
        );
    }

    let bank_holidays = config.bank_holidays();
    let shifts = arena
        .iter()
        .map(|computation| {
            let shift = &input.shifts[computation.shift_index];
            let facts = DayFacts {
                is_bank_holiday: bank_holidays.contains(computation.day),
                is_weekend: matches!(computation.day.weekday(), Weekday::Sat | Weekday::Sun),
            };
            let classified =
                policy.classify(computation.paid_minutes - computation.ot_minutes, facts);

            ShiftBreakdown {
                shift_id: shift.id.clone(),
                employee_id: shift.employee_id.clone(),
                day: computation.day,
                week_start: computation.week_start,
                worked_minutes: computation.worked_minutes,
                paid_minutes: computation.paid_minutes,
                unpaid_break_minutes: computation.unpaid_break_minutes,
                ot_minutes: computation.ot_minutes,
                bank_holiday_minutes: classified.bank_holiday_minutes,
                weekend_minutes: classified.weekend_minutes,
                base_minutes: classified.base_minutes,
                training_minutes: shift.training_minutes.unwrap_or(0),
                is_callout: shift.is_callout,
                is_autoclosed: shift.is_autoclosed,
            }
        })
        .collect();

    Ok(ReconciliationOutput { shifts, skipped })
}
