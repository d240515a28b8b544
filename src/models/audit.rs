//! Append-only audit log for admin shift edits.
//!
//! An admin correction to a shift must be paired with a before/after audit
//! snapshot in the same logical transaction: if the entry cannot be
//! recorded, the edit is not committed. [`apply_shift_edit`] enforces this
//! by validating everything up front and then mutating the shift and
//! appending the entry as one unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::Shift;

/// An admin correction to a shift's recorded times or break override.
///
/// Fields left as `None` keep the shift's current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftEdit {
    /// New clock-in instant, if being corrected.
    pub clock_in_at: Option<DateTime<Utc>>,
    /// New clock-out instant, if being corrected.
    pub clock_out_at: Option<DateTime<Utc>>,
    /// New break-minutes override, if being corrected.
    pub break_minutes_override: Option<i64>,
}

/// A single audit record: who-knows-what is the host's concern, the engine
/// records the full before/after shift snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// When the edit was recorded.
    pub recorded_at: DateTime<Utc>,
    /// The shift the edit applied to.
    pub shift_id: String,
    /// The shift as it was before the edit.
    pub before: Shift,
    /// The shift as it is after the edit.
    pub after: Shift,
}

/// An append-only log of shift edits.
///
/// Entries can be appended and read but never removed or rewritten.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded entries, oldest first.
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    fn append(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }
}

/// Applies an admin edit to a shift, recording it in the audit log.
///
/// Validation happens entirely before mutation: a rejected edit leaves both
/// the shift and the log untouched. Two callers editing the same shift are
/// last-writer-wins; the log keeps both entries so the history is
/// recoverable.
///
/// # Errors
///
/// Returns [`EngineError::InvalidShiftEdit`] when the edited times would put
/// clock-out before clock-in, or when the break override is negative.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AuditLog, Shift, ShiftEdit, apply_shift_edit};
/// use chrono::{TimeZone, Utc};
///
/// let mut shift = Shift {
///     id: "shift_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     clock_in_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap()),
///     clock_out_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 17, 0, 0).unwrap()),
///     is_autoclosed: false,
///     is_callout: false,
///     break_minutes_override: None,
///     training_minutes: None,
///     close_reason: None,
/// };
/// let mut log = AuditLog::new();
///
/// let edit = ShiftEdit {
///     clock_out_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 17, 30, 0).unwrap()),
///     ..ShiftEdit::default()
/// };
/// apply_shift_edit(&mut shift, &edit, &mut log).unwrap();
///
/// assert_eq!(shift.worked_minutes(), Some(510));
/// assert_eq!(log.entries().len(), 1);
/// ```
pub fn apply_shift_edit(
    shift: &mut Shift,
    edit: &ShiftEdit,
    log: &mut AuditLog,
) -> EngineResult<()> {
    let new_clock_in = edit.clock_in_at.or(shift.clock_in_at);
    let new_clock_out = edit.clock_out_at.or(shift.clock_out_at);

    if let (Some(clock_in), Some(clock_out)) = (new_clock_in, new_clock_out) {
        if clock_out < clock_in {
            return Err(EngineError::InvalidShiftEdit {
                shift_id: shift.id.clone(),
                message: "clock-out before clock-in".to_string(),
            });
        }
    }

    if let Some(minutes) = edit.break_minutes_override {
        if minutes < 0 {
            return Err(EngineError::InvalidShiftEdit {
                shift_id: shift.id.clone(),
                message: format!("negative break override: {}", minutes),
            });
        }
    }

    let before = shift.clone();
    shift.clock_in_at = new_clock_in;
    shift.clock_out_at = new_clock_out;
    if edit.break_minutes_override.is_some() {
        shift.break_minutes_override = edit.break_minutes_override;
    }

    log.append(AuditEntry {
        id: Uuid::new_v4(),
        recorded_at: Utc::now(),
        shift_id: shift.id.clone(),
        before,
        after: shift.clone(),
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_shift() -> Shift {
        Shift {
            id: "shift_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap()),
            clock_out_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 17, 0, 0).unwrap()),
            is_autoclosed: false,
            is_callout: false,
            break_minutes_override: None,
            training_minutes: None,
            close_reason: None,
        }
    }

    #[test]
    fn test_edit_updates_clock_out_and_records_entry() {
        let mut shift = make_shift();
        let mut log = AuditLog::new();

        let edit = ShiftEdit {
            clock_out_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 18, 0, 0).unwrap()),
            ..ShiftEdit::default()
        };
        apply_shift_edit(&mut shift, &edit, &mut log).unwrap();

        assert_eq!(shift.worked_minutes(), Some(540));
        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries()[0].before.worked_minutes(), Some(480));
        assert_eq!(log.entries()[0].after.worked_minutes(), Some(540));
    }

    #[test]
    fn test_edit_sets_break_override() {
        let mut shift = make_shift();
        let mut log = AuditLog::new();

        let edit = ShiftEdit {
            break_minutes_override: Some(20),
            ..ShiftEdit::default()
        };
        apply_shift_edit(&mut shift, &edit, &mut log).unwrap();

        assert_eq!(shift.break_minutes_override, Some(20));
    }

    #[test]
    fn test_rejected_edit_leaves_shift_and_log_untouched() {
        let mut shift = make_shift();
        let mut log = AuditLog::new();

        let edit = ShiftEdit {
            clock_out_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 8, 0, 0).unwrap()),
            ..ShiftEdit::default()
        };
        let err = apply_shift_edit(&mut shift, &edit, &mut log).unwrap_err();

        assert!(matches!(err, EngineError::InvalidShiftEdit { .. }));
        assert_eq!(shift, make_shift());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_negative_break_override_rejected() {
        let mut shift = make_shift();
        let mut log = AuditLog::new();

        let edit = ShiftEdit {
            break_minutes_override: Some(-5),
            ..ShiftEdit::default()
        };
        assert!(apply_shift_edit(&mut shift, &edit, &mut log).is_err());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_last_writer_wins_keeps_both_entries() {
        let mut shift = make_shift();
        let mut log = AuditLog::new();

        let first = ShiftEdit {
            clock_out_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 17, 30, 0).unwrap()),
            ..ShiftEdit::default()
        };
        let second = ShiftEdit {
            clock_out_at: Some(Utc.with_ymd_and_hms(2024, 6, 3, 18, 0, 0).unwrap()),
            ..ShiftEdit::default()
        };
        apply_shift_edit(&mut shift, &first, &mut log).unwrap();
        apply_shift_edit(&mut shift, &second, &mut log).unwrap();

        assert_eq!(shift.worked_minutes(), Some(540));
        assert_eq!(log.entries().len(), 2);
        assert_eq!(
            log.entries()[1].before.clock_out_at,
            log.entries()[0].after.clock_out_at
        );
    }
}
