//! Shift model and related types.
//!
//! A [`Shift`] is a closed clock-in/clock-out punch pair produced by the
//! external punch store. The engine never splits a shift across a day or
//! week boundary: all of its minutes belong to the local calendar day and
//! payroll week of `clock_in_at`, even when `clock_out_at` falls on a
//! later day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// The reason a shift was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// Closed by a normal clock-out punch.
    Normal,
    /// Closed automatically by the system after the employee failed to punch out.
    Autoclose,
    /// Soft-voided by an administrator; excluded from all totals.
    Void,
}

/// Represents a closed work shift built from a punch pair.
///
/// Timestamps deserialize *leniently*: an unparsable value becomes `None`
/// instead of failing the whole batch, so the pipeline can apply the
/// documented skip-with-diagnostic behaviour to that one shift.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Shift;
///
/// let json = r#"{
///     "id": "shift_001",
///     "employee_id": "emp_001",
///     "clock_in_at": "2024-06-03T09:00:00Z",
///     "clock_out_at": "not-a-timestamp",
///     "is_autoclosed": false,
///     "is_callout": false
/// }"#;
///
/// let shift: Shift = serde_json::from_str(json).unwrap();
/// assert!(shift.clock_in_at.is_some());
/// assert!(shift.clock_out_at.is_none());
/// assert_eq!(shift.worked_minutes(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier for the shift.
    pub id: String,
    /// The employee who worked the shift.
    pub employee_id: String,
    /// The clock-in instant (UTC). `None` when the source value was unparsable.
    #[serde(default, deserialize_with = "lenient_instant")]
    pub clock_in_at: Option<DateTime<Utc>>,
    /// The clock-out instant (UTC). `None` while open or when unparsable.
    #[serde(default, deserialize_with = "lenient_instant")]
    pub clock_out_at: Option<DateTime<Utc>>,
    /// Whether the shift was closed automatically rather than by a punch.
    #[serde(default)]
    pub is_autoclosed: bool,
    /// Whether the shift was an out-of-hours call-out.
    #[serde(default)]
    pub is_callout: bool,
    /// Manual override of the resolved break minutes, if any.
    #[serde(default)]
    pub break_minutes_override: Option<i64>,
    /// Training minutes tracked separately; excluded from pay calculations.
    #[serde(default)]
    pub training_minutes: Option<i64>,
    /// How the shift was closed. `None` for legacy rows closed normally.
    #[serde(default)]
    pub close_reason: Option<CloseReason>,
}

impl Shift {
    /// Returns true if the shift has been soft-voided.
    ///
    /// Voided shifts are excluded from every total; they are never deleted.
    pub fn is_void(&self) -> bool {
        self.close_reason == Some(CloseReason::Void)
    }

    /// Returns the total worked minutes between clock-in and clock-out.
    ///
    /// Returns `None` if either instant is missing; the pipeline skips such
    /// shifts with a diagnostic rather than treating them as an error.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::Shift;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let shift = Shift {
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
    /// assert_eq!(shift.worked_minutes(), Some(480));
    /// ```
    pub fn worked_minutes(&self) -> Option<i64> {
        match (self.clock_in_at, self.clock_out_at) {
            (Some(clock_in), Some(clock_out)) => Some((clock_out - clock_in).num_minutes()),
            _ => None,
        }
    }
}

/// Deserializes an optional UTC instant, mapping unparsable values to `None`.
fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|value| value.as_str())
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_shift(clock_in: &str, clock_out: &str) -> Shift {
        Shift {
            id: "shift_001".to_string(),
            employee_id: "emp_001".to_string(),
            clock_in_at: DateTime::parse_from_rfc3339(clock_in)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            clock_out_at: DateTime::parse_from_rfc3339(clock_out)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            is_autoclosed: false,
            is_callout: false,
            break_minutes_override: None,
            training_minutes: None,
            close_reason: None,
        }
    }

    #[test]
    fn test_worked_minutes_for_8_hour_shift() {
        let shift = make_shift("2024-06-03T09:00:00Z", "2024-06-03T17:00:00Z");
        assert_eq!(shift.worked_minutes(), Some(480));
    }

    #[test]
    fn test_worked_minutes_for_overnight_shift() {
        let shift = make_shift("2024-06-03T22:00:00Z", "2024-06-04T06:00:00Z");
        assert_eq!(shift.worked_minutes(), Some(480));
    }

    #[test]
    fn test_worked_minutes_none_when_clock_out_missing() {
        let mut shift = make_shift("2024-06-03T09:00:00Z", "2024-06-03T17:00:00Z");
        shift.clock_out_at = None;
        assert_eq!(shift.worked_minutes(), None);
    }

    #[test]
    fn test_is_void_only_for_void_close_reason() {
        let mut shift = make_shift("2024-06-03T09:00:00Z", "2024-06-03T17:00:00Z");
        assert!(!shift.is_void());

        shift.close_reason = Some(CloseReason::Autoclose);
        assert!(!shift.is_void());

        shift.close_reason = Some(CloseReason::Void);
        assert!(shift.is_void());
    }

    #[test]
    fn test_deserialize_unparsable_clock_out_becomes_none() {
        let json = r#"{
            "id": "shift_001",
            "employee_id": "emp_001",
            "clock_in_at": "2024-06-03T09:00:00Z",
            "clock_out_at": "garbage"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert_eq!(
            shift.clock_in_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap())
        );
        assert!(shift.clock_out_at.is_none());
    }

    #[test]
    fn test_deserialize_missing_optional_fields_default() {
        let json = r#"{
            "id": "shift_001",
            "employee_id": "emp_001",
            "clock_in_at": "2024-06-03T09:00:00Z",
            "clock_out_at": "2024-06-03T17:00:00Z"
        }"#;

        let shift: Shift = serde_json::from_str(json).unwrap();
        assert!(!shift.is_autoclosed);
        assert!(!shift.is_callout);
        assert_eq!(shift.break_minutes_override, None);
        assert_eq!(shift.training_minutes, None);
        assert_eq!(shift.close_reason, None);
    }

    #[test]
    fn test_close_reason_serialization() {
        assert_eq!(
            serde_json::to_string(&CloseReason::Autoclose).unwrap(),
            "\"autoclose\""
        );
        assert_eq!(serde_json::to_string(&CloseReason::Void).unwrap(), "\"void\"");
    }

    #[test]
    fn test_shift_round_trips_through_json() {
        let mut shift = make_shift("2024-06-03T09:00:00Z", "2024-06-03T17:30:00Z");
        shift.break_minutes_override = Some(20);
        shift.training_minutes = Some(60);
        shift.close_reason = Some(CloseReason::Normal);

        let json = serde_json::to_string(&shift).unwrap();
        let deserialized: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(shift, deserialized);
    }
}
