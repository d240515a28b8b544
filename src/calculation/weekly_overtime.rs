//! Weekly overtime allocation.
//!
//! Distributes an employee's weekly overtime across the shifts of one
//! payroll week in reverse-chronological order: overtime is attributed to
//! the most recent work in the week. That is a deliberate, documented
//! tie-break, not an implementation accident.
//!
//! The allocator works over an index-addressed arena: a slice of per-shift
//! computations plus a separate list of indices naming one employee-week
//! group. No shift references alias.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Per-shift working state carried through the pipeline.
///
/// Built once per reconciled shift, then addressed by index for grouping
/// and overtime allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftComputation {
    /// Position of the shift in the input snapshot.
    pub shift_index: usize,
    /// The shift's clock-in instant; the reverse-chronological sort key.
    pub clock_in_at: DateTime<Utc>,
    /// The local calendar day the shift anchors to.
    pub day: NaiveDate,
    /// The start date of the payroll week the shift anchors to.
    pub week_start: NaiveDate,
    /// Total minutes between clock-in and clock-out.
    pub worked_minutes: i64,
    /// Worked minutes less unpaid break minutes.
    pub paid_minutes: i64,
    /// Break minutes deducted from paid time.
    pub unpaid_break_minutes: i64,
    /// Minutes allocated to overtime; written by the allocator.
    pub ot_minutes: i64,
}

/// Allocates weekly overtime across one employee-week group.
///
/// `indices` names the group's entries in `arena`. The overtime budget is
/// `max(0, week_paid_minutes - threshold_minutes)`, zero entirely when
/// `threshold_minutes` is zero (no contracted hours means no overtime
/// eligibility). Shifts are sorted by `clock_in_at` ascending and walked in
/// reverse, each taking `min(paid_minutes, remaining_budget)`. When the
/// budget runs out mid-list, remaining earlier shifts receive zero.
///
/// Returns the total overtime minutes allocated.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{ShiftComputation, allocate_weekly_overtime};
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// let mut arena: Vec<ShiftComputation> = (0..2)
///     .map(|i| ShiftComputation {
///         shift_index: i,
///         clock_in_at: Utc.with_ymd_and_hms(2024, 6, 3 + i as u32, 9, 0, 0).unwrap(),
///         day,
///         week_start: day,
///         worked_minutes: 480,
///         paid_minutes: 480,
///         unpaid_break_minutes: 0,
///         ot_minutes: 0,
///     })
///     .collect();
///
/// // 960 paid against a 600-minute threshold: 360 OT, all on the later shift.
/// let allocated = allocate_weekly_overtime(&mut arena, &[0, 1], 600);
/// assert_eq!(allocated, 360);
/// assert_eq!(arena[0].ot_minutes, 0);
/// assert_eq!(arena[1].ot_minutes, 360);
/// ```
pub fn allocate_weekly_overtime(
    arena: &mut [ShiftComputation],
    indices: &[usize],
    threshold_minutes: i64,
) -> i64 {
    let week_paid_minutes: i64 = indices.iter().map(|&i| arena[i].paid_minutes).sum();

    let mut budget = if threshold_minutes > 0 {
        (week_paid_minutes - threshold_minutes).max(0)
    } else {
        0
    };

    let mut ordered: Vec<usize> = indices.to_vec();
    ordered.sort_by_key(|&i| (arena[i].clock_in_at, arena[i].shift_index));

    let mut allocated = 0;
    for &i in ordered.iter().rev() {
        let ot = arena[i].paid_minutes.min(budget);
        arena[i].ot_minutes = ot;
        budget -= ot;
        allocated += ot;
    }

    allocated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn computation(index: usize, day: u32, paid: i64) -> ShiftComputation {
        let date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        ShiftComputation {
            shift_index: index,
            clock_in_at: Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap(),
            day: date,
            week_start: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            worked_minutes: paid,
            paid_minutes: paid,
            unpaid_break_minutes: 0,
            ot_minutes: 0,
        }
    }

    #[test]
    fn test_no_overtime_under_threshold() {
        let mut arena = vec![computation(0, 3, 480), computation(1, 4, 480)];
        let allocated = allocate_weekly_overtime(&mut arena, &[0, 1], 2250);
        assert_eq!(allocated, 0);
        assert!(arena.iter().all(|c| c.ot_minutes == 0));
    }

    #[test]
    fn test_zero_threshold_means_no_overtime() {
        let mut arena = vec![computation(0, 3, 600), computation(1, 4, 600)];
        let allocated = allocate_weekly_overtime(&mut arena, &[0, 1], 0);
        assert_eq!(allocated, 0);
        assert!(arena.iter().all(|c| c.ot_minutes == 0));
    }

    #[test]
    fn test_overtime_taken_from_latest_shift_first() {
        // Mon-Fri 8h, Fri has 10.5h; threshold 37.5h => 5h OT on Friday.
        let mut arena = vec![
            computation(0, 3, 480),
            computation(1, 4, 480),
            computation(2, 5, 480),
            computation(3, 6, 480),
            computation(4, 7, 630),
        ];
        let indices: Vec<usize> = (0..5).collect();
        let allocated = allocate_weekly_overtime(&mut arena, &indices, 2250);

        assert_eq!(allocated, 300);
        assert_eq!(arena[4].ot_minutes, 300);
        assert!(arena[..4].iter().all(|c| c.ot_minutes == 0));
    }

    #[test]
    fn test_budget_spills_backwards_across_shifts() {
        // 3 x 480 = 1440 paid, threshold 600 => 840 OT.
        // Latest takes 480, middle takes 360, earliest takes 0.
        let mut arena = vec![
            computation(0, 3, 480),
            computation(1, 4, 480),
            computation(2, 5, 480),
        ];
        let allocated = allocate_weekly_overtime(&mut arena, &[0, 1, 2], 600);

        assert_eq!(allocated, 840);
        assert_eq!(arena[2].ot_minutes, 480);
        assert_eq!(arena[1].ot_minutes, 360);
        assert_eq!(arena[0].ot_minutes, 0);
    }

    #[test]
    fn test_allocation_is_independent_of_input_order() {
        let mut forward = vec![
            computation(0, 3, 480),
            computation(1, 4, 480),
            computation(2, 5, 480),
        ];
        let mut reversed = vec![
            computation(2, 5, 480),
            computation(1, 4, 480),
            computation(0, 3, 480),
        ];

        allocate_weekly_overtime(&mut forward, &[0, 1, 2], 600);
        allocate_weekly_overtime(&mut reversed, &[0, 1, 2], 600);

        // Same shifts, same result, regardless of arena order.
        use chrono::Datelike;
        let by_day_forward: Vec<(u32, i64)> = forward
            .iter()
            .map(|c| (c.day.day(), c.ot_minutes))
            .collect();
        let mut by_day_reversed: Vec<(u32, i64)> = reversed
            .iter()
            .map(|c| (c.day.day(), c.ot_minutes))
            .collect();
        by_day_reversed.reverse();
        assert_eq!(by_day_forward, by_day_reversed);
    }

    #[test]
    fn test_entire_week_overtime_when_threshold_tiny() {
        let mut arena = vec![computation(0, 3, 480), computation(1, 4, 480)];
        let allocated = allocate_weekly_overtime(&mut arena, &[0, 1], 60);
        assert_eq!(allocated, 900);
        assert_eq!(arena[1].ot_minutes, 480);
        assert_eq!(arena[0].ot_minutes, 420);
    }

    #[test]
    fn test_overtime_never_exceeds_budget() {
        let mut arena = vec![
            computation(0, 3, 500),
            computation(1, 4, 450),
            computation(2, 5, 520),
        ];
        let week_paid: i64 = arena.iter().map(|c| c.paid_minutes).sum();
        let threshold = 900;
        let allocated = allocate_weekly_overtime(&mut arena, &[0, 1, 2], threshold);
        assert_eq!(allocated, week_paid - threshold);
        let total_ot: i64 = arena.iter().map(|c| c.ot_minutes).sum();
        assert_eq!(total_ot, allocated);
    }
}
