//! Calendar reference data: bank holidays and the payroll week window.
//!
//! The payroll week window is a `(week-start weekday, IANA timezone)` pair
//! fixed at setup time. Every anchoring decision in the engine goes through
//! it; the engine never infers a different week start.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The set of bank-holiday dates, read-only reference data.
///
/// # Example
///
/// ```
/// use payroll_engine::models::BankHolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = BankHolidayCalendar::from_dates(vec![
///     NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
/// ]);
/// assert!(calendar.contains(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()));
/// assert!(!calendar.contains(NaiveDate::from_ymd_opt(2024, 12, 24).unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl BankHolidayCalendar {
    /// Builds a calendar from a list of dates. Duplicates collapse.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            dates: dates.into_iter().collect(),
        }
    }

    /// Returns true if the date is a bank holiday.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Returns the number of dates in the calendar.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if the calendar holds no dates.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// The fixed payroll week window: week-start weekday plus IANA timezone.
///
/// Used to compute the local calendar day a shift anchors to, the local
/// start date of the payroll week containing a date, and the `[start, end)`
/// UTC boundary of that week.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollWeekWindow;
/// use chrono::{NaiveDate, TimeZone, Utc, Weekday};
///
/// let window = PayrollWeekWindow::new(Weekday::Mon, chrono_tz::Europe::London);
///
/// // 2024-06-05 is a Wednesday; its payroll week starts Monday 2024-06-03.
/// let wednesday = NaiveDate::from_ymd_opt(2024, 6, 5).unwrap();
/// assert_eq!(window.week_start_for(wednesday), NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
///
/// // 23:30 UTC on 2024-06-03 is 00:30 local on 2024-06-04 in London (BST).
/// let instant = Utc.with_ymd_and_hms(2024, 6, 3, 23, 30, 0).unwrap();
/// assert_eq!(window.local_date(instant), NaiveDate::from_ymd_opt(2024, 6, 4).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollWeekWindow {
    /// The weekday each payroll week starts on.
    pub week_start: Weekday,
    /// The IANA timezone all local-time decisions are made in.
    pub timezone: Tz,
}

impl PayrollWeekWindow {
    /// Creates a new week window. Immutable after initial configuration.
    pub fn new(week_start: Weekday, timezone: Tz) -> Self {
        Self {
            week_start,
            timezone,
        }
    }

    /// Returns the local calendar date of a UTC instant.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }

    /// Returns the local wall-clock time-of-day of a UTC instant.
    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveTime {
        instant.with_timezone(&self.timezone).time()
    }

    /// Returns the start date of the payroll week containing the local date.
    pub fn week_start_for(&self, date: NaiveDate) -> NaiveDate {
        let offset = date.weekday().days_since(self.week_start);
        date - Duration::days(i64::from(offset))
    }

    /// Returns the `[start, end)` UTC boundary of the payroll week
    /// containing the given local date.
    ///
    /// Boundaries fall on local midnight of the week-start day. An
    /// ambiguous midnight (clocks fall back) resolves to the earlier
    /// instant; a midnight inside a spring-forward gap resolves to the
    /// first valid instant after the gap.
    pub fn utc_bounds(&self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let start_date = self.week_start_for(date);
        let end_date = start_date + Duration::days(7);
        (
            self.local_midnight_utc(start_date),
            self.local_midnight_utc(end_date),
        )
    }

    /// Resolves local midnight of a date to a UTC instant, DST-aware.
    fn local_midnight_utc(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_hms_opt(0, 0, 0).expect("valid midnight");
        match self.timezone.from_local_datetime(&midnight) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
            LocalResult::None => {
                // Midnight falls inside a spring-forward gap; probe forward
                // until the local clock exists again.
                let mut probe = midnight;
                loop {
                    probe += Duration::minutes(15);
                    if let Some(dt) = self.timezone.from_local_datetime(&probe).earliest() {
                        return dt.with_timezone(&Utc);
                    }
                }
            }
        }
    }
}
