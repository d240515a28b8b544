//! Pay contract model and uplift types.
//!
//! Contracts are effective-dated: at most one per employee per date, with
//! inclusive `[effective_from, effective_to]` ranges (`effective_to = None`
//! means open-ended). Enhancement uplifts are a tagged union validated when
//! reference data is loaded, never at use time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// The category of minutes an uplift applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpliftCategory {
    /// Saturday/Sunday work.
    Weekend,
    /// Work on a bank holiday.
    BankHoliday,
    /// Night work.
    Night,
    /// Weekly overtime.
    Overtime,
    /// Out-of-hours call-out.
    Callout,
}

/// An enhancement uplift: either a flat premium per hour or a rate multiplier.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Uplift;
/// use rust_decimal::Decimal;
///
/// let premium: Uplift = serde_json::from_str(r#"{"premium": "1.50"}"#).unwrap();
/// assert_eq!(premium, Uplift::Premium(Decimal::new(150, 2)));
///
/// let multiplier: Uplift = serde_json::from_str(r#"{"multiplier": "1.25"}"#).unwrap();
/// assert_eq!(multiplier, Uplift::Multiplier(Decimal::new(125, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Uplift {
    /// A flat amount added to the hourly rate.
    Premium(Decimal),
    /// A factor the hourly rate is multiplied by.
    Multiplier(Decimal),
}

/// An employee's pay contract, valid within its effective date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayContract {
    /// Unique identifier for the contract.
    pub id: String,
    /// The employee this contract belongs to.
    pub employee_id: String,
    /// First date the contract applies (inclusive).
    pub effective_from: NaiveDate,
    /// Last date the contract applies (inclusive); `None` = open-ended.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Base hourly rate.
    pub hourly_rate: Decimal,
    /// Contracted hours per week. Absent or zero means the employee is
    /// never eligible for overtime.
    #[serde(default)]
    pub contract_hours_per_week: Option<Decimal>,
    /// Whether breaks are paid under this contract. Overrides the
    /// rule-level paid flag when deciding break deduction.
    #[serde(default)]
    pub breaks_paid: bool,
    /// Enhancement uplifts keyed by category.
    #[serde(default)]
    pub uplifts: HashMap<UpliftCategory, Uplift>,
}

impl PayContract {
    /// Returns true if the contract's date range contains the given date.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayContract;
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use std::collections::HashMap;
    ///
    /// let contract = PayContract {
    ///     id: "contract_a".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     effective_to: None,
    ///     hourly_rate: Decimal::new(1250, 2),
    ///     contract_hours_per_week: None,
    ///     breaks_paid: false,
    ///     uplifts: HashMap::new(),
    /// };
    /// assert!(contract.covers(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
    /// assert!(!contract.covers(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
    /// ```
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date <= to)
    }

    /// Returns true if this contract's date range overlaps another's.
    ///
    /// Both ranges are inclusive; an open end extends to infinity.
    pub fn overlaps(&self, other: &PayContract) -> bool {
        let self_ends_before = self.effective_to.is_some_and(|to| to < other.effective_from);
        let other_ends_before = other.effective_to.is_some_and(|to| to < self.effective_from);
        !(self_ends_before || other_ends_before)
    }

    /// Returns true if the employee can accrue overtime under this contract.
    pub fn overtime_eligible(&self) -> bool {
        self.contract_hours_per_week
            .is_some_and(|hours| hours > Decimal::ZERO)
    }

    /// Returns the weekly overtime threshold in minutes.
    ///
    /// `round(contract_hours_per_week * 60)`, or 0 when the employee has no
    /// contracted hours (and therefore no overtime eligibility).
    pub fn weekly_threshold_minutes(&self) -> i64 {
        match self.contract_hours_per_week {
            Some(hours) if hours > Decimal::ZERO => (hours * Decimal::from(60))
                .round()
                .to_i64()
                .unwrap_or(0),
            _ => 0,
        }
    }

    /// Returns the effective hourly rate for a category of minutes.
    ///
    /// A premium adds a flat amount per hour; a multiplier scales the base
    /// rate. Categories without an uplift pay the base rate.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{PayContract, Uplift, UpliftCategory};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use std::collections::HashMap;
    ///
    /// let mut uplifts = HashMap::new();
    /// uplifts.insert(UpliftCategory::Weekend, Uplift::Multiplier(Decimal::new(150, 2)));
    /// uplifts.insert(UpliftCategory::Night, Uplift::Premium(Decimal::new(200, 2)));
    ///
    /// let contract = PayContract {
    ///     id: "contract_a".to_string(),
    ///     employee_id: "emp_001".to_string(),
    ///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     effective_to: None,
    ///     hourly_rate: Decimal::new(1000, 2), // 10.00
    ///     contract_hours_per_week: None,
    ///     breaks_paid: false,
    ///     uplifts,
    /// };
    ///
    /// assert_eq!(contract.effective_rate(Some(UpliftCategory::Weekend)), Decimal::new(1500, 2));
    /// assert_eq!(contract.effective_rate(Some(UpliftCategory::Night)), Decimal::new(1200, 2));
    /// assert_eq!(contract.effective_rate(None), Decimal::new(1000, 2));
    /// ```
    pub fn effective_rate(&self, category: Option<UpliftCategory>) -> Decimal {
        match category.and_then(|c| self.uplifts.get(&c)) {
            Some(Uplift::Premium(amount)) => self.hourly_rate + *amount,
            Some(Uplift::Multiplier(factor)) => self.hourly_rate * *factor,
            None => self.hourly_rate,
        }
    }

    /// Validates the contract's date range and uplift values.
    ///
    /// Called when reference data is loaded so malformed uplifts surface
    /// once, up front, rather than mid-computation.
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(to) = self.effective_to {
            if to < self.effective_from {
                return Err(EngineError::InvalidContract {
                    contract_id: self.id.clone(),
                    message: format!(
                        "effective_to {} precedes effective_from {}",
                        to, self.effective_from
                    ),
                });
            }
        }

        for (category, uplift) in &self.uplifts {
            match uplift {
                Uplift::Premium(amount) if *amount < Decimal::ZERO => {
                    return Err(EngineError::InvalidContract {
                        contract_id: self.id.clone(),
                        message: format!("negative premium for {:?}", category),
                    });
                }
                Uplift::Multiplier(factor) if *factor <= Decimal::ZERO => {
                    return Err(EngineError::InvalidContract {
                        contract_id: self.id.clone(),
                        message: format!("non-positive multiplier for {:?}", category),
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn contract(from: NaiveDate, to: Option<NaiveDate>) -> PayContract {
        PayContract {
            id: "contract_a".to_string(),
            employee_id: "emp_001".to_string(),
            effective_from: from,
            effective_to: to,
            hourly_rate: dec("12.50"),
            contract_hours_per_week: Some(dec("37.5")),
            breaks_paid: false,
            uplifts: HashMap::new(),
        }
    }

    #[test]
    fn test_covers_inclusive_range() {
        let c = contract(date(2024, 1, 1), Some(date(2024, 5, 31)));
        assert!(c.covers(date(2024, 1, 1)));
        assert!(c.covers(date(2024, 3, 15)));
        assert!(c.covers(date(2024, 5, 31)));
        assert!(!c.covers(date(2023, 12, 31)));
        assert!(!c.covers(date(2024, 6, 1)));
    }

    #[test]
    fn test_covers_open_ended_contract() {
        let c = contract(date(2024, 1, 1), None);
        assert!(c.covers(date(2024, 1, 1)));
        assert!(c.covers(date(2030, 12, 31)));
        assert!(!c.covers(date(2023, 12, 31)));
    }

    #[test]
    fn test_overlaps_adjacent_ranges_do_not_overlap() {
        let a = contract(date(2024, 1, 1), Some(date(2024, 5, 31)));
        let b = contract(date(2024, 6, 1), None);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_overlaps_open_ended_overlaps_later_start() {
        let a = contract(date(2024, 1, 1), None);
        let b = contract(date(2024, 6, 1), None);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlaps_shared_single_day() {
        let a = contract(date(2024, 1, 1), Some(date(2024, 6, 1)));
        let b = contract(date(2024, 6, 1), None);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_weekly_threshold_for_37_5_hours() {
        let c = contract(date(2024, 1, 1), None);
        assert_eq!(c.weekly_threshold_minutes(), 2250);
    }

    #[test]
    fn test_weekly_threshold_zero_when_hours_absent() {
        let mut c = contract(date(2024, 1, 1), None);
        c.contract_hours_per_week = None;
        assert_eq!(c.weekly_threshold_minutes(), 0);
        assert!(!c.overtime_eligible());

        c.contract_hours_per_week = Some(Decimal::ZERO);
        assert_eq!(c.weekly_threshold_minutes(), 0);
        assert!(!c.overtime_eligible());
    }

    #[test]
    fn test_weekly_threshold_rounds_fractional_minutes() {
        let mut c = contract(date(2024, 1, 1), None);
        c.contract_hours_per_week = Some(dec("37.51"));
        // 37.51 * 60 = 2250.6 -> 2251
        assert_eq!(c.weekly_threshold_minutes(), 2251);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let c = contract(date(2024, 6, 1), Some(date(2024, 1, 1)));
        let err = c.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidContract { .. }));
    }

    #[test]
    fn test_validate_rejects_negative_premium() {
        let mut c = contract(date(2024, 1, 1), None);
        c.uplifts
            .insert(UpliftCategory::Night, Uplift::Premium(dec("-0.50")));
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_multiplier() {
        let mut c = contract(date(2024, 1, 1), None);
        c.uplifts
            .insert(UpliftCategory::Overtime, Uplift::Multiplier(Decimal::ZERO));
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_uplifts() {
        let mut c = contract(date(2024, 1, 1), None);
        c.uplifts
            .insert(UpliftCategory::Weekend, Uplift::Multiplier(dec("1.5")));
        c.uplifts
            .insert(UpliftCategory::BankHoliday, Uplift::Multiplier(dec("2.0")));
        c.uplifts
            .insert(UpliftCategory::Night, Uplift::Premium(dec("1.75")));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_uplift_map_deserialization() {
        let json = r#"{
            "id": "contract_a",
            "employee_id": "emp_001",
            "effective_from": "2024-01-01",
            "hourly_rate": "12.50",
            "contract_hours_per_week": "37.5",
            "breaks_paid": true,
            "uplifts": {
                "weekend": {"multiplier": "1.5"},
                "night": {"premium": "1.75"}
            }
        }"#;

        let c: PayContract = serde_json::from_str(json).unwrap();
        assert!(c.breaks_paid);
        assert_eq!(
            c.uplifts.get(&UpliftCategory::Weekend),
            Some(&Uplift::Multiplier(dec("1.5")))
        );
        assert_eq!(
            c.uplifts.get(&UpliftCategory::Night),
            Some(&Uplift::Premium(dec("1.75")))
        );
        assert!(c.validate().is_ok());
    }
}
