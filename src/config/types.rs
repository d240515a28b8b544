//! Configuration types for the Shift Reconciliation Engine.
//!
//! This module contains the raw structures deserialized from YAML plus the
//! assembled, validated [`EngineConfig`] the engine computes against.

use chrono::{NaiveDate, Weekday};
use serde::Deserialize;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::models::{BankHolidayCalendar, BreakRule, PayrollWeekWindow};

/// How enhancement categories combine on a single span of minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackingMode {
    /// At most one enhancement category applies to any given minute;
    /// highest-priority category wins. The default and fully specified mode.
    Exclusive,
    /// One multiplier plus one premium may apply concurrently. Accepted by
    /// the parser but rejected at policy construction until its combination
    /// rule is confirmed.
    Stack,
}

impl std::fmt::Display for StackingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackingMode::Exclusive => write!(f, "exclusive"),
            StackingMode::Stack => write!(f, "stack"),
        }
    }
}

/// Raw engine settings as they appear in `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Weekday each payroll week starts on (e.g. "monday").
    pub week_start: String,
    /// IANA timezone name (e.g. "Europe/London").
    pub timezone: String,
    /// Break minutes applied when no break rule matches.
    pub default_break_minutes: i64,
    /// How enhancement categories combine.
    #[serde(default = "default_stacking_mode")]
    pub stacking_mode: StackingMode,
}

fn default_stacking_mode() -> StackingMode {
    StackingMode::Exclusive
}

/// Break rules file structure (`break_rules.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct BreakRulesConfig {
    /// The configured break rules.
    pub break_rules: Vec<BreakRule>,
}

/// Bank holidays file structure (`bank_holidays.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct BankHolidaysConfig {
    /// The configured bank-holiday dates.
    pub bank_holidays: Vec<NaiveDate>,
}

/// The complete, validated engine configuration.
///
/// Assembled once per invocation from the raw YAML structures; the payroll
/// week window inside it is immutable after initial configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    week_window: PayrollWeekWindow,
    default_break_minutes: i64,
    stacking_mode: StackingMode,
    break_rules: Vec<BreakRule>,
    bank_holidays: BankHolidayCalendar,
}

impl EngineConfig {
    /// Assembles and validates a configuration from its raw parts.
    ///
    /// # Errors
    ///
    /// Returns an error when the weekday or timezone fails to parse.
    pub fn new(
        settings: EngineSettings,
        break_rules: Vec<BreakRule>,
        bank_holidays: Vec<NaiveDate>,
    ) -> EngineResult<Self> {
        let week_start = Weekday::from_str(&settings.week_start).map_err(|_| {
            EngineError::InvalidWeekStart {
                value: settings.week_start.clone(),
            }
        })?;

        let timezone = settings
            .timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|_| EngineError::InvalidTimezone {
                name: settings.timezone.clone(),
            })?;

        Ok(Self {
            week_window: PayrollWeekWindow::new(week_start, timezone),
            default_break_minutes: settings.default_break_minutes,
            stacking_mode: settings.stacking_mode,
            break_rules,
            bank_holidays: BankHolidayCalendar::from_dates(bank_holidays),
        })
    }

    /// Returns the fixed payroll week window.
    pub fn week_window(&self) -> &PayrollWeekWindow {
        &self.week_window
    }

    /// Returns the default break minutes applied when no rule matches.
    pub fn default_break_minutes(&self) -> i64 {
        self.default_break_minutes
    }

    /// Returns the configured stacking mode.
    pub fn stacking_mode(&self) -> StackingMode {
        self.stacking_mode
    }

    /// Returns the configured break rules.
    pub fn break_rules(&self) -> &[BreakRule] {
        &self.break_rules
    }

    /// Returns the bank-holiday calendar.
    pub fn bank_holidays(&self) -> &BankHolidayCalendar {
        &self.bank_holidays
    }
}
