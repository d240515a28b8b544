//! Enhancement classification of non-overtime paid minutes.
//!
//! The classifier labels a span of minutes belonging to one shift as
//! bank-holiday, weekend, or base work, given calendar facts about the
//! shift's anchored day. The default policy is exclusive (non-stacking):
//! bank holiday takes precedence over weekend, which takes precedence over
//! base, and exactly one bucket is non-zero.
//!
//! The policy sits behind a trait so the configured `stack` mode can slot
//! in once its combination rule is confirmed.

use serde::{Deserialize, Serialize};

use crate::config::StackingMode;
use crate::error::{EngineError, EngineResult};

/// Calendar facts about a shift's anchored local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayFacts {
    /// The day is in the bank-holiday calendar.
    pub is_bank_holiday: bool,
    /// The day is a Saturday or Sunday in local time.
    pub is_weekend: bool,
}

/// Non-overtime minutes split across the enhancement buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedMinutes {
    /// Minutes classified as bank-holiday work.
    pub bank_holiday_minutes: i64,
    /// Minutes classified as weekend work.
    pub weekend_minutes: i64,
    /// Minutes at the base category.
    pub base_minutes: i64,
}

impl ClassifiedMinutes {
    /// Returns the sum of all buckets.
    pub fn total(&self) -> i64 {
        self.bank_holiday_minutes + self.weekend_minutes + self.base_minutes
    }
}

/// A classification policy: how enhancement categories combine.
pub trait ClassificationPolicy: std::fmt::Debug {
    /// Classifies a span of non-overtime paid minutes for one shift's day.
    fn classify(&self, minutes: i64, facts: DayFacts) -> ClassifiedMinutes;
}

/// The exclusive (non-stacking) policy: at most one enhancement category
/// applies to any given minute, highest-priority category wins.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{ClassificationPolicy, DayFacts, ExclusivePolicy};
///
/// let policy = ExclusivePolicy;
///
/// // A bank holiday that is also a Saturday classifies as bank holiday.
/// let classified = policy.classify(480, DayFacts { is_bank_holiday: true, is_weekend: true });
/// assert_eq!(classified.bank_holiday_minutes, 480);
/// assert_eq!(classified.weekend_minutes, 0);
/// assert_eq!(classified.base_minutes, 0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ExclusivePolicy;

impl ClassificationPolicy for ExclusivePolicy {
    fn classify(&self, minutes: i64, facts: DayFacts) -> ClassifiedMinutes {
        let minutes = minutes.max(0);
        if facts.is_bank_holiday {
            ClassifiedMinutes {
                bank_holiday_minutes: minutes,
                ..ClassifiedMinutes::default()
            }
        } else if facts.is_weekend {
            ClassifiedMinutes {
                weekend_minutes: minutes,
                ..ClassifiedMinutes::default()
            }
        } else {
            ClassifiedMinutes {
                base_minutes: minutes,
                ..ClassifiedMinutes::default()
            }
        }
    }
}

/// Returns the policy for a configured stacking mode.
///
/// # Errors
///
/// `stack` mode is accepted by the configuration parser but rejected here
/// until its precedence/combination rule is confirmed.
pub fn policy_for(mode: StackingMode) -> EngineResult<Box<dyn ClassificationPolicy>> {
    match mode {
        StackingMode::Exclusive => Ok(Box::new(ExclusivePolicy)),
        StackingMode::Stack => Err(EngineError::UnsupportedStackingMode {
            mode: mode.to_string(),
        }),
    }
}
