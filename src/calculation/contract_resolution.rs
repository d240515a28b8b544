//! Contract resolution and the contract write path.
//!
//! [`ContractBook`] holds each employee's effective-dated contract history.
//! Reads find the single contract covering a date. The write path is one
//! atomic unit: every check runs before any mutation, so a rejected insert
//! leaves the book exactly as it was.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};
use crate::models::PayContract;

/// The effect of a successful contract insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInsertOutcome {
    /// The id of the inserted contract.
    pub inserted_id: String,
    /// When inserting closed an open-ended predecessor: its id and the
    /// `effective_to` date it received (the day before the new start).
    pub closed_previous: Option<(String, NaiveDate)>,
}

/// Per-employee contract histories with overlap-free invariant.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::ContractBook;
/// use payroll_engine::models::PayContract;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let mut book = ContractBook::new();
/// book.insert(PayContract {
///     id: "contract_a".to_string(),
///     employee_id: "emp_001".to_string(),
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     effective_to: None,
///     hourly_rate: Decimal::new(1250, 2),
///     contract_hours_per_week: Some(Decimal::new(375, 1)),
///     breaks_paid: false,
///     uplifts: HashMap::new(),
/// }).unwrap();
///
/// let june = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert!(book.resolve("emp_001", june).is_some());
/// assert!(book.resolve("emp_002", june).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContractBook {
    by_employee: HashMap<String, Vec<PayContract>>,
}

impl ContractBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from existing contracts, enforcing the non-overlap
    /// invariant as each is inserted.
    pub fn from_contracts(
        contracts: impl IntoIterator<Item = PayContract>,
    ) -> EngineResult<Self> {
        let mut book = Self::new();
        for contract in contracts {
            book.insert(contract)?;
        }
        Ok(book)
    }

    /// Returns the single contract covering the date for the employee.
    ///
    /// A missing contract is not an error: the caller treats it as zero
    /// contracted hours, zero uplifts, unpaid breaks.
    pub fn resolve(&self, employee_id: &str, date: NaiveDate) -> Option<&PayContract> {
        self.by_employee
            .get(employee_id)?
            .iter()
            .rev()
            .find(|contract| contract.covers(date))
    }

    /// Returns the employee's contracts sorted by `effective_from`.
    pub fn contracts_for(&self, employee_id: &str) -> &[PayContract] {
        self.by_employee
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Inserts a contract as one atomic operation.
    ///
    /// When an existing open-ended contract covers the new `effective_from`,
    /// it is closed the day before the new start. Any other overlap is
    /// rejected with [`EngineError::ContractOverlap`] before any mutation,
    /// so the book never holds partial contract state.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidContract`] for inverted ranges or malformed
    ///   uplifts.
    /// - [`EngineError::ContractOverlap`] when the new range collides with
    ///   an existing contract that cannot be auto-closed.
    pub fn insert(&mut self, contract: PayContract) -> EngineResult<ContractInsertOutcome> {
        contract.validate()?;

        let history = self
            .by_employee
            .entry(contract.employee_id.clone())
            .or_default();

        // Plan phase: decide every mutation before applying any.
        let mut close_index: Option<usize> = None;
        for (index, existing) in history.iter().enumerate() {
            if !existing.overlaps(&contract) {
                continue;
            }
            let closable = existing.effective_to.is_none()
                && existing.effective_from < contract.effective_from
                && close_index.is_none();
            if closable {
                close_index = Some(index);
            } else {
                return Err(EngineError::ContractOverlap {
                    employee_id: contract.employee_id.clone(),
                    effective_from: contract.effective_from,
                    existing_id: existing.id.clone(),
                });
            }
        }

        let new_effective_to = contract.effective_from - Duration::days(1);

        // Apply phase: close-previous and insert commit together.
        let closed_previous = close_index.map(|index| {
            history[index].effective_to = Some(new_effective_to);
            (history[index].id.clone(), new_effective_to)
        });

        let inserted_id = contract.id.clone();
        history.push(contract);
        history.sort_by(|a, b| a.effective_from.cmp(&b.effective_from));

        Ok(ContractInsertOutcome {
            inserted_id,
            closed_previous,
        })
    }
}
