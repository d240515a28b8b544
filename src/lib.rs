//! Shift Reconciliation & Payroll Enhancement Engine
//!
//! This crate turns closed clock-in/clock-out shift records into
//! payroll-correct figures: break resolution from time-window rules,
//! effective-dated contract lookup, weekly overtime allocation, and
//! enhancement classification (bank holiday / weekend / base) under a
//! non-stacking policy, rolled up into day/week/month/department totals.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
