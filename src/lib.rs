//! Billing and driver payroll engine for scheduled fleet operations.
//!
//! This crate derives the monetary figures for scheduled vehicle runs (toll
//! splits, driver fees, employer/employee highway-cost allocation), resolves
//! which time-versioned fee record applies to a run, assigns runs to billing
//! months across midnight boundaries, and aggregates the derived rows into
//! per-customer invoices and per-driver payroll records.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod overrides;
