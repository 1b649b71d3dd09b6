//! Calculation logic for the billing engine.
//!
//! This module contains all the calculation functions for deriving billing
//! and payroll figures, including the overflow-aware departure-time codec,
//! billing-month resolution across midnight boundaries, temporal
//! configuration resolution, per-run fee derivation, grouping/aggregation,
//! and the invoice and payroll assembly entry points.

mod aggregation;
mod billing_month;
mod config_resolution;
mod fee_derivation;
mod invoice_assembly;
mod payroll_assembly;
mod time_token;

pub use aggregation::{AmountFn, GroupSummary, group_and_sum};
pub use billing_month::{first_of_month, resolve_billing_month};
pub use config_resolution::{resolve_fee_schedule, resolve_monthly_config};
pub use fee_derivation::{RUNS_IN_PERIOD, derive_row};
pub use invoice_assembly::{assemble_invoice, derive_rows, runs_for_customer_month};
pub use payroll_assembly::{PayrollInputs, assemble_payroll, assemble_payroll_batch};
pub use time_token::{DepartureTime, TimeFormat, compare_tokens};
