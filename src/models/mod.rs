//! Core data models for the billing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod derived_row;
mod invoice;
mod payroll;
mod run;

pub use derived_row::DerivedRow;
pub use invoice::{CategoryDetail, CategorySummary, CustomerInfo, Invoice, ManualOverride};
pub use payroll::{
    AttendanceSummary, FuelSummary, PayrollAdjustments, PayrollRecord, VehicleCostSummary,
};
pub use run::ScheduledRun;
