//! Derived row model.
//!
//! This module contains the [`DerivedRow`] type produced by the fee
//! derivation engine — the full set of computed monetary fields for one
//! scheduled run, plus the keys that identify where the row belongs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The computed monetary fields for one scheduled run.
///
/// A `DerivedRow` is created fresh on every computation call and held only
/// in the caller's scope; the engine keeps no persistent state. All
/// monetary fields are plain decimals with no currency rounding — rounding
/// is applied only at final presentation (the invoice tax line).
///
/// Two identities hold for every row by construction:
///
/// ```text
/// driver_chargeable_fee = total_driver_fee - (postal_toll_employee_share + toll_overage)
/// employee_toll_burden  = postal_toll_paid - (postal_toll_billed + postal_toll_employee_share)
/// ```
///
/// # Example
///
/// ```
/// use fleet_billing::models::DerivedRow;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let row = DerivedRow {
///     run_id: "run_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
///     billing_month: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
///     route_name: "tokyo-nagoya-1".to_string(),
///     category_code: "01".to_string(),
///     customer_id: "cust_001".to_string(),
///     driver_id: "drv_012".to_string(),
///     vehicle_id: "veh_044".to_string(),
///     departure: Some("2330".to_string()),
///     runs_in_period: Decimal::ONE,
///     driver_fee: Decimal::new(10_000, 0),
///     supplemental_fee: Decimal::ZERO,
///     total_driver_fee: Decimal::new(10_000, 0),
///     postal_toll_billed: Decimal::ZERO,
///     postal_toll_paid: Decimal::new(2_000, 0),
///     postal_toll_employee_share: Decimal::new(600, 0),
///     employee_toll_burden: Decimal::new(1_400, 0),
///     general_toll_billed: Decimal::ZERO,
///     general_toll_paid: Decimal::ZERO,
///     toll_overage: Decimal::ZERO,
///     driver_chargeable_fee: Decimal::new(9_400, 0),
/// };
/// assert_eq!(
///     row.driver_chargeable_fee,
///     row.total_driver_fee - (row.postal_toll_employee_share + row.toll_overage)
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRow {
    /// The run this row was derived from.
    pub run_id: String,
    /// The dispatch date of the run.
    pub date: NaiveDate,
    /// The billing month the run resolved to (first day of the month).
    pub billing_month: NaiveDate,
    /// The route the run was dispatched on.
    pub route_name: String,
    /// The billing category code of the route.
    pub category_code: String,
    /// The customer the route belongs to.
    pub customer_id: String,
    /// The driver assigned to the run.
    pub driver_id: String,
    /// The vehicle assigned to the run.
    pub vehicle_id: String,
    /// The raw departure token from the route master, if recorded.
    pub departure: Option<String>,
    /// The number of runs the monthly toll-billing amount is split across.
    pub runs_in_period: Decimal,
    /// The base driver fee from the resolved fee schedule.
    pub driver_fee: Decimal,
    /// The supplemental fee from the resolved fee schedule.
    pub supplemental_fee: Decimal,
    /// `driver_fee + supplemental_fee`.
    pub total_driver_fee: Decimal,
    /// The postal toll billed to the customer for this run (monthly amount
    /// divided by `runs_in_period`).
    pub postal_toll_billed: Decimal,
    /// The postal toll actually paid at the gates.
    pub postal_toll_paid: Decimal,
    /// 30% of the paid postal toll, allocated to the employee.
    pub postal_toll_employee_share: Decimal,
    /// `postal_toll_paid - (postal_toll_billed + postal_toll_employee_share)`.
    pub employee_toll_burden: Decimal,
    /// The general toll billed per the monthly config.
    pub general_toll_billed: Decimal,
    /// The general toll actually paid at the gates.
    pub general_toll_paid: Decimal,
    /// `general_toll_paid - general_toll_billed`; negative when the driver
    /// paid less than was billed, and carried unclamped either way.
    pub toll_overage: Decimal,
    /// `total_driver_fee - (postal_toll_employee_share + toll_overage)`.
    pub driver_chargeable_fee: Decimal,
}

impl DerivedRow {
    /// Returns the toll amount billed to the customer for this run
    /// (postal plus general).
    pub fn billed_toll_total(&self) -> Decimal {
        self.postal_toll_billed + self.general_toll_billed
    }
}
