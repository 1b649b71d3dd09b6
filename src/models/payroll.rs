//! Payroll models.
//!
//! This module contains the externally supplied per-driver aggregates
//! (attendance, fuel, vehicle costs), the manually entered adjustment
//! record, and the [`PayrollRecord`] output for one driver-month.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Attendance counts for one driver-month, supplied by an external
/// attendance collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Days the driver worked.
    #[serde(default)]
    pub days_worked: u32,
    /// Days the driver was absent.
    #[serde(default)]
    pub absence_days: u32,
    /// Days worked on public holidays.
    #[serde(default)]
    pub holiday_work_days: u32,
}

/// Fuel and mileage aggregates for one driver-month, supplied by an
/// external fuel-history collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelSummary {
    /// Total fuel cost for the month.
    #[serde(default)]
    pub fuel_cost: Decimal,
    /// Total vehicle-wash cost for the month.
    #[serde(default)]
    pub wash_cost: Decimal,
    /// Total distance driven, in kilometres.
    #[serde(default)]
    pub distance_km: Decimal,
}

/// Vehicle cost aggregates for one driver-month, supplied by an external
/// vehicle-cost collaborator. Carried on the payroll record for reporting;
/// these do not enter the payout formula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleCostSummary {
    /// Lease cost attributed to the driver's vehicle for the month.
    #[serde(default)]
    pub lease_cost: Decimal,
    /// Insurance cost attributed to the driver's vehicle for the month.
    #[serde(default)]
    pub insurance_cost: Decimal,
}

/// Manually entered payroll adjustments for one driver-month.
///
/// Entered by an operator; every field defaults to zero (or to the standard
/// split) so that a missing record never aborts the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollAdjustments {
    /// Allowance paid per day worked.
    #[serde(default)]
    pub daily_allowance: Decimal,
    /// Other allowances, as a lump sum.
    #[serde(default)]
    pub other_allowance: Decimal,
    /// The driver's share of the net margin after fuel. `None` means the
    /// standard half split.
    #[serde(default)]
    pub split_rate: Option<Decimal>,
}

/// The computed payroll figures for one driver-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The driver this record is for.
    pub driver_id: String,
    /// The payroll month (first day of the month).
    pub month: NaiveDate,
    /// The number of runs the driver operated in the month.
    pub run_count: u32,
    /// Days worked, from attendance.
    pub days_worked: u32,
    /// Absence days, from attendance.
    pub absence_days: u32,
    /// Holiday work days, from attendance.
    pub holiday_work_days: u32,
    /// Distance driven in the month, from fuel history.
    pub distance_km: Decimal,
    /// Fuel cost for the month.
    pub fuel_cost: Decimal,
    /// Vehicle-wash cost for the month.
    pub wash_cost: Decimal,
    /// Vehicle lease cost for the month.
    pub lease_cost: Decimal,
    /// Vehicle insurance cost for the month.
    pub insurance_cost: Decimal,
    /// Total driver fees over the driver's derived rows.
    pub fee_total: Decimal,
    /// Total chargeable fees over the driver's derived rows.
    pub chargeable_fee_total: Decimal,
    /// Total 30% postal-toll employee shares.
    pub postal_share_total: Decimal,
    /// Total general-toll overage (paid minus billed, unclamped).
    pub toll_overage_total: Decimal,
    /// Total employee toll burden.
    pub employee_burden_total: Decimal,
    /// `days_worked * daily_allowance`.
    pub attendance_allowance: Decimal,
    /// Other allowances, from the adjustment record.
    pub other_allowance: Decimal,
    /// The split rate that was applied.
    pub split_rate: Decimal,
    /// The computed payout for the month.
    pub payout: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_aggregates_default_to_zero() {
        let attendance = AttendanceSummary::default();
        assert_eq!(attendance.days_worked, 0);
        assert_eq!(attendance.absence_days, 0);

        let fuel = FuelSummary::default();
        assert_eq!(fuel.fuel_cost, Decimal::ZERO);
        assert_eq!(fuel.distance_km, Decimal::ZERO);

        let adjustments = PayrollAdjustments::default();
        assert_eq!(adjustments.daily_allowance, Decimal::ZERO);
        assert_eq!(adjustments.split_rate, None);
    }

    #[test]
    fn test_adjustments_deserialize_with_missing_fields() {
        let adjustments: PayrollAdjustments = serde_json::from_str("{}").unwrap();
        assert_eq!(adjustments, PayrollAdjustments::default());

        let adjustments: PayrollAdjustments =
            serde_json::from_str(r#"{"other_allowance": "3000"}"#).unwrap();
        assert_eq!(adjustments.other_allowance, Decimal::new(3000, 0));
        assert_eq!(adjustments.split_rate, None);
    }

    #[test]
    fn test_fuel_summary_deserialize_with_missing_fields() {
        let fuel: FuelSummary = serde_json::from_str(r#"{"fuel_cost": "12500"}"#).unwrap();
        assert_eq!(fuel.fuel_cost, Decimal::new(12500, 0));
        assert_eq!(fuel.wash_cost, Decimal::ZERO);
    }
}
