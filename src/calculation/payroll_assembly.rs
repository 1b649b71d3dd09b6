//! Payroll assembly.
//!
//! Combines per-driver derived-row aggregates with externally supplied
//! attendance, fuel, and vehicle-cost aggregates, plus a manually entered
//! adjustment record, into one payroll record per driver-month. The payout
//! is a straight-line formula with no branching; missing inputs default to
//! zero rather than aborting the batch.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use super::aggregation::group_and_sum;
use super::invoice_assembly::derive_rows;
use crate::config::FleetConfig;
use crate::models::{
    AttendanceSummary, DerivedRow, FuelSummary, PayrollAdjustments, PayrollRecord, ScheduledRun,
    VehicleCostSummary,
};

/// The standard driver share of the net margin after fuel, applied when no
/// split rate was entered.
const DEFAULT_SPLIT_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 1); // 0.5

/// The externally supplied inputs for one driver-month.
///
/// Attendance, fuel, and vehicle costs come from separate collaborators;
/// the adjustments are entered by an operator. Every part defaults to
/// zeroes, so a driver with no record in a collaborator's system still
/// gets a payroll record.
#[derive(Debug, Clone, Default)]
pub struct PayrollInputs {
    /// Attendance counts for the month.
    pub attendance: AttendanceSummary,
    /// Fuel and mileage aggregates for the month.
    pub fuel: FuelSummary,
    /// Vehicle cost aggregates for the month.
    pub vehicle_costs: VehicleCostSummary,
    /// Manually entered adjustments.
    pub adjustments: PayrollAdjustments,
}

/// Assembles the payroll record for one driver and month.
///
/// `rows` may contain rows for other drivers or months; only the rows
/// matching `driver_id` whose billing month equals `month` enter the
/// figures. The payout formula:
///
/// ```text
/// fee_total            = Σ total_driver_fee
/// net_after_fuel       = fee_total - fuel_cost - wash_cost
/// base_payout          = net_after_fuel * split_rate        (default 0.5)
/// attendance_allowance = days_worked * daily_allowance
/// payout               = base_payout - Σ toll_overage
///                        + attendance_allowance + other_allowance
/// ```
///
/// A negative toll-overage total credits the payout, mirroring the
/// unclamped per-row behavior.
pub fn assemble_payroll(
    driver_id: &str,
    month: NaiveDate,
    rows: &[DerivedRow],
    inputs: &PayrollInputs,
) -> PayrollRecord {
    let driver_rows: Vec<&DerivedRow> = rows
        .iter()
        .filter(|r| r.driver_id == driver_id && r.billing_month == month)
        .collect();

    let mut fee_total = Decimal::ZERO;
    let mut chargeable_fee_total = Decimal::ZERO;
    let mut postal_share_total = Decimal::ZERO;
    let mut toll_overage_total = Decimal::ZERO;
    let mut employee_burden_total = Decimal::ZERO;
    for row in &driver_rows {
        fee_total += row.total_driver_fee;
        chargeable_fee_total += row.driver_chargeable_fee;
        postal_share_total += row.postal_toll_employee_share;
        toll_overage_total += row.toll_overage;
        employee_burden_total += row.employee_toll_burden;
    }

    let split_rate = inputs.adjustments.split_rate.unwrap_or(DEFAULT_SPLIT_RATE);
    let net_after_fuel = fee_total - inputs.fuel.fuel_cost - inputs.fuel.wash_cost;
    let base_payout = net_after_fuel * split_rate;
    let attendance_allowance =
        Decimal::from(inputs.attendance.days_worked) * inputs.adjustments.daily_allowance;
    let payout = base_payout - toll_overage_total
        + attendance_allowance
        + inputs.adjustments.other_allowance;

    PayrollRecord {
        driver_id: driver_id.to_string(),
        month,
        run_count: driver_rows.len() as u32,
        days_worked: inputs.attendance.days_worked,
        absence_days: inputs.attendance.absence_days,
        holiday_work_days: inputs.attendance.holiday_work_days,
        distance_km: inputs.fuel.distance_km,
        fuel_cost: inputs.fuel.fuel_cost,
        wash_cost: inputs.fuel.wash_cost,
        lease_cost: inputs.vehicle_costs.lease_cost,
        insurance_cost: inputs.vehicle_costs.insurance_cost,
        fee_total,
        chargeable_fee_total,
        postal_share_total,
        toll_overage_total,
        employee_burden_total,
        attendance_allowance,
        other_allowance: inputs.adjustments.other_allowance,
        split_rate,
        payout,
    }
}

/// Assembles payroll records for every driver with runs in a month.
///
/// Rows are derived from the run snapshot, filtered to the month, and
/// grouped by driver in first-seen order. Drivers missing from
/// `inputs_by_driver` get default (all-zero) inputs.
pub fn assemble_payroll_batch(
    runs: &[ScheduledRun],
    config: &FleetConfig,
    month: NaiveDate,
    inputs_by_driver: &HashMap<String, PayrollInputs>,
) -> Vec<PayrollRecord> {
    let rows: Vec<DerivedRow> = derive_rows(runs, config)
        .into_iter()
        .filter(|r| r.billing_month == month)
        .collect();

    let drivers = group_and_sum(&rows, |r| r.driver_id.clone(), &[]);
    debug!(month = %month, drivers = drivers.len(), "assembling payroll batch");

    let default_inputs = PayrollInputs::default();
    drivers
        .into_iter()
        .map(|group| {
            let inputs = inputs_by_driver.get(&group.key).unwrap_or(&default_inputs);
            assemble_payroll(&group.key, month, &rows, inputs)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FleetMetadata, RouteConfig, RouteFeeSchedule};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(driver: &str, month: &str, fee: &str, overage: &str) -> DerivedRow {
        DerivedRow {
            run_id: "run_x".to_string(),
            date: make_date(month),
            billing_month: make_date(month),
            route_name: "r1".to_string(),
            category_code: "01".to_string(),
            customer_id: "cust_001".to_string(),
            driver_id: driver.to_string(),
            vehicle_id: "veh_001".to_string(),
            departure: None,
            runs_in_period: Decimal::ONE,
            driver_fee: dec(fee),
            supplemental_fee: Decimal::ZERO,
            total_driver_fee: dec(fee),
            postal_toll_billed: Decimal::ZERO,
            postal_toll_paid: Decimal::ZERO,
            postal_toll_employee_share: Decimal::ZERO,
            employee_toll_burden: Decimal::ZERO,
            general_toll_billed: Decimal::ZERO,
            general_toll_paid: dec(overage),
            toll_overage: dec(overage),
            driver_chargeable_fee: dec(fee) - dec(overage),
        }
    }

    /// PA-001: the payout formula chain
    #[test]
    fn test_payout_formula() {
        let rows = vec![
            row("drv_1", "2025-10-01", "10000", "0"),
            row("drv_1", "2025-10-01", "10000", "500"),
        ];
        let inputs = PayrollInputs {
            attendance: AttendanceSummary {
                days_worked: 20,
                absence_days: 1,
                holiday_work_days: 2,
            },
            fuel: FuelSummary {
                fuel_cost: dec("4000"),
                wash_cost: dec("0"),
                distance_km: dec("3200"),
            },
            vehicle_costs: VehicleCostSummary::default(),
            adjustments: PayrollAdjustments {
                daily_allowance: dec("100"),
                other_allowance: dec("3000"),
                split_rate: None,
            },
        };

        let record = assemble_payroll("drv_1", make_date("2025-10-01"), &rows, &inputs);

        assert_eq!(record.run_count, 2);
        assert_eq!(record.fee_total, dec("20000"));
        // (20000 - 4000) * 0.5 = 8000; minus overage 500; plus 20*100; plus 3000
        assert_eq!(record.payout, dec("12500.0"));
        assert_eq!(record.split_rate, dec("0.5"));
        assert_eq!(record.attendance_allowance, dec("2000"));
    }

    /// PA-002: an entered split rate replaces the standard half
    #[test]
    fn test_entered_split_rate() {
        let rows = vec![row("drv_1", "2025-10-01", "10000", "0")];
        let inputs = PayrollInputs {
            adjustments: PayrollAdjustments {
                split_rate: Some(dec("0.6")),
                ..Default::default()
            },
            ..Default::default()
        };

        let record = assemble_payroll("drv_1", make_date("2025-10-01"), &rows, &inputs);
        assert_eq!(record.split_rate, dec("0.6"));
        assert_eq!(record.payout, dec("6000.0"));
    }

    /// PA-003: missing inputs default to zero and never abort
    #[test]
    fn test_missing_inputs_default() {
        let rows = vec![row("drv_1", "2025-10-01", "10000", "0")];
        let record = assemble_payroll(
            "drv_1",
            make_date("2025-10-01"),
            &rows,
            &PayrollInputs::default(),
        );

        assert_eq!(record.fuel_cost, Decimal::ZERO);
        assert_eq!(record.attendance_allowance, Decimal::ZERO);
        assert_eq!(record.payout, dec("5000.0"));
    }

    /// PA-004: only the driver's rows in the requested month count
    #[test]
    fn test_filters_driver_and_month() {
        let rows = vec![
            row("drv_1", "2025-10-01", "10000", "0"),
            row("drv_2", "2025-10-01", "99999", "0"),
            row("drv_1", "2025-11-01", "99999", "0"),
        ];

        let record = assemble_payroll(
            "drv_1",
            make_date("2025-10-01"),
            &rows,
            &PayrollInputs::default(),
        );
        assert_eq!(record.run_count, 1);
        assert_eq!(record.fee_total, dec("10000"));
    }

    /// PA-005: negative overage credits the payout
    #[test]
    fn test_negative_overage_credits_payout() {
        let rows = vec![row("drv_1", "2025-10-01", "10000", "-200")];
        let record = assemble_payroll(
            "drv_1",
            make_date("2025-10-01"),
            &rows,
            &PayrollInputs::default(),
        );
        // 10000 * 0.5 - (-200) = 5200
        assert_eq!(record.payout, dec("5200.0"));
    }

    /// PA-006: the batch emits one record per driver in first-seen order
    #[test]
    fn test_batch_one_record_per_driver() {
        let config = FleetConfig::new(
            FleetMetadata {
                name: "Chubu base".to_string(),
                branch: "nagoya-01".to_string(),
            },
            vec![RouteConfig {
                name: "r1".to_string(),
                customer_id: "cust_001".to_string(),
                category_code: "01".to_string(),
                departure: None,
                arrival: None,
            }],
            HashMap::new(),
            vec![],
            vec![RouteFeeSchedule {
                route_name: "r1".to_string(),
                effective_from: make_date("2025-01-01"),
                driver_fee: dec("10000"),
                supplemental_fee: Decimal::ZERO,
            }],
        );
        let run = |id: &str, date: &str, driver: &str| ScheduledRun {
            id: id.to_string(),
            date: make_date(date),
            route_name: "r1".to_string(),
            driver_id: driver.to_string(),
            vehicle_id: "veh_001".to_string(),
            postal_toll_paid: None,
            general_toll_paid: None,
        };
        let runs = vec![
            run("run_1", "2025-10-01", "drv_b"),
            run("run_2", "2025-10-02", "drv_a"),
            run("run_3", "2025-10-03", "drv_b"),
            run("run_4", "2025-11-01", "drv_c"), // out of month
        ];

        let records = assemble_payroll_batch(
            &runs,
            &config,
            make_date("2025-10-01"),
            &HashMap::new(),
        );

        let drivers: Vec<_> = records.iter().map(|r| r.driver_id.as_str()).collect();
        assert_eq!(drivers, vec!["drv_b", "drv_a"]);
        assert_eq!(records[0].run_count, 2);
        assert_eq!(records[1].run_count, 1);
    }
}
