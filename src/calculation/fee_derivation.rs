//! Per-run fee derivation.
//!
//! Given one scheduled run plus its resolved monthly toll-billing record
//! and fee schedule record, computes the full set of derived monetary
//! fields for that run. All fields stay unrounded decimals; rounding is
//! applied only at final presentation (the invoice tax line).

use rust_decimal::Decimal;

use super::billing_month::resolve_billing_month;
use crate::config::{RouteConfig, RouteFeeSchedule, RouteMonthlyConfig};
use crate::models::{DerivedRow, ScheduledRun};

/// The number of runs a monthly toll-billing amount is split across.
///
/// Currently fixed at one: each run carries the full monthly billed
/// amount. Kept as a named quantity (and echoed on every derived row) so
/// the split can change without a shape change.
pub const RUNS_IN_PERIOD: Decimal = Decimal::ONE;

/// The share of the paid postal toll allocated to the employee.
const EMPLOYEE_TOLL_SHARE: Decimal = Decimal::from_parts(3, 0, 0, false, 1); // 0.3

/// Derives the monetary row for one scheduled run.
///
/// `monthly` and `schedule` are the records resolved for the run's billing
/// month and date (see [`resolve_monthly_config`] and
/// [`resolve_fee_schedule`]); either may be `None`, in which case the
/// corresponding amounts are zero. A run with no resolvable fee schedule
/// yields all fee fields zero, not an error — absence of billing
/// configuration for a route is a normal state.
///
/// The computed fields:
///
/// ```text
/// postal_toll_billed         = monthly.postal_toll_billing / RUNS_IN_PERIOD
/// postal_toll_paid           = run.postal_toll_paid            (0 if absent)
/// general_toll_billed        = monthly.general_fee             (0 if absent)
/// general_toll_paid          = run.general_toll_paid           (0 if absent)
/// total_driver_fee           = schedule.driver_fee + schedule.supplemental_fee
/// postal_toll_employee_share = postal_toll_paid * 0.3
/// employee_toll_burden       = postal_toll_paid - (postal_toll_billed + postal_toll_employee_share)
/// toll_overage               = general_toll_paid - general_toll_billed
/// driver_chargeable_fee      = total_driver_fee - (postal_toll_employee_share + toll_overage)
/// ```
///
/// A negative `toll_overage` (the driver paid less general toll than was
/// billed) is carried through unclamped.
///
/// [`resolve_monthly_config`]: super::resolve_monthly_config
/// [`resolve_fee_schedule`]: super::resolve_fee_schedule
pub fn derive_row(
    run: &ScheduledRun,
    route: &RouteConfig,
    monthly: Option<&RouteMonthlyConfig>,
    schedule: Option<&RouteFeeSchedule>,
) -> DerivedRow {
    let billing_month = resolve_billing_month(run.date, route.departure.as_deref());

    let postal_toll_billed = monthly
        .map(|m| m.postal_toll_billing / RUNS_IN_PERIOD)
        .unwrap_or(Decimal::ZERO);
    let general_toll_billed = monthly
        .and_then(|m| m.general_fee)
        .unwrap_or(Decimal::ZERO);

    let postal_toll_paid = run.postal_toll_paid.unwrap_or(Decimal::ZERO);
    let general_toll_paid = run.general_toll_paid.unwrap_or(Decimal::ZERO);

    let driver_fee = schedule.map(|s| s.driver_fee).unwrap_or(Decimal::ZERO);
    let supplemental_fee = schedule
        .map(|s| s.supplemental_fee)
        .unwrap_or(Decimal::ZERO);
    let total_driver_fee = driver_fee + supplemental_fee;

    let postal_toll_employee_share = postal_toll_paid * EMPLOYEE_TOLL_SHARE;
    let employee_toll_burden =
        postal_toll_paid - (postal_toll_billed + postal_toll_employee_share);
    let toll_overage = general_toll_paid - general_toll_billed;
    let driver_chargeable_fee = total_driver_fee - (postal_toll_employee_share + toll_overage);

    DerivedRow {
        run_id: run.id.clone(),
        date: run.date,
        billing_month,
        route_name: route.name.clone(),
        category_code: route.category_code.clone(),
        customer_id: route.customer_id.clone(),
        driver_id: run.driver_id.clone(),
        vehicle_id: run.vehicle_id.clone(),
        departure: route.departure.clone(),
        runs_in_period: RUNS_IN_PERIOD,
        driver_fee,
        supplemental_fee,
        total_driver_fee,
        postal_toll_billed,
        postal_toll_paid,
        postal_toll_employee_share,
        employee_toll_burden,
        general_toll_billed,
        general_toll_paid,
        toll_overage,
        driver_chargeable_fee,
    }
}
