//! Invoice assembly.
//!
//! Orchestrates billing-month resolution, fee derivation, and aggregation
//! for one customer and month, then merges in a persisted manual-override
//! snapshot when one exists.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::aggregation::group_and_sum;
use super::billing_month::resolve_billing_month;
use super::config_resolution::{resolve_fee_schedule, resolve_monthly_config};
use super::fee_derivation::derive_row;
use crate::config::FleetConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CategoryDetail, CategorySummary, CustomerInfo, DerivedRow, Invoice, ScheduledRun,
};
use crate::overrides::OverrideStore;

/// The consumption tax rate applied to invoice totals.
const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1); // 0.1

/// Derives a row for every run in the snapshot.
///
/// For each run the route master record is looked up, the billing month
/// resolved from the route's departure token, and the monthly and fee
/// schedule records resolved for that month and date. A run referencing a
/// route that is not in the configuration cannot be priced or attributed
/// to a customer; it is skipped with a warning rather than aborting the
/// batch.
pub fn derive_rows<'a>(
    runs: impl IntoIterator<Item = &'a ScheduledRun>,
    config: &FleetConfig,
) -> Vec<DerivedRow> {
    let mut rows = Vec::new();

    for run in runs {
        let Some(route) = config.route(&run.route_name) else {
            warn!(run_id = %run.id, route = %run.route_name, "run references unknown route, skipping");
            continue;
        };

        let billing_month = resolve_billing_month(run.date, route.departure.as_deref());
        let monthly =
            resolve_monthly_config(billing_month, config.monthly_configs_for(&route.name));
        let schedule = resolve_fee_schedule(run.date, config.fee_schedules_for(&route.name));

        rows.push(derive_row(run, route, monthly, schedule));
    }

    rows
}

/// Filters runs to those operated for `customer_id` whose resolved billing
/// month equals `billing_month`.
pub fn runs_for_customer_month<'a>(
    runs: &'a [ScheduledRun],
    config: &FleetConfig,
    customer_id: &str,
    billing_month: NaiveDate,
) -> Vec<&'a ScheduledRun> {
    runs.iter()
        .filter(|run| {
            config.route(&run.route_name).is_some_and(|route| {
                route.customer_id == customer_id
                    && resolve_billing_month(run.date, route.departure.as_deref()) == billing_month
            })
        })
        .collect()
}

/// Assembles the invoice for one customer and billing month.
///
/// 1. Runs are filtered to the customer and billing month (billing-month
///    resolution honors past-midnight departures).
/// 2. A row is derived per run and aggregated into route-level details and
///    category summaries, both in first-seen order.
/// 3. `total_amount` sums the category summaries; `tax_amount` is 10% of
///    that, floored to a whole amount; `grand_total` adds the two.
/// 4. If the override store holds a snapshot for this customer/month, its
///    lines replace the computed ones and the totals are recomputed from
///    the snapshot. Deleting the snapshot makes the next call fall through
///    to a fresh computation.
///
/// # Errors
///
/// - [`EngineError::NoBillableData`] when no runs match step 1 — an empty
///   invoice is indistinguishable from a selection mistake upstream.
/// - [`EngineError::OverrideStorage`] when the override store fails;
///   storage failures are surfaced unchanged.
pub fn assemble_invoice(
    customer: &CustomerInfo,
    billing_month: NaiveDate,
    runs: &[ScheduledRun],
    config: &FleetConfig,
    override_store: &dyn OverrideStore,
) -> EngineResult<Invoice> {
    let matching = runs_for_customer_month(runs, config, &customer.id, billing_month);

    if matching.is_empty() {
        return Err(EngineError::NoBillableData {
            customer_id: customer.id.clone(),
            billing_month,
        });
    }

    debug!(
        customer = %customer.id,
        month = %billing_month,
        runs = matching.len(),
        "assembling invoice"
    );

    let rows = derive_rows(matching, config);
    let details = build_details(&rows);
    let summary = build_summary(&rows, config);

    let (summary, details) =
        match override_store.find(&customer.id, billing_month)? {
            Some(snapshot) => {
                debug!(customer = %customer.id, month = %billing_month, "applying manual override");
                (snapshot.summary, snapshot.details)
            }
            None => (summary, details),
        };

    let total_amount: Decimal = summary.iter().map(|s| s.total_amount).sum();
    let tax_amount = (total_amount * TAX_RATE).floor();

    Ok(Invoice {
        customer: customer.clone(),
        billing_month,
        total_amount,
        tax_amount,
        grand_total: total_amount + tax_amount,
        summary_by_category: summary,
        details_by_category: details,
    })
}

/// Rolls derived rows up into route-level details within each category.
fn build_details(rows: &[DerivedRow]) -> Vec<CategoryDetail> {
    let groups = group_and_sum(
        rows,
        |r| (r.category_code.clone(), r.route_name.clone()),
        &[
            ("fee", |r: &DerivedRow| r.total_driver_fee),
            ("toll", |r: &DerivedRow| r.billed_toll_total()),
        ],
    );

    groups
        .into_iter()
        .map(|group| {
            let fee_amount = group.sum("fee");
            let toll_amount = group.sum("toll");
            let run_count = group.count;
            let (category_code, route_name) = group.key;
            // The prevailing per-run fee: the first row of the group.
            let unit_price = rows
                .iter()
                .find(|r| r.category_code == category_code && r.route_name == route_name)
                .map(|r| r.total_driver_fee)
                .unwrap_or(Decimal::ZERO);

            CategoryDetail {
                category_code,
                route_name,
                run_count,
                unit_price,
                fee_amount,
                toll_amount,
                total_amount: fee_amount + toll_amount,
            }
        })
        .collect()
}

/// Rolls derived rows up into one summary line per billing category.
fn build_summary(rows: &[DerivedRow], config: &FleetConfig) -> Vec<CategorySummary> {
    let groups = group_and_sum(
        rows,
        |r| r.category_code.clone(),
        &[
            ("fee", |r: &DerivedRow| r.total_driver_fee),
            ("toll", |r: &DerivedRow| r.billed_toll_total()),
        ],
    );

    groups
        .into_iter()
        .map(|group| {
            let total_amount = group.sum("fee") + group.sum("toll");
            CategorySummary {
                label: config.category_label(&group.key),
                run_count: group.count,
                category_code: group.key,
                total_amount,
            }
        })
        .collect()
}
