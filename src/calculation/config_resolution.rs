//! Temporal configuration resolution.
//!
//! Two resolution strategies over time-versioned configuration records,
//! selected by entity type: monthly toll-billing records match their
//! billing month exactly, while fee schedules apply from an effective date
//! onwards until superseded. Both are pure functions over pre-filtered
//! candidate collections — no caching, no I/O; callers load and scope the
//! candidates (typically to one route) beforehand.

use chrono::NaiveDate;

use crate::config::{RouteFeeSchedule, RouteMonthlyConfig};

/// Resolves the monthly toll-billing record for a billing month.
///
/// Month-keyed records are applicable only on an exact match of their
/// version key against the run's billing month.
///
/// # Examples
///
/// ```
/// use fleet_billing::calculation::resolve_monthly_config;
/// use fleet_billing::config::RouteMonthlyConfig;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let october = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let records = vec![RouteMonthlyConfig {
///     route_name: "tokyo-nagoya-1".to_string(),
///     month: october,
///     postal_toll_billing: Decimal::new(26_400, 0),
///     general_fee: None,
/// }];
///
/// assert!(resolve_monthly_config(october, &records).is_some());
/// let november = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
/// assert!(resolve_monthly_config(november, &records).is_none());
/// ```
pub fn resolve_monthly_config<'a>(
    billing_month: NaiveDate,
    candidates: impl IntoIterator<Item = &'a RouteMonthlyConfig>,
) -> Option<&'a RouteMonthlyConfig> {
    candidates.into_iter().find(|c| c.month == billing_month)
}

/// Resolves the fee schedule record applicable on a run date.
///
/// Effective-date-keyed records apply on an interval: the record with the
/// latest `effective_from` on or before the run date wins. A record whose
/// effective date is strictly after the run date is never selected. When
/// no record qualifies the result is `None` and callers treat all fee
/// fields as zero — absence of billing configuration for a route is a
/// normal, valid state.
///
/// # Examples
///
/// ```
/// use fleet_billing::calculation::resolve_fee_schedule;
/// use fleet_billing::config::RouteFeeSchedule;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let schedule = |from: (i32, u32, u32), fee: i64| RouteFeeSchedule {
///     route_name: "tokyo-nagoya-1".to_string(),
///     effective_from: NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
///     driver_fee: Decimal::new(fee, 0),
///     supplemental_fee: Decimal::ZERO,
/// };
/// let records = vec![schedule((2025, 1, 1), 100), schedule((2025, 6, 1), 150)];
///
/// let run_date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
/// let resolved = resolve_fee_schedule(run_date, &records).unwrap();
/// assert_eq!(resolved.driver_fee, Decimal::new(100, 0));
/// ```
pub fn resolve_fee_schedule<'a>(
    run_date: NaiveDate,
    candidates: impl IntoIterator<Item = &'a RouteFeeSchedule>,
) -> Option<&'a RouteFeeSchedule> {
    candidates
        .into_iter()
        .filter(|s| s.effective_from <= run_date)
        .max_by_key(|s| s.effective_from)
}
