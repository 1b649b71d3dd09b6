//! Billing-month resolution.
//!
//! A run dispatched at 23:00 but completing at 01:00 is recorded against
//! the dispatch date, but when its departure token carries an hour of 24
//! or more the run must be billed in the month of the calendar day it
//! actually executes on. This module resolves a run's date and departure
//! token to the calendar month its charges are attributed to.

use chrono::{Datelike, Days, NaiveDate};

use super::time_token::DepartureTime;

/// Returns the first day of the month `date` falls in.
///
/// # Examples
///
/// ```
/// use fleet_billing::calculation::first_of_month;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
/// assert_eq!(first_of_month(date), NaiveDate::from_ymd_opt(2025, 10, 1).unwrap());
/// ```
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // with_day(1) cannot fail: every month has a day 1.
    date.with_day(1).unwrap_or(date)
}

/// Resolves the billing month for a run (first day of the month).
///
/// - An absent or unparseable departure token attributes the run to the
///   month of its dispatch date.
/// - A parsed hour of 24 or more attributes the run to the month of
///   `run_date + 1 day` — the calendar day it executes on.
/// - Otherwise the run bills in the month of its dispatch date.
///
/// # Examples
///
/// ```
/// use fleet_billing::calculation::resolve_billing_month;
/// use chrono::NaiveDate;
///
/// let eom = NaiveDate::from_ymd_opt(2025, 10, 31).unwrap();
/// let november = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
/// let october = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
///
/// assert_eq!(resolve_billing_month(eom, Some("2500")), november);
/// assert_eq!(resolve_billing_month(eom, Some("2000")), october);
/// assert_eq!(resolve_billing_month(eom, None), october);
/// ```
pub fn resolve_billing_month(run_date: NaiveDate, departure_token: Option<&str>) -> NaiveDate {
    let crosses = departure_token
        .and_then(DepartureTime::parse)
        .is_some_and(|t| t.crosses_midnight());

    if crosses {
        let execution_date = run_date
            .checked_add_days(Days::new(1))
            .unwrap_or(run_date);
        first_of_month(execution_date)
    } else {
        first_of_month(run_date)
    }
}
