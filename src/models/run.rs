//! Scheduled run model.
//!
//! This module defines the [`ScheduledRun`] struct representing one
//! vehicle/driver dispatch on a route for a given date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents one scheduled vehicle/driver dispatch.
///
/// A run references its route by name; the route master record (customer,
/// billing category, departure time) lives in the fleet configuration.
/// Runs are created by an external scheduling system and are read-only to
/// the engine — the engine treats the collection it receives as an
/// immutable snapshot per call.
///
/// The two toll fields record what was actually paid at the gates for the
/// two toll classes tracked separately (postal-contract highway toll and
/// general highway toll). `None` means no charge was recorded for the run,
/// which the derivation engine treats as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledRun {
    /// Unique identifier for the run.
    pub id: String,
    /// The dispatch date of the run.
    ///
    /// Note that a run departing past midnight (departure hour 24–48) is
    /// recorded against the dispatch date but billed in the following
    /// month when the month boundary is crossed.
    pub date: NaiveDate,
    /// The name of the route this run was dispatched on.
    pub route_name: String,
    /// The driver assigned to the run.
    pub driver_id: String,
    /// The vehicle assigned to the run.
    pub vehicle_id: String,
    /// Postal-contract highway toll actually paid for this run.
    #[serde(default)]
    pub postal_toll_paid: Option<Decimal>,
    /// General highway toll actually paid for this run.
    #[serde(default)]
    pub general_toll_paid: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_run_serialization_round_trip() {
        let run = ScheduledRun {
            id: "run_001".to_string(),
            date: make_date("2025-10-15"),
            route_name: "tokyo-nagoya-1".to_string(),
            driver_id: "drv_012".to_string(),
            vehicle_id: "veh_044".to_string(),
            postal_toll_paid: Some(dec("2000")),
            general_toll_paid: None,
        };

        let json = serde_json::to_string(&run).unwrap();
        let deserialized: ScheduledRun = serde_json::from_str(&json).unwrap();
        assert_eq!(run, deserialized);
    }

    #[test]
    fn test_run_deserialization_defaults_missing_tolls() {
        let json = r#"{
            "id": "run_002",
            "date": "2025-10-16",
            "route_name": "tokyo-nagoya-1",
            "driver_id": "drv_012",
            "vehicle_id": "veh_044"
        }"#;

        let run: ScheduledRun = serde_json::from_str(json).unwrap();
        assert_eq!(run.postal_toll_paid, None);
        assert_eq!(run.general_toll_paid, None);
    }
}
