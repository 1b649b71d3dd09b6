//! Configuration types for the billing engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, plus the aggregated
//! [`FleetConfig`] snapshot the engine computes against.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Metadata about the fleet configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FleetMetadata {
    /// The human-readable name of the fleet or operating base.
    pub name: String,
    /// The branch code the configuration is scoped to.
    pub branch: String,
}

/// A route master record.
///
/// Routes are the unit every other configuration record hangs off: a run
/// references a route by name, and the route carries the customer it is
/// operated for, its billing category, and its timetable tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// The route name (unique within a branch).
    pub name: String,
    /// The customer the route is operated for.
    pub customer_id: String,
    /// The billing category code used to group invoice lines.
    pub category_code: String,
    /// Departure time as a 4-digit `HHMM` token. Hours 24–48 encode a
    /// departure past midnight that belongs operationally to the previous
    /// day. May be absent for routes with no fixed timetable.
    #[serde(default)]
    pub departure: Option<String>,
    /// Arrival time as a 4-digit `HHMM` token, same encoding.
    #[serde(default)]
    pub arrival: Option<String>,
}

/// Routes configuration file structure (`routes.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesConfig {
    /// All route master records for the branch.
    pub routes: Vec<RouteConfig>,
}

/// Categories configuration file structure (`categories.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesConfig {
    /// Map of billing category code to human-readable label.
    pub categories: HashMap<String, String>,
}

/// Per-route amounts within a monthly configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyAmounts {
    /// The postal-toll amount billed to the customer for the month.
    pub postal_toll_billing: Decimal,
    /// The general highway fee billed for the month, if any.
    #[serde(default)]
    pub general_fee: Option<Decimal>,
}

/// Monthly configuration file structure (`monthly/<YYYY-MM>.yaml`).
///
/// One file per calendar month; a month without a file simply has no
/// monthly config, which the derivation engine treats as zero amounts.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyConfigFile {
    /// The month this file applies to (first day of the month).
    pub month: NaiveDate,
    /// Map of route name to billed amounts.
    pub amounts: HashMap<String, MonthlyAmounts>,
}

/// A month-keyed toll-billing record for one route.
///
/// Applicable to a billing month only on an exact month match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMonthlyConfig {
    /// The route the record applies to.
    pub route_name: String,
    /// The month the record applies to (first day of the month).
    pub month: NaiveDate,
    /// The postal-toll amount billed to the customer for the month.
    pub postal_toll_billing: Decimal,
    /// The general highway fee billed for the month, if any.
    pub general_fee: Option<Decimal>,
}

/// Per-route fees within a fee schedule file.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteFees {
    /// The contracted base driver fee per run.
    pub driver_fee: Decimal,
    /// A supplemental fee per run, if any.
    #[serde(default)]
    pub supplemental_fee: Decimal,
}

/// Fee schedule file structure (`fees/<YYYY-MM-DD>.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct FeeScheduleFile {
    /// The date these fees take effect.
    pub effective_from: NaiveDate,
    /// Map of route name to fees.
    pub fees: HashMap<String, RouteFees>,
}

/// An effective-date-keyed fee record for one route.
///
/// Multiple records may exist per route; the one with the latest
/// `effective_from` on or before the run date applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFeeSchedule {
    /// The route the record applies to.
    pub route_name: String,
    /// The date the record takes effect.
    pub effective_from: NaiveDate,
    /// The contracted base driver fee per run.
    pub driver_fee: Decimal,
    /// A supplemental fee per run.
    pub supplemental_fee: Decimal,
}

/// The complete fleet configuration snapshot.
///
/// Aggregates everything loaded from a configuration directory. The engine
/// treats a `FleetConfig` as immutable for the duration of a computation
/// call; fee schedules are sorted ascending by effective date on
/// construction so temporal resolution can scan from the latest record
/// backwards.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Fleet metadata.
    metadata: FleetMetadata,
    /// Route master records by route name.
    routes: HashMap<String, RouteConfig>,
    /// Billing category labels by category code.
    categories: HashMap<String, String>,
    /// Month-keyed toll-billing records.
    monthly_configs: Vec<RouteMonthlyConfig>,
    /// Effective-date-keyed fee records (sorted oldest first).
    fee_schedules: Vec<RouteFeeSchedule>,
}

impl FleetConfig {
    /// Creates a new FleetConfig from its component parts.
    pub fn new(
        metadata: FleetMetadata,
        routes: Vec<RouteConfig>,
        categories: HashMap<String, String>,
        monthly_configs: Vec<RouteMonthlyConfig>,
        fee_schedules: Vec<RouteFeeSchedule>,
    ) -> Self {
        let routes = routes.into_iter().map(|r| (r.name.clone(), r)).collect();
        let mut sorted_schedules = fee_schedules;
        sorted_schedules.sort_by(|a, b| a.effective_from.cmp(&b.effective_from));
        Self {
            metadata,
            routes,
            categories,
            monthly_configs,
            fee_schedules: sorted_schedules,
        }
    }

    /// Returns the fleet metadata.
    pub fn metadata(&self) -> &FleetMetadata {
        &self.metadata
    }

    /// Looks up a route master record by name.
    pub fn route(&self, name: &str) -> Option<&RouteConfig> {
        self.routes.get(name)
    }

    /// Returns all route master records.
    pub fn routes(&self) -> impl Iterator<Item = &RouteConfig> {
        self.routes.values()
    }

    /// Returns the label for a billing category code, falling back to the
    /// code itself when no label is configured.
    pub fn category_label(&self, code: &str) -> String {
        self.categories
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    /// Returns the monthly toll-billing records for one route.
    pub fn monthly_configs_for(&self, route_name: &str) -> Vec<&RouteMonthlyConfig> {
        self.monthly_configs
            .iter()
            .filter(|c| c.route_name == route_name)
            .collect()
    }

    /// Returns the fee schedule records for one route, oldest first.
    pub fn fee_schedules_for(&self, route_name: &str) -> Vec<&RouteFeeSchedule> {
        self.fee_schedules
            .iter()
            .filter(|s| s.route_name == route_name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_config() -> FleetConfig {
        let metadata = FleetMetadata {
            name: "Chubu base".to_string(),
            branch: "nagoya-01".to_string(),
        };
        let routes = vec![RouteConfig {
            name: "tokyo-nagoya-1".to_string(),
            customer_id: "cust_001".to_string(),
            category_code: "01".to_string(),
            departure: Some("2330".to_string()),
            arrival: Some("2910".to_string()),
        }];
        let mut categories = HashMap::new();
        categories.insert("01".to_string(), "Scheduled mail runs".to_string());

        let fee_schedules = vec![
            RouteFeeSchedule {
                route_name: "tokyo-nagoya-1".to_string(),
                effective_from: make_date("2025-06-01"),
                driver_fee: dec("15000"),
                supplemental_fee: dec("0"),
            },
            RouteFeeSchedule {
                route_name: "tokyo-nagoya-1".to_string(),
                effective_from: make_date("2025-01-01"),
                driver_fee: dec("10000"),
                supplemental_fee: dec("0"),
            },
        ];

        FleetConfig::new(metadata, routes, categories, vec![], fee_schedules)
    }

    #[test]
    fn test_fee_schedules_sorted_on_construction() {
        let config = sample_config();
        let schedules = config.fee_schedules_for("tokyo-nagoya-1");
        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].effective_from, make_date("2025-01-01"));
        assert_eq!(schedules[1].effective_from, make_date("2025-06-01"));
    }

    #[test]
    fn test_route_lookup() {
        let config = sample_config();
        assert!(config.route("tokyo-nagoya-1").is_some());
        assert!(config.route("unknown").is_none());
    }

    #[test]
    fn test_category_label_falls_back_to_code() {
        let config = sample_config();
        assert_eq!(config.category_label("01"), "Scheduled mail runs");
        assert_eq!(config.category_label("99"), "99");
    }

    #[test]
    fn test_monthly_configs_for_unknown_route_is_empty() {
        let config = sample_config();
        assert!(config.monthly_configs_for("unknown").is_empty());
    }
}
