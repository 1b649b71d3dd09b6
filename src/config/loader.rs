//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading fleet
//! configuration from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::calculation::{resolve_fee_schedule, resolve_monthly_config};
use crate::error::{EngineError, EngineResult};

use super::types::{
    CategoriesConfig, FeeScheduleFile, FleetConfig, FleetMetadata, MonthlyConfigFile,
    RouteFeeSchedule, RouteMonthlyConfig, RoutesConfig,
};

/// Loads and provides access to fleet configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// provides lookups over routes, monthly billing amounts, and fee
/// schedules.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/fleet/
/// ├── fleet.yaml       # Fleet metadata
/// ├── routes.yaml      # Route master records
/// ├── categories.yaml  # Billing category labels
/// ├── monthly/
/// │   └── 2025-10.yaml # Toll-billing amounts for this month
/// └── fees/
///     └── 2025-01-01.yaml # Driver fees effective from this date
/// ```
///
/// The `monthly/` directory may be sparse or absent — a month without a
/// file simply resolves to no monthly config. The `fees/` directory must
/// contain at least one file.
///
/// # Example
///
/// ```no_run
/// use fleet_billing::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/fleet").unwrap();
///
/// let date = NaiveDate::from_ymd_opt(2025, 10, 15).unwrap();
/// if let Some(fees) = loader.fee_for_route("tokyo-nagoya-1", date) {
///     println!("Driver fee: {}", fees.driver_fee);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: FleetConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/fleet")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - A required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML (`ConfigParseError`)
    /// - A monthly or fee record references a route that is not in the
    ///   route master (`RouteNotFound`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        // Load fleet.yaml
        let fleet_path = path.join("fleet.yaml");
        let metadata = Self::load_yaml::<FleetMetadata>(&fleet_path)?;

        // Load routes.yaml
        let routes_path = path.join("routes.yaml");
        let routes_config = Self::load_yaml::<RoutesConfig>(&routes_path)?;

        // Load categories.yaml
        let categories_path = path.join("categories.yaml");
        let categories_config = Self::load_yaml::<CategoriesConfig>(&categories_path)?;

        // Load all monthly files from the monthly directory
        let monthly_dir = path.join("monthly");
        let monthly_configs = Self::load_monthly(&monthly_dir)?;

        // Load all fee schedule files from the fees directory
        let fees_dir = path.join("fees");
        let fee_schedules = Self::load_fees(&fees_dir)?;

        // Cross-check that every amount/fee record points at a known route
        for record in &monthly_configs {
            if !routes_config.routes.iter().any(|r| r.name == record.route_name) {
                return Err(EngineError::RouteNotFound {
                    name: record.route_name.clone(),
                });
            }
        }
        for record in &fee_schedules {
            if !routes_config.routes.iter().any(|r| r.name == record.route_name) {
                return Err(EngineError::RouteNotFound {
                    name: record.route_name.clone(),
                });
            }
        }

        debug!(
            routes = routes_config.routes.len(),
            monthly = monthly_configs.len(),
            fees = fee_schedules.len(),
            "loaded fleet configuration"
        );

        let config = FleetConfig::new(
            metadata,
            routes_config.routes,
            categories_config.categories,
            monthly_configs,
            fee_schedules,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all monthly files, flattening the per-route amount maps into
    /// one record per route and month. A missing directory is treated as
    /// an empty set.
    fn load_monthly(monthly_dir: &Path) -> EngineResult<Vec<RouteMonthlyConfig>> {
        if !monthly_dir.exists() {
            return Ok(Vec::new());
        }

        let dir_str = monthly_dir.display().to_string();
        let entries = fs::read_dir(monthly_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut records = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<MonthlyConfigFile>(&path)?;
                for (route_name, amounts) in file.amounts {
                    records.push(RouteMonthlyConfig {
                        route_name,
                        month: file.month,
                        postal_toll_billing: amounts.postal_toll_billing,
                        general_fee: amounts.general_fee,
                    });
                }
            }
        }

        Ok(records)
    }

    /// Loads all fee schedule files, flattening the per-route fee maps into
    /// one record per route and effective date.
    fn load_fees(fees_dir: &Path) -> EngineResult<Vec<RouteFeeSchedule>> {
        let dir_str = fees_dir.display().to_string();

        if !fees_dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(fees_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut records = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<FeeScheduleFile>(&path)?;
                for (route_name, fees) in file.fees {
                    records.push(RouteFeeSchedule {
                        route_name,
                        effective_from: file.effective_from,
                        driver_fee: fees.driver_fee,
                        supplemental_fee: fees.supplemental_fee,
                    });
                }
            }
        }

        if records.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no fee files found)", dir_str),
            });
        }

        Ok(records)
    }

    /// Returns the underlying fleet configuration.
    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Resolves the fee schedule record applicable to a route on a date.
    ///
    /// Returns `None` when no record is effective on or before the date,
    /// which the derivation engine treats as all fee fields zero — a
    /// normal state for a newly added route awaiting setup.
    pub fn fee_for_route(&self, route_name: &str, date: NaiveDate) -> Option<&RouteFeeSchedule> {
        resolve_fee_schedule(date, self.config.fee_schedules_for(route_name))
    }

    /// Resolves the monthly toll-billing record applicable to a route in a
    /// billing month (exact month match).
    pub fn monthly_for_route(
        &self,
        route_name: &str,
        billing_month: NaiveDate,
    ) -> Option<&RouteMonthlyConfig> {
        resolve_monthly_config(billing_month, self.config.monthly_configs_for(route_name))
    }
}
