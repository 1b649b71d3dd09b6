//! Configuration loading and types for the billing engine.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CategoriesConfig, FeeScheduleFile, FleetConfig, FleetMetadata, MonthlyAmounts,
    MonthlyConfigFile, RouteConfig, RouteFeeSchedule, RouteFees, RouteMonthlyConfig, RoutesConfig,
};
