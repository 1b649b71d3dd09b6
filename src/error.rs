//! Error types for the billing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during billing and payroll
//! computation.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the billing engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// Local resolution failures (an unparseable departure token, a route with
/// no applicable fee schedule) are absorbed with safe defaults so that a
/// single bad field never aborts a whole batch; only the conditions below
/// surface as errors.
///
/// # Example
///
/// ```
/// use fleet_billing::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/routes.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/routes.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration record references a route that is not in the route
    /// master.
    #[error("Route not found: {name}")]
    RouteNotFound {
        /// The route name that was not found.
        name: String,
    },

    /// No runs matched the requested customer and billing month.
    ///
    /// An empty invoice is indistinguishable from a selection mistake
    /// upstream, so this is surfaced rather than returning silently.
    #[error("No billable data for customer '{customer_id}' in {billing_month}")]
    NoBillableData {
        /// The customer that was requested.
        customer_id: String,
        /// The billing month that was requested (first day of the month).
        billing_month: NaiveDate,
    },

    /// The manual-override store failed to read or write a snapshot.
    ///
    /// Storage failures are surfaced to the caller unchanged; the engine
    /// does not retry.
    #[error("Override store failure: {message}")]
    OverrideStorage {
        /// A description of the storage failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
