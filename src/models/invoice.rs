//! Invoice output models.
//!
//! This module contains the [`Invoice`] type and the category rollups it is
//! built from, plus the [`ManualOverride`] snapshot that can replace the
//! computed figures for one customer/month.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifying information for the customer an invoice is addressed to.
///
/// Supplied by the caller; the engine never looks customers up itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Unique identifier for the customer.
    pub id: String,
    /// The customer's display name.
    pub name: String,
}

/// One billing-category line on an invoice.
///
/// # Example
///
/// ```
/// use fleet_billing::models::CategorySummary;
/// use rust_decimal::Decimal;
///
/// let summary = CategorySummary {
///     category_code: "01".to_string(),
///     label: "Scheduled mail runs".to_string(),
///     run_count: 22,
///     total_amount: Decimal::new(220_000, 0),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The billing category code.
    pub category_code: String,
    /// The human-readable category label.
    pub label: String,
    /// The number of runs billed under this category.
    pub run_count: u32,
    /// The total amount billed under this category.
    pub total_amount: Decimal,
}

/// A route-level rollup within a billing category.
///
/// For every invoice produced without a manual override, the detail totals
/// of a category sum exactly to that category's summary total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    /// The billing category code this detail belongs to.
    pub category_code: String,
    /// The route name.
    pub route_name: String,
    /// The number of runs on this route in the billing month.
    pub run_count: u32,
    /// The prevailing per-run driver fee for the route.
    pub unit_price: Decimal,
    /// The total driver-fee amount for the route.
    pub fee_amount: Decimal,
    /// The total billed toll amount for the route.
    pub toll_amount: Decimal,
    /// `fee_amount + toll_amount`.
    pub total_amount: Decimal,
}

/// A complete invoice for one customer and billing month.
///
/// This exact shape is relied upon by document/print and spreadsheet-export
/// collaborators and is preserved field-for-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// The customer the invoice is addressed to.
    pub customer: CustomerInfo,
    /// The billing month (first day of the month).
    pub billing_month: NaiveDate,
    /// The pre-tax total, summed over the category summaries.
    pub total_amount: Decimal,
    /// 10% consumption tax, floored to a whole amount.
    pub tax_amount: Decimal,
    /// `total_amount + tax_amount`.
    pub grand_total: Decimal,
    /// One line per billing category, in first-seen order.
    pub summary_by_category: Vec<CategorySummary>,
    /// Route-level rollups, in first-seen order.
    pub details_by_category: Vec<CategoryDetail>,
}

/// A persisted replacement for the computed invoice lines of one
/// customer/month.
///
/// While a snapshot exists for a `(customer, billing month)` key, invoice
/// assembly returns its lines verbatim (with totals recomputed from them)
/// instead of the computed ones. Resetting deletes the snapshot, after
/// which assembly falls through to a fresh computation — not to a cached
/// historical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualOverride {
    /// Unique identifier for this snapshot.
    pub id: Uuid,
    /// The customer the snapshot applies to.
    pub customer_id: String,
    /// The billing month the snapshot applies to (first day of the month).
    pub billing_month: NaiveDate,
    /// The replacement category summaries.
    pub summary: Vec<CategorySummary>,
    /// The replacement category details.
    pub details: Vec<CategoryDetail>,
    /// When the snapshot was saved.
    pub saved_at: DateTime<Utc>,
}

impl ManualOverride {
    /// Creates a new snapshot for a customer/month with a fresh id and the
    /// current timestamp.
    pub fn new(
        customer_id: impl Into<String>,
        billing_month: NaiveDate,
        summary: Vec<CategorySummary>,
        details: Vec<CategoryDetail>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id: customer_id.into(),
            billing_month,
            summary,
            details,
            saved_at: Utc::now(),
        }
    }
}
