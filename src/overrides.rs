//! Manual-override snapshot storage.
//!
//! Computed invoice lines for one customer/month can be replaced by a
//! persisted [`ManualOverride`] snapshot and later reset back to computed
//! figures. Persistence itself belongs to the embedding application; this
//! module defines the storage interface the invoice assembler reads
//! through, plus an in-memory implementation for embedding and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::ManualOverride;

/// Storage interface for manual-override snapshots.
///
/// Implementations must treat each operation as a single atomic
/// read/replace/delete against the `(customer, billing month)` key;
/// concurrent writers to the same key race at the storage layer, not
/// inside the engine. Storage failures are surfaced as
/// [`EngineError::OverrideStorage`] unchanged — the engine does not retry.
pub trait OverrideStore {
    /// Returns the snapshot for a customer/month, if one exists.
    fn find(
        &self,
        customer_id: &str,
        billing_month: NaiveDate,
    ) -> EngineResult<Option<ManualOverride>>;

    /// Saves a snapshot, replacing any existing one for the same
    /// customer/month.
    fn save(&self, snapshot: ManualOverride) -> EngineResult<()>;

    /// Deletes the snapshot for a customer/month. Deleting a key that has
    /// no snapshot is not an error.
    fn reset(&self, customer_id: &str, billing_month: NaiveDate) -> EngineResult<()>;
}

/// An in-memory override store backed by a mutex-guarded map.
///
/// # Example
///
/// ```
/// use fleet_billing::overrides::{MemoryOverrideStore, OverrideStore};
/// use fleet_billing::models::ManualOverride;
/// use chrono::NaiveDate;
///
/// let store = MemoryOverrideStore::new();
/// let month = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
///
/// assert!(store.find("cust_005", month).unwrap().is_none());
/// store.save(ManualOverride::new("cust_005", month, vec![], vec![])).unwrap();
/// assert!(store.find("cust_005", month).unwrap().is_some());
/// store.reset("cust_005", month).unwrap();
/// assert!(store.find("cust_005", month).unwrap().is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryOverrideStore {
    snapshots: Mutex<HashMap<(String, NaiveDate), ManualOverride>>,
}

impl MemoryOverrideStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(
        &self,
    ) -> EngineResult<std::sync::MutexGuard<'_, HashMap<(String, NaiveDate), ManualOverride>>>
    {
        self.snapshots
            .lock()
            .map_err(|_| EngineError::OverrideStorage {
                message: "snapshot store lock poisoned".to_string(),
            })
    }
}

impl OverrideStore for MemoryOverrideStore {
    fn find(
        &self,
        customer_id: &str,
        billing_month: NaiveDate,
    ) -> EngineResult<Option<ManualOverride>> {
        let snapshots = self.locked()?;
        Ok(snapshots
            .get(&(customer_id.to_string(), billing_month))
            .cloned())
    }

    fn save(&self, snapshot: ManualOverride) -> EngineResult<()> {
        let mut snapshots = self.locked()?;
        snapshots.insert(
            (snapshot.customer_id.clone(), snapshot.billing_month),
            snapshot,
        );
        Ok(())
    }

    fn reset(&self, customer_id: &str, billing_month: NaiveDate) -> EngineResult<()> {
        let mut snapshots = self.locked()?;
        snapshots.remove(&(customer_id.to_string(), billing_month));
        Ok(())
    }
}

/// An override store that never holds a snapshot.
///
/// For callers that assemble invoices without an override layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideStore for NoOverrides {
    fn find(
        &self,
        _customer_id: &str,
        _billing_month: NaiveDate,
    ) -> EngineResult<Option<ManualOverride>> {
        Ok(None)
    }

    fn save(&self, _snapshot: ManualOverride) -> EngineResult<()> {
        Err(EngineError::OverrideStorage {
            message: "this store does not persist snapshots".to_string(),
        })
    }

    fn reset(&self, _customer_id: &str, _billing_month: NaiveDate) -> EngineResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
    }

    #[test]
    fn test_save_replaces_existing_snapshot() {
        let store = MemoryOverrideStore::new();

        let first = ManualOverride::new("cust_005", month(), vec![], vec![]);
        let first_id = first.id;
        store.save(first).unwrap();

        let second = ManualOverride::new("cust_005", month(), vec![], vec![]);
        let second_id = second.id;
        store.save(second).unwrap();

        let found = store.find("cust_005", month()).unwrap().unwrap();
        assert_eq!(found.id, second_id);
        assert_ne!(found.id, first_id);
    }

    #[test]
    fn test_keys_are_per_customer_and_month() {
        let store = MemoryOverrideStore::new();
        store
            .save(ManualOverride::new("cust_005", month(), vec![], vec![]))
            .unwrap();

        assert!(store.find("cust_006", month()).unwrap().is_none());
        let other_month = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert!(store.find("cust_005", other_month).unwrap().is_none());
    }

    #[test]
    fn test_reset_missing_key_is_ok() {
        let store = MemoryOverrideStore::new();
        assert!(store.reset("cust_005", month()).is_ok());
    }

    #[test]
    fn test_no_overrides_never_finds() {
        let store = NoOverrides;
        assert!(store.find("cust_005", month()).unwrap().is_none());
        assert!(store.reset("cust_005", month()).is_ok());
        assert!(
            store
                .save(ManualOverride::new("cust_005", month(), vec![], vec![]))
                .is_err()
        );
    }
}
