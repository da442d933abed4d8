//! Invoice store
//!
//! Holds the most recently synthesized (or caller-supplied) invoice list.
//! There is one store per running process, shared behind an `Arc`. Writes
//! replace the whole list; there is no per-invoice update, so a caller that
//! wants to change one invoice reads the list, edits its copy and writes
//! the full list back. Concurrent writers race and the last write wins.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::invoice::Invoice;

/// Process-wide holder of the current invoice list
#[async_trait]
pub trait BillingStore: Send + Sync {
    /// The cached list, if one has been stored
    async fn load(&self) -> Option<Arc<Vec<Invoice>>>;

    /// Replaces the cached list wholesale and returns the stored handle
    async fn replace(&self, invoices: Vec<Invoice>) -> Arc<Vec<Invoice>>;

    /// Drops the cached list so the next read regenerates it
    async fn invalidate(&self);
}

/// `BillingStore` kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryBillingStore {
    cached: RwLock<Option<Arc<Vec<Invoice>>>>,
}

impl InMemoryBillingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BillingStore for InMemoryBillingStore {
    async fn load(&self) -> Option<Arc<Vec<Invoice>>> {
        self.cached.read().await.clone()
    }

    async fn replace(&self, invoices: Vec<Invoice>) -> Arc<Vec<Invoice>> {
        let invoices = Arc::new(invoices);
        *self.cached.write().await = Some(Arc::clone(&invoices));
        debug!(invoices = invoices.len(), "Invoice store replaced");
        invoices
    }

    async fn invalidate(&self) {
        *self.cached.write().await = None;
        debug!("Invoice store invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_student::Student;

    fn invoice(student_id: &str) -> Invoice {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let student = Student::new(student_id, "Store Student", "yoga", date);
        Invoice::new(&student, date, date)
    }

    #[tokio::test]
    async fn test_empty_store_loads_none() {
        let store = InMemoryBillingStore::new();
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_replace_then_load_returns_same_handle() {
        let store = InMemoryBillingStore::new();
        let stored = store.replace(vec![invoice("VIN-0001")]).await;

        let loaded = store.load().await.unwrap();
        assert!(Arc::ptr_eq(&stored, &loaded));
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = InMemoryBillingStore::new();
        store.replace(vec![invoice("VIN-0001")]).await;
        store.replace(vec![invoice("VIN-0002"), invoice("VIN-0003")]).await;

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].student_id.as_str(), "VIN-0002");
    }

    #[tokio::test]
    async fn test_invalidate_clears() {
        let store = InMemoryBillingStore::new();
        store.replace(vec![invoice("VIN-0001")]).await;
        store.invalidate().await;

        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_stores_are_isolated() {
        let a = InMemoryBillingStore::new();
        let b = InMemoryBillingStore::new();
        a.replace(vec![invoice("VIN-0001")]).await;

        assert!(b.load().await.is_none());
    }
}
