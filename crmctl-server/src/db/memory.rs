//! In-memory record store
//!
//! Backs `crmctl serve --memory` and the HTTP tests. Uses
//! `RecordFilter::matches` as its query language.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crmctl_core::models::{FinancialRecord, NewRecord, Pagination, RecordFilter, RecordStats};

use super::{RecordStore, StoreError};
use crate::connection::{ConnectionError, Connector};

/// Shared vector of records; clones see the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<Vec<FinancialRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records regardless of filter
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find(
        &self,
        filter: &RecordFilter,
        page: Pagination,
    ) -> Result<Vec<FinancialRecord>, StoreError> {
        let records = self.records.read().await;
        let mut matching: Vec<&FinancialRecord> =
            records.iter().filter(|r| filter.matches(r)).collect();
        matching.sort_by_key(|r| Reverse((r.record_date, r.created_at)));

        Ok(matching
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, filter: &RecordFilter) -> Result<u64, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| filter.matches(r)).count() as u64)
    }

    async fn totals(&self, filter: &RecordFilter) -> Result<RecordStats, StoreError> {
        let records = self.records.read().await;
        Ok(RecordStats::from_amounts(
            records
                .iter()
                .filter(|r| filter.matches(r))
                .map(|r| (r.record_type, r.total_amount)),
        ))
    }

    async fn insert(&self, record: NewRecord) -> Result<FinancialRecord, StoreError> {
        let created = FinancialRecord::from_new(record, Uuid::new_v4(), Utc::now());
        self.records.write().await.push(created.clone());
        Ok(created)
    }
}

/// Connector that always hands out the same `MemoryStore`
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    store: MemoryStore,
}

impl MemoryConnector {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    type Connection = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore, ConnectionError> {
        Ok(self.store.clone())
    }
}
