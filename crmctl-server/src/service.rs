//! Financial record service - read and write paths
//!
//! Every operation obtains the store through the `ConnectionManager`, so the
//! first request of the process establishes the connection.

use chrono::Utc;
use thiserror::Error;

use crmctl_core::models::{
    CreateRecordInput, CreatorId, CreatorRef, FinancialRecord, ListedRecord, Pagination,
    RecordFilter, RecordPage, ValidationError,
};

use crate::connection::{ConnectionError, ConnectionManager, Connector};
use crate::db::{RecordStore, StoreError};

/// Service-level failure: the caller's input, or the store
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Persistence(#[from] StoreError),
}

/// Record service borrowing the process-wide connection manager
pub struct RecordService<'a, C: Connector> {
    connections: &'a ConnectionManager<C>,
}

impl<'a, C> RecordService<'a, C>
where
    C: Connector,
    C::Connection: RecordStore,
{
    pub fn new(connections: &'a ConnectionManager<C>) -> Self {
        Self { connections }
    }

    /// Filtered, sorted page of records plus pagination metadata and stats
    /// over the whole filtered set.
    ///
    /// The listing, count and aggregate are independent reads; a concurrent
    /// insert between them can skew `total` or `stats` against `records`.
    pub async fn list_records(
        &self,
        filter: &RecordFilter,
        page: Pagination,
    ) -> Result<RecordPage, ServiceError> {
        tracing::debug!(?filter, page = page.page, limit = page.limit, "listing financial records");

        let store = self.connections.ensure_connection().await?;
        let (records, total, stats) = tokio::try_join!(
            store.find(filter, page),
            store.count(filter),
            store.totals(filter),
        )?;

        tracing::debug!(
            returned = records.len(),
            total,
            total_income = stats.total_income,
            total_expense = stats.total_expense,
            "financial records listed"
        );

        let records = records
            .into_iter()
            .map(|record| {
                let creator = resolve_creator(record.created_by.clone());
                ListedRecord::new(record, creator)
            })
            .collect();

        Ok(RecordPage {
            records,
            pagination: page.info(total),
            stats,
        })
    }

    /// Validate and persist a new record. Validation runs before the store
    /// is touched; nothing is written when it fails.
    pub async fn create_record(
        &self,
        input: CreateRecordInput,
    ) -> Result<FinancialRecord, ServiceError> {
        let record = input.validate(Utc::now()).map_err(|e| {
            tracing::debug!(error = %e, "financial record rejected");
            e
        })?;

        let store = self.connections.ensure_connection().await?;
        let created = store.insert(record).await?;
        tracing::info!(id = %created.id, record_type = %created.record_type, "financial record created");
        Ok(created)
    }
}

/// User lookup is not available; every creator maps to the placeholder.
fn resolve_creator(id: CreatorId) -> CreatorRef {
    CreatorRef::unresolved(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryConnector, MemoryStore};
    use crmctl_core::models::RecordType;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use async_trait::async_trait;

    const CREATOR: &str = "64b7f0c2a1b2c3d4e5f60718";

    fn input(kind: &str, member: &str, location: &str, price: f64, qty: i64) -> CreateRecordInput {
        CreateRecordInput {
            record_type: Some(kind.into()),
            member_name: Some(member.into()),
            item: Some("Item".into()),
            location: Some(location.into()),
            unit_price: Some(price),
            quantity: Some(qty),
            created_by: Some(CREATOR.into()),
            ..Default::default()
        }
    }

    fn manager(store: &MemoryStore) -> ConnectionManager<MemoryConnector> {
        ConnectionManager::new(MemoryConnector::new(store.clone()))
    }

    async fn seeded() -> ConnectionManager<MemoryConnector> {
        let store = MemoryStore::new();
        let connections = manager(&store);
        let service = RecordService::new(&connections);
        for (kind, member, location, price, qty) in [
            ("income", "Chan Tai Man", "Central", 100.0, 3),
            ("expense", "Chan Siu Ming", "Central", 20.0, 2),
            ("income", "Wong Mei", "Mong Kok", 50.0, 1),
            ("expense", "Wong Mei", "Mong Kok", 5.5, 4),
            ("income", "Lee Ka Ho", "Central", 0.0, 1),
        ] {
            service
                .create_record(input(kind, member, location, price, qty))
                .await
                .unwrap();
        }
        connections
    }

    #[tokio::test]
    async fn create_returns_persisted_record() {
        let store = MemoryStore::new();
        let connections = manager(&store);
        let created = RecordService::new(&connections)
            .create_record(input("expense", "Ann", "Central", 12.5, 4))
            .await
            .unwrap();

        assert_eq!(created.total_amount, 50.0);
        assert_eq!(created.record_type, RecordType::Expense);
        assert_eq!(created.created_by.as_str(), CREATOR);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_create_writes_nothing() {
        let store = MemoryStore::new();
        let connections = manager(&store);
        let service = RecordService::new(&connections);

        let err = service
            .create_record(input("expense", "Ann", "Central", -1.0, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let mut bad_creator = input("expense", "Ann", "Central", 1.0, 1);
        bad_creator.created_by = Some("not-a-valid-id".into());
        assert!(service.create_record(bad_creator).await.is_err());

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn unfiltered_listing_returns_everything() {
        let connections = seeded().await;
        let page = RecordService::new(&connections)
            .list_records(&RecordFilter::new(), Pagination::default())
            .await
            .unwrap();

        assert_eq!(page.records.len(), 5);
        assert_eq!(page.pagination.total, 5);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.stats.total_income, 350.0);
        assert_eq!(page.stats.total_expense, 62.0);
        assert_eq!(page.stats.net_amount, 288.0);
    }

    #[tokio::test]
    async fn record_type_filter_is_exact() {
        let connections = seeded().await;
        let page = RecordService::new(&connections)
            .list_records(
                &RecordFilter::new().record_type(RecordType::Income),
                Pagination::default(),
            )
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 3);
        assert!(page.records.iter().all(|r| r.record_type == RecordType::Income));
        assert_eq!(page.stats.total_expense, 0.0);
    }

    #[tokio::test]
    async fn stats_cover_filter_not_page() {
        let connections = seeded().await;
        let page = RecordService::new(&connections)
            .list_records(&RecordFilter::new().location("Central"), Pagination::new(1, 1))
            .await
            .unwrap();

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.stats.total_income, 300.0);
        assert_eq!(page.stats.total_expense, 40.0);
    }

    #[tokio::test]
    async fn member_name_filter_is_partial_and_case_insensitive() {
        let connections = seeded().await;
        let page = RecordService::new(&connections)
            .list_records(&RecordFilter::new().member_name("CHAN"), Pagination::default())
            .await
            .unwrap();

        assert_eq!(page.pagination.total, 2);
        assert!(page.records.iter().all(|r| r.member_name.starts_with("Chan")));
    }

    #[tokio::test]
    async fn listed_creators_use_placeholder() {
        let connections = seeded().await;
        let page = RecordService::new(&connections)
            .list_records(&RecordFilter::new(), Pagination::default())
            .await
            .unwrap();

        assert!(page.records.iter().all(|r| r.created_by.is_unresolved()));
    }

    #[tokio::test]
    async fn empty_store_has_zero_stats() {
        let connections = manager(&MemoryStore::new());
        let page = RecordService::new(&connections)
            .list_records(&RecordFilter::new(), Pagination::default())
            .await
            .unwrap();

        assert!(page.records.is_empty());
        assert_eq!(page.pagination.total, 0);
        assert_eq!(page.pagination.total_pages, 0);
        assert_eq!(page.stats.net_amount, 0.0);
    }

    /// Connector that must never be reached
    struct RefusingConnector {
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Connector for RefusingConnector {
        type Connection = MemoryStore;

        async fn connect(&self) -> Result<MemoryStore, ConnectionError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(ConnectionError::Unreachable {
                message: "connection refused".into(),
            })
        }
    }

    #[tokio::test]
    async fn validation_precedes_connection() {
        let connections = ConnectionManager::new(RefusingConnector {
            attempts: AtomicUsize::new(0),
        });
        let service = RecordService::new(&connections);

        let mut missing_quantity = input("income", "Ann", "Central", 1.0, 1);
        missing_quantity.quantity = None;
        let err = service.create_record(missing_quantity).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(connections.connector().attempts.load(Ordering::SeqCst), 0);

        let err = service
            .create_record(input("income", "Ann", "Central", 1.0, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Connection(_)));
        assert_eq!(connections.connector().attempts.load(Ordering::SeqCst), 1);
    }
}
