//! Record storage - the store seam, its Postgres and in-memory backends
//!
//! # Design Principles
//!
//! - Filters arrive typed (`RecordFilter`); each backend translates them itself
//! - `total_amount` is derived by the store, never trusted from callers
//! - Single-row inserts, no transactions

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod records;

use async_trait::async_trait;
use crmctl_core::models::{FinancialRecord, NewRecord, Pagination, RecordFilter, RecordStats};
use thiserror::Error;

pub use memory::{MemoryConnector, MemoryStore};
pub use pool::{create_pool, PgConnector};
pub use records::RecordRepo;

/// Store-side failure (query or insert)
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("stored record {id} is invalid: {reason}")]
    Corrupt { id: String, reason: String },
}

/// Queries and inserts over financial records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records matching `filter`, ordered by record date then creation time
    /// (both newest first), windowed by `page`.
    async fn find(
        &self,
        filter: &RecordFilter,
        page: Pagination,
    ) -> Result<Vec<FinancialRecord>, StoreError>;

    /// Number of records matching `filter`.
    async fn count(&self, filter: &RecordFilter) -> Result<u64, StoreError>;

    /// Income/expense sums over every record matching `filter`.
    async fn totals(&self, filter: &RecordFilter) -> Result<RecordStats, StoreError>;

    /// Persist a validated record, returning it with id, timestamps and total.
    async fn insert(&self, record: NewRecord) -> Result<FinancialRecord, StoreError>;
}
