//! crmctl-core: domain model for financial records
//!
//! Everything here is storage-agnostic. Input is validated into typed values
//! (`NewRecord`, `RecordFilter`, `Pagination`) before any store sees it.

pub mod config;
pub mod error;
pub mod models;

pub use config::{CrmConfig, DatabaseConfig, ServerSection};
pub use error::{CrmError, Result};
pub use models::{
    CreateRecordInput, CreatorId, CreatorRef, FinancialRecord, ListQuery, ListedRecord,
    NewRecord, PageInfo, Pagination, RecordFilter, RecordPage, RecordStats, RecordType,
    ValidationError,
};
