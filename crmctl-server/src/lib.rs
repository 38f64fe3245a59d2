//! crmctl-server: HTTP API for financial records
//!
//! Request flow: handler → `ConnectionManager::ensure_connection` →
//! `RecordService` over a `RecordStore` → JSON envelope.

pub mod connection;
pub mod db;
pub mod http;
pub mod service;

pub use connection::{ConnectionError, ConnectionManager, Connector};
pub use db::{MemoryConnector, MemoryStore, PgConnector, RecordRepo, RecordStore, StoreError};
pub use http::{build_router, run_server, AppState, ServerConfig};
pub use service::{RecordService, ServiceError};
