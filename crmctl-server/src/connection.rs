//! Lazily-established, process-wide database connection
//!
//! `ConnectionManager` owns at most one live connection and at most one
//! in-flight connection attempt. Concurrent first callers all await the same
//! attempt; a failed attempt is cleared so the next call retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;
use tokio::sync::Mutex;

/// Upper bound on pooled connections
pub const MAX_POOL_SIZE: u32 = 10;

/// How long to wait for the store to accept a connection
pub const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Idle pooled connections are closed after this long
pub const SOCKET_IDLE_TIMEOUT: Duration = Duration::from_secs(45);

/// Store could not be reached or prepared
#[derive(Debug, Clone, Error)]
pub enum ConnectionError {
    #[error("database connection failed: {message}")]
    Unreachable { message: String },

    #[error("database connection timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("database schema setup failed: {message}")]
    Migration { message: String },
}

/// Something that can open a connection to the record store.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    /// Cheaply cloneable handle shared by all requests
    type Connection: Clone + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Connection, ConnectionError>;
}

type Attempt<T> = Shared<BoxFuture<'static, Result<T, ConnectionError>>>;

struct Slot<T> {
    live: Option<T>,
    in_flight: Option<Attempt<T>>,
}

/// Connect-once cache around a `Connector`
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    slot: Mutex<Slot<C::Connection>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            slot: Mutex::new(Slot {
                live: None,
                in_flight: None,
            }),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// True once a connection has been established and cached.
    pub async fn is_connected(&self) -> bool {
        self.slot.lock().await.live.is_some()
    }

    /// Return the cached connection, joining or starting a connection
    /// attempt if there is none yet.
    pub async fn ensure_connection(&self) -> Result<C::Connection, ConnectionError> {
        let attempt = {
            let mut slot = self.slot.lock().await;

            if let Some(conn) = &slot.live {
                tracing::debug!("using cached database connection");
                return Ok(conn.clone());
            }

            match &slot.in_flight {
                Some(attempt) => {
                    tracing::debug!("joining in-flight connection attempt");
                    attempt.clone()
                }
                None => {
                    tracing::info!("connecting to database");
                    let connector = Arc::clone(&self.connector);
                    let attempt = async move { connector.connect().await }.boxed().shared();
                    slot.in_flight = Some(attempt.clone());
                    attempt
                }
            }
        };

        let result = attempt.clone().await;

        // Only the first waiter to finish settles the slot.
        let mut slot = self.slot.lock().await;
        let settles = slot
            .in_flight
            .as_ref()
            .is_some_and(|current| current.ptr_eq(&attempt));

        if settles {
            slot.in_flight = None;
            match &result {
                Ok(conn) => {
                    slot.live = Some(conn.clone());
                    tracing::info!("database connection established");
                }
                Err(e) => {
                    tracing::error!(error = %e, "database connection failed");
                }
            }
        }

        result
    }
}
