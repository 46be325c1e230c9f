//! Database query timeout helpers
//!
//! Provides timeout wrappers for database operations to prevent indefinite hangs.

use std::time::Duration;
use tokio::time::timeout;

use super::errors::StoreError;

/// Default timeout for database queries (5 seconds)
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Default timeout for long-running operations such as full exports (30 seconds)
pub const LONG_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Execute a query with timeout
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match timeout(duration, future).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(StoreError::Database(e)),
        Err(_) => Err(StoreError::Timeout),
    }
}

/// Execute a query with default timeout (5 seconds)
pub async fn with_default_timeout<F, T>(future: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    with_timeout(DEFAULT_QUERY_TIMEOUT, future).await
}

/// Execute a long-running query with extended timeout (30 seconds)
pub async fn with_long_timeout<F, T>(future: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    with_timeout(LONG_OPERATION_TIMEOUT, future).await
}
