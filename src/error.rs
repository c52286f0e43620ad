use std::sync::Arc;

use alloy::transports::{RpcError, TransportErrorKind};
use thiserror::Error;

/// Errors emitted by the monitor.
///
/// Only [`MonitorError::SubscriptionClosed`] terminates the live-monitoring loop; every other
/// kind is reported and worked around (a failed backfill still hands over to the live
/// subscription, a failed save leaves the entry in memory, an undecodable log is skipped).
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The underlying RPC transport returned an error.
    #[error("RPC error: {0}")]
    Rpc(Arc<RpcError<TransportErrorKind>>),

    /// A timeout elapsed while waiting for an RPC response.
    #[error("Operation timed out")]
    Timeout,

    /// A log record did not match the `Initialize` event shape.
    #[error("Malformed Initialize log: {0}")]
    Decode(#[from] alloy::sol_types::Error),

    /// Writing the pool store to disk failed. The in-memory store still holds the entry.
    #[error("Failed to persist pool store: {0}")]
    Persistence(#[from] std::io::Error),

    /// The persisted pool store could not be parsed.
    #[error("Pool store is unreadable: {0}")]
    CorruptState(#[from] serde_json::Error),

    /// The live log subscription ended and could not be re-established.
    #[error("Log subscription closed")]
    SubscriptionClosed,

    /// The configured backfill depth is invalid (must be greater than zero).
    #[error("Backfill depth must be greater than 0")]
    InvalidBackfillDepth,
}

impl From<RpcError<TransportErrorKind>> for MonitorError {
    fn from(error: RpcError<TransportErrorKind>) -> Self {
        MonitorError::Rpc(Arc::new(error))
    }
}
