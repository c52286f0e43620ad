//! Retrying wrapper around an Alloy provider.
//!
//! Every RPC call the monitor makes goes through [`RpcSource`], which adds a bounded per-call
//! timeout and exponential backoff retries. Errors that survive the retry budget are surfaced
//! as recoverable [`MonitorError`] values; callers decide whether to work around them (backfill)
//! or re-establish state (live subscription).

use std::time::Duration;

use alloy::{
    network::{Ethereum, Network},
    providers::{Provider, RootProvider},
    pubsub::Subscription,
    rpc::types::{Filter, Log},
    transports::{RpcError, TransportErrorKind},
};
use backon::{ExponentialBuilder, Retryable};
use tokio::time::timeout;
use tracing::error;

use crate::MonitorError;

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RETRIES: usize = 3;
pub const DEFAULT_MIN_DELAY: Duration = Duration::from_millis(500);

/// Provider wrapper with built-in retry and timeout mechanisms.
#[derive(Clone, Debug)]
pub struct RpcSource<N: Network = Ethereum> {
    provider: RootProvider<N>,
    call_timeout: Duration,
    max_retries: usize,
    min_delay: Duration,
}

impl<N: Network> RpcSource<N> {
    #[must_use]
    pub fn new(provider: RootProvider<N>) -> Self {
        Self {
            provider,
            call_timeout: DEFAULT_CALL_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            min_delay: DEFAULT_MIN_DELAY,
        }
    }

    /// Sets the total per-call timeout, covering all retry attempts.
    #[must_use]
    pub fn call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    #[must_use]
    pub fn provider(&self) -> &RootProvider<N> {
        &self.provider
    }

    /// Fetch the latest block number with retry and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Rpc`] or [`MonitorError::Timeout`].
    pub async fn get_block_number(&self) -> Result<u64, MonitorError> {
        self.call("eth_blockNumber", || async { self.provider.get_block_number().await }).await
    }

    /// Fetch logs for the given [`Filter`] with retry and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Rpc`] or [`MonitorError::Timeout`].
    pub async fn get_logs(&self, filter: &Filter) -> Result<Vec<Log>, MonitorError> {
        self.call("eth_getLogs", || async { self.provider.get_logs(filter).await }).await
    }

    /// Open a log subscription for the given [`Filter`] with retry and timeout.
    ///
    /// Requires a pubsub-capable transport (WebSocket or IPC).
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Rpc`] or [`MonitorError::Timeout`].
    pub async fn subscribe_logs(&self, filter: &Filter) -> Result<Subscription<Log>, MonitorError> {
        self.call("eth_subscribe", || async { self.provider.subscribe_logs(filter).await }).await
    }

    /// Execute `operation` with exponential backoff, bounded by `call_timeout` in total.
    async fn call<T, F, Fut>(&self, method: &'static str, operation: F) -> Result<T, MonitorError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, RpcError<TransportErrorKind>>>,
    {
        let backoff = ExponentialBuilder::default()
            .with_max_times(self.max_retries)
            .with_min_delay(self.min_delay);

        match timeout(self.call_timeout, operation.retry(backoff)).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                error!(method, error = %err, "RPC call failed");
                Err(err.into())
            }
            Err(_) => {
                error!(method, timeout = ?self.call_timeout, "RPC call timed out");
                Err(MonitorError::Timeout)
            }
        }
    }
}
