//! The monitor itself: backfill scan plus live subscription over one shared pipeline.

mod backfill;
mod live;

use std::{path::PathBuf, sync::Arc};

use alloy::{
    network::{Ethereum, Network},
    primitives::Address,
    rpc::types::{Filter, Log},
    sol_types::SolEvent,
};
use tokio::sync::Mutex;
use tracing::{error, warn};

use crate::{
    MonitorError,
    config::{DEFAULT_BACKFILL_BLOCKS, DEFAULT_STORE_PATH, MonitorConfig},
    decoder::{self, Initialize},
    filter::HookFilter,
    notifier::{Notifier, TracingNotifier},
    rpc::RpcSource,
    store::PoolStore,
};

pub use backfill::backfill_range;

/// Watches a `PoolManager` contract for pool creations.
///
/// Construct via [`PoolMonitorBuilder`]. All mutations of the underlying [`PoolStore`] funnel
/// through [`PoolMonitor::process_log`], whose check-insert-persist sequence runs under a single
/// lock so concurrent delivery cannot surface the same pool twice.
pub struct PoolMonitor<N: Network = Ethereum> {
    rpc: RpcSource<N>,
    pool_manager: Address,
    filter: HookFilter,
    backfill_blocks: u64,
    store: Mutex<PoolStore>,
    notifier: Arc<dyn Notifier>,
}

/// Builder for [`PoolMonitor`].
pub struct PoolMonitorBuilder {
    pool_manager: Address,
    hook: Option<Address>,
    backfill_blocks: u64,
    store_path: PathBuf,
    notifier: Arc<dyn Notifier>,
}

impl PoolMonitorBuilder {
    #[must_use]
    pub fn new(pool_manager: Address) -> Self {
        Self {
            pool_manager,
            hook: None,
            backfill_blocks: DEFAULT_BACKFILL_BLOCKS,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Seeds the builder from a loaded [`MonitorConfig`].
    #[must_use]
    pub fn from_config(config: &MonitorConfig) -> Self {
        let mut builder = Self::new(config.pool_manager)
            .backfill_blocks(config.backfill_blocks)
            .store_path(&config.store_path);
        if let Some(hook) = config.hook_address {
            builder = builder.hook(hook);
        }
        builder
    }

    /// Only surface pools created with this hook.
    #[must_use]
    pub fn hook(mut self, hook: Address) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Sets how many blocks behind the tip the startup backfill begins.
    #[must_use]
    pub fn backfill_blocks(mut self, backfill_blocks: u64) -> Self {
        self.backfill_blocks = backfill_blocks;
        self
    }

    #[must_use]
    pub fn store_path(mut self, store_path: impl Into<PathBuf>) -> Self {
        self.store_path = store_path.into();
        self
    }

    /// Replaces the default [`TracingNotifier`] sink.
    #[must_use]
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Builds the monitor on top of an [`RpcSource`], loading the persisted store.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::InvalidBackfillDepth`] if `backfill_blocks` is zero.
    pub fn connect<N: Network>(self, rpc: RpcSource<N>) -> Result<PoolMonitor<N>, MonitorError> {
        if self.backfill_blocks == 0 {
            return Err(MonitorError::InvalidBackfillDepth);
        }

        Ok(PoolMonitor {
            rpc,
            pool_manager: self.pool_manager,
            filter: HookFilter::new(self.hook),
            backfill_blocks: self.backfill_blocks,
            store: Mutex::new(PoolStore::load(self.store_path)),
            notifier: self.notifier,
        })
    }
}

impl<N: Network> PoolMonitor<N> {
    /// Runs the startup backfill, then watches the live subscription until it fails terminally.
    ///
    /// Backfill is best-effort: a failed historical sweep is reported and the monitor proceeds
    /// to the live phase, where correctness of future events does not depend on it. Events
    /// emitted between the historical query and the subscription registration can be missed;
    /// overlap in that window is absorbed by the store.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::SubscriptionClosed`] once the live subscription cannot be
    /// re-established.
    pub async fn run(&self) -> Result<(), MonitorError> {
        if let Err(err) = self.backfill().await {
            error!(error = %err, "backfill failed; continuing with live subscription");
        }
        self.watch().await
    }

    /// Pushes one raw log record through the decode, filter, accept, notify pipeline.
    ///
    /// Returns whether the record was accepted as a new pool. Undecodable records are skipped.
    /// Both the backfill sweep and live delivery call this; it is the single point where the
    /// at-most-once guarantee is enforced.
    pub async fn process_log(&self, log: &Log) -> bool {
        let event = match decoder::decode_pool_event(log) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "skipping undecodable log record");
                return false;
            }
        };

        if !self.filter.is_match(&event) {
            return false;
        }

        let accepted = {
            let mut store = self.store.lock().await;
            store.accept(&event, self.pool_manager)
        };

        if accepted {
            // The store has already recorded the pool; notifier failures cannot undo that.
            self.notifier.notify(&event);
        }

        accepted
    }

    /// Persists the in-memory store.
    ///
    /// The store is already saved after every acceptance, so this is a safety net for shutdown.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Persistence`] when the file cannot be written.
    pub async fn flush(&self) -> Result<(), MonitorError> {
        self.store.lock().await.save()
    }

    /// Number of distinct pools recorded so far.
    pub async fn pool_count(&self) -> usize {
        self.store.lock().await.len()
    }

    fn log_filter(&self) -> Filter {
        Filter::new().address(self.pool_manager).event_signature(Initialize::SIGNATURE_HASH)
    }
}
