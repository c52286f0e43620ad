use alloy::network::Network;
use tracing::info;

use crate::{MonitorError, monitor::PoolMonitor};

/// Inclusive block range covering the `depth` blocks behind `current`, clamped at genesis.
#[must_use]
pub fn backfill_range(current: u64, depth: u64) -> (u64, u64) {
    (current.saturating_sub(depth), current)
}

impl<N: Network> PoolMonitor<N> {
    /// Scans the trailing backfill window once, routing each record through the pipeline.
    ///
    /// Records are processed strictly sequentially in the order the source returns them, which
    /// is chain order. The sweep is best-effort; see [`PoolMonitor::run`].
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::Rpc`] or [`MonitorError::Timeout`] when the height or log query
    /// fails after retries.
    pub async fn backfill(&self) -> Result<(), MonitorError> {
        let current = self.rpc.get_block_number().await?;
        let (from_block, to_block) = backfill_range(current, self.backfill_blocks);

        info!(from_block, to_block, "scanning for historical Initialize events");

        let filter = self.log_filter().from_block(from_block).to_block(to_block);
        let logs = self.rpc.get_logs(&filter).await?;

        info!(count = logs.len(), "historical Initialize events found");

        let mut accepted = 0usize;
        for log in &logs {
            if self.process_log(log).await {
                accepted += 1;
            }
        }

        info!(accepted, "backfill complete");
        Ok(())
    }
}
