use std::time::Duration;

use alloy::network::Network;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

use crate::{MonitorError, monitor::PoolMonitor};

/// How many consecutive failed subscription attempts are tolerated before giving up.
const MAX_SUBSCRIBE_ATTEMPTS: usize = 5;

/// Base delay between subscription attempts, scaled linearly per consecutive failure.
const SUBSCRIBE_RETRY_DELAY: Duration = Duration::from_secs(2);

impl<N: Network> PoolMonitor<N> {
    /// Holds a live `Initialize` log subscription open, routing every delivered record through
    /// the pipeline.
    ///
    /// A dropped subscription is re-established; any history the source replays across the
    /// boundary is absorbed by the store. Runs until the subscription cannot be re-established
    /// within the retry budget.
    ///
    /// # Errors
    ///
    /// Returns [`MonitorError::SubscriptionClosed`] once re-subscription attempts are exhausted.
    pub async fn watch(&self) -> Result<(), MonitorError> {
        let filter = self.log_filter();
        let mut failed_attempts = 0usize;

        loop {
            let subscription = match self.rpc.subscribe_logs(&filter).await {
                Ok(subscription) => {
                    failed_attempts = 0;
                    subscription
                }
                Err(err) => {
                    failed_attempts += 1;
                    if failed_attempts >= MAX_SUBSCRIBE_ATTEMPTS {
                        error!(error = %err, "could not re-establish log subscription");
                        return Err(MonitorError::SubscriptionClosed);
                    }
                    warn!(
                        error = %err,
                        attempt = failed_attempts,
                        "log subscription attempt failed, retrying"
                    );
                    tokio::time::sleep(SUBSCRIBE_RETRY_DELAY * failed_attempts as u32).await;
                    continue;
                }
            };

            info!("listening for new Initialize events");

            let mut stream = subscription.into_stream();
            while let Some(log) = stream.next().await {
                self.process_log(&log).await;
            }

            warn!("log subscription ended, re-subscribing");
        }
    }
}
