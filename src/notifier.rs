use tracing::info;

use crate::PoolEvent;

/// Downstream sink for newly accepted pools.
///
/// Invoked exactly once per pool, synchronously, after the store has durably recorded it.
/// Implementations cannot influence acceptance; there is no return value to consume, and a
/// panic-free implementation is expected.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &PoolEvent);
}

/// Default sink that reports new pools through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &PoolEvent) {
        info!(
            pool_id = %event.id,
            currency0 = %event.currency0,
            currency1 = %event.currency1,
            fee = %event.fee,
            tick_spacing = %event.tick_spacing,
            hooks = %event.hooks,
            sqrt_price_x96 = %event.sqrt_price_x96,
            tick = %event.tick,
            "new pool detected"
        );
    }
}
