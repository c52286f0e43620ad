use alloy::{rpc::types::Log, sol, sol_types::SolEvent};
use chrono::Utc;

use crate::{MonitorError, PoolEvent};

sol! {
    /// Emitted by the Uniswap v4 `PoolManager` when a pool is initialized.
    #[derive(Debug)]
    event Initialize(
        bytes32 indexed id,
        address indexed currency0,
        address indexed currency1,
        uint24 fee,
        int24 tickSpacing,
        address hooks,
        uint160 sqrtPriceX96,
        int24 tick
    );
}

/// Decodes a raw log record into a [`PoolEvent`].
///
/// A record whose topics or data do not match the `Initialize` shape yields
/// [`MonitorError::Decode`]; callers skip such records rather than halting the pipeline.
pub fn decode_pool_event(log: &Log) -> Result<PoolEvent, MonitorError> {
    let decoded = Initialize::decode_log(&log.inner)?;

    Ok(PoolEvent {
        id: decoded.data.id,
        currency0: decoded.data.currency0,
        currency1: decoded.data.currency1,
        fee: decoded.data.fee,
        tick_spacing: decoded.data.tickSpacing,
        hooks: decoded.data.hooks,
        sqrt_price_x96: decoded.data.sqrtPriceX96,
        tick: decoded.data.tick,
        observed_at: Utc::now(),
    })
}
