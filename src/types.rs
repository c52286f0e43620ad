use alloy::primitives::{
    Address, B256, U160,
    aliases::{I24, U24},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A decoded pool-creation event.
///
/// `id` is unique per pool instance on the chain and is the sole dedup key. `observed_at` is
/// assigned by this process when the log is decoded, not taken from the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEvent {
    pub id: B256,
    pub currency0: Address,
    pub currency1: Address,
    pub fee: U24,
    pub tick_spacing: I24,
    /// `Address::ZERO` means the pool was created without a hook.
    pub hooks: Address,
    pub sqrt_price_x96: U160,
    pub tick: I24,
    pub observed_at: DateTime<Utc>,
}

impl PoolEvent {
    #[must_use]
    pub fn has_hook(&self) -> bool {
        self.hooks != Address::ZERO
    }
}

/// Persisted projection of a [`PoolEvent`], keyed by pool id in the store document.
///
/// Carries the `pool_manager` the monitor was watching so a store file remains self-describing
/// when the configuration changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRecord {
    pub pool_id: B256,
    pub pool_manager: Address,
    pub currency0: Address,
    pub currency1: Address,
    pub fee: U24,
    pub tick_spacing: I24,
    pub hooks: Address,
    pub sqrt_price_x96: U160,
    pub tick: I24,
    pub observed_at: DateTime<Utc>,
}

impl PoolRecord {
    #[must_use]
    pub fn new(event: &PoolEvent, pool_manager: Address) -> Self {
        Self {
            pool_id: event.id,
            pool_manager,
            currency0: event.currency0,
            currency1: event.currency1,
            fee: event.fee,
            tick_spacing: event.tick_spacing,
            hooks: event.hooks,
            sqrt_price_x96: event.sqrt_price_x96,
            tick: event.tick,
            observed_at: event.observed_at,
        }
    }
}
