use std::path::PathBuf;

use alloy::primitives::Address;
use serde::Deserialize;

/// How many blocks behind the chain tip the startup backfill begins by default.
pub const DEFAULT_BACKFILL_BLOCKS: u64 = 10_000;

/// Default location of the persisted pool store.
pub const DEFAULT_STORE_PATH: &str = "detected-pools.json";

/// Monitor configuration, read once at startup and immutable for the process lifetime.
///
/// Field names map to upper-cased environment variables (`RPC_URL`, `POOL_MANAGER`,
/// `HOOK_ADDRESS`, `BACKFILL_BLOCKS`, `STORE_PATH`). Addresses parse from hex in any casing, so
/// a checksummed `HOOK_ADDRESS` and a lower-cased event address compare equal once typed.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// WebSocket RPC endpoint of the chain node.
    pub rpc_url: String,
    /// Address of the `PoolManager` contract to watch.
    pub pool_manager: Address,
    /// Restrict monitoring to pools created with this hook. Unset monitors every pool.
    #[serde(default)]
    pub hook_address: Option<Address>,
    #[serde(default = "default_backfill_blocks")]
    pub backfill_blocks: u64,
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_backfill_blocks() -> u64 {
    DEFAULT_BACKFILL_BLOCKS
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

impl MonitorConfig {
    /// Reads configuration from the process environment, loading `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}
