//! pool-monitor watches a Uniswap v4 `PoolManager` for pool creations.
//!
//! The main entry point is [`PoolMonitor`], built via [`PoolMonitorBuilder`] and driven with
//! [`PoolMonitor::run`]. On startup the monitor scans a bounded trailing block range for
//! historical `Initialize` events, then holds a live log subscription open for new ones.
//!
//! # Pipeline
//!
//! Both the backfill scan and the live subscription feed the same pipeline: each raw log is
//! decoded into a [`PoolEvent`], matched against the configured hook filter, and offered to the
//! [`PoolStore`]. The store is the single serialization point between the two producers; a pool
//! id it has already recorded is dropped, so the same event can be delivered by both phases (or
//! redelivered after a reconnect) without being surfaced twice.
//!
//! # Durability
//!
//! Accepted pools are persisted to a JSON document after every acceptance and reloaded at
//! startup, so the at-most-once guarantee holds across process restarts. A crash between an
//! acceptance and its save can lose that single entry, in which case redelivery of the event is
//! accepted again rather than silently dropped.
//!
//! # Backfill/live boundary
//!
//! Events emitted between the historical query and the subscription registration may be missed;
//! overlapping delivery in that window is harmless because the store absorbs duplicates. See the
//! notes on [`PoolMonitor::run`].

pub mod config;
pub mod decoder;
pub mod filter;
pub mod monitor;
pub mod notifier;
pub mod rpc;
pub mod store;

mod error;
mod types;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use filter::HookFilter;
pub use monitor::{PoolMonitor, PoolMonitorBuilder};
pub use notifier::{Notifier, TracingNotifier};
pub use rpc::RpcSource;
pub use store::PoolStore;
pub use types::{PoolEvent, PoolRecord};
