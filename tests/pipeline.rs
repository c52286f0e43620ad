//! End-to-end pipeline behavior: backfill and live delivery against one persisted store.

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use alloy::{
    primitives::{Address, B256, U64, U160, address, b256},
    providers::{RootProvider, mock::Asserter},
    rpc::{client::RpcClient, types::Log},
    sol_types::SolEvent,
};
use pool_monitor::{
    Notifier, PoolEvent, PoolMonitor, PoolMonitorBuilder, RpcSource, decoder::Initialize,
};

const POOL_MANAGER: Address = address!("0x000000000004444c5dc75cB358380D2e3dE08A90");
const HOOK: Address = address!("0x3333333333333333333333333333333333333333");
const POOL_ID: B256 =
    b256!("0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");

#[derive(Default)]
struct CountingNotifier {
    calls: AtomicUsize,
}

impl Notifier for CountingNotifier {
    fn notify(&self, _event: &PoolEvent) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn initialize_log(id: B256, hooks: Address) -> Log {
    let event = Initialize {
        id,
        currency0: address!("0x1111111111111111111111111111111111111111"),
        currency1: address!("0x2222222222222222222222222222222222222222"),
        fee: 3000.try_into().unwrap(),
        tickSpacing: 60.try_into().unwrap(),
        hooks,
        sqrtPriceX96: U160::from(1u8),
        tick: 0.try_into().unwrap(),
    };

    Log {
        inner: alloy::primitives::Log { address: POOL_MANAGER, data: event.encode_log_data() },
        ..Default::default()
    }
}

fn monitor_at(
    store_path: &Path,
    hook: Option<Address>,
) -> (Asserter, Arc<CountingNotifier>, PoolMonitor) {
    let asserter = Asserter::new();
    let provider = RootProvider::new(RpcClient::mocked(asserter.clone()));
    let notifier = Arc::new(CountingNotifier::default());

    let mut builder = PoolMonitorBuilder::new(POOL_MANAGER)
        .store_path(store_path)
        .notifier(notifier.clone());
    if let Some(hook) = hook {
        builder = builder.hook(hook);
    }

    let monitor = builder.connect(RpcSource::new(provider)).unwrap();
    (asserter, notifier, monitor)
}

#[tokio::test]
async fn backfilled_pool_is_not_surfaced_again_by_live_delivery() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store_path = dir.path().join("pools.json");
    let (asserter, notifier, monitor) = monitor_at(&store_path, None);

    // Backfill finds one matching record.
    asserter.push_success(&U64::from(50_000u64));
    asserter.push_success(&vec![initialize_log(POOL_ID, HOOK)]);
    monitor.backfill().await?;

    assert_eq!(monitor.pool_count().await, 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);

    // The live subscription later redelivers the same pool.
    assert!(!monitor.process_log(&initialize_log(POOL_ID, HOOK)).await);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);

    // A different pool id still comes through.
    let other = b256!("0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
    assert!(monitor.process_log(&initialize_log(other, HOOK)).await);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test]
async fn dedup_survives_a_restart() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store_path = dir.path().join("pools.json");

    {
        let (_, notifier, monitor) = monitor_at(&store_path, None);
        assert!(monitor.process_log(&initialize_log(POOL_ID, HOOK)).await);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    // New process, same store file: the pool must not be surfaced a second time.
    let (_, notifier, monitor) = monitor_at(&store_path, None);
    assert!(!monitor.process_log(&initialize_log(POOL_ID, HOOK)).await);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    assert_eq!(monitor.pool_count().await, 1);

    Ok(())
}

#[tokio::test]
async fn hook_filter_drops_foreign_pools() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store_path = dir.path().join("pools.json");
    let (_, notifier, monitor) = monitor_at(&store_path, Some(HOOK));

    let foreign = address!("0x4444444444444444444444444444444444444444");
    assert!(!monitor.process_log(&initialize_log(POOL_ID, foreign)).await);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    assert_eq!(monitor.pool_count().await, 0);

    // The same id later arriving with the configured hook is accepted.
    assert!(monitor.process_log(&initialize_log(POOL_ID, HOOK)).await);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);

    Ok(())
}

#[tokio::test]
async fn undecodable_records_are_skipped() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let (_, notifier, monitor) = monitor_at(&dir.path().join("pools.json"), None);

    let mut log = initialize_log(POOL_ID, HOOK);
    log.inner.data = alloy::primitives::LogData::new_unchecked(vec![], Default::default());
    assert!(!monitor.process_log(&log).await);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);

    // The malformed record must not poison the pipeline for later deliveries.
    assert!(monitor.process_log(&initialize_log(POOL_ID, HOOK)).await);
    Ok(())
}

#[tokio::test]
async fn concurrent_redelivery_is_accepted_exactly_once() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let (_, notifier, monitor) = monitor_at(&dir.path().join("pools.json"), None);
    let monitor = Arc::new(monitor);

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..16 {
        let monitor = monitor.clone();
        tasks.spawn(async move { monitor.process_log(&initialize_log(POOL_ID, HOOK)).await });
    }

    let accepted = tasks.join_all().await.into_iter().filter(|accepted| *accepted).count();

    assert_eq!(accepted, 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    assert_eq!(monitor.pool_count().await, 1);
    Ok(())
}
