use alloy::providers::{Provider, ProviderBuilder};
use pool_monitor::{MonitorConfig, PoolMonitorBuilder, RpcSource};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).try_init();

    let config = MonitorConfig::from_env()?;
    info!(
        pool_manager = %config.pool_manager,
        hook = ?config.hook_address,
        backfill_blocks = config.backfill_blocks,
        store = %config.store_path.display(),
        "starting pool monitor"
    );

    let provider = ProviderBuilder::new().connect(&config.rpc_url).await?;
    let rpc = RpcSource::new(provider.root().clone());

    let monitor = PoolMonitorBuilder::from_config(&config).connect(rpc)?;

    tokio::select! {
        result = monitor.run() => {
            if let Err(err) = result {
                error!(error = %err, "monitor stopped");
                monitor.flush().await?;
                return Err(err.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    monitor.flush().await?;
    info!(pools = monitor.pool_count().await, "pool store flushed, exiting");
    Ok(())
}
