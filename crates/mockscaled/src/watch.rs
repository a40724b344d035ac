//! Client mode — poll or tare a scale.

use tokio::sync::watch;
use tracing::info;

use mockscale_client::{Poller, ScaleClient};
use mockscale_core::ScaleConfig;

/// Probe the scale, then log every reading until Ctrl-C.
pub async fn run_watch(config: ScaleConfig) -> anyhow::Result<()> {
    let client = ScaleClient::new(&config.client);
    info!(address = %client.address(), "connecting to scale");
    client.probe().await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = Poller::new(client, &config.client);
    let poll_handle = tokio::spawn(poller.run(shutdown_rx, |event| {
        info!(
            weight_g = %format_args!("{:.1}", event.grams),
            stable = event.stable,
            hardware_stable = event.hardware_stable,
            "reading"
        );
    }));

    crate::shutdown_signal().await;
    info!("shutdown signal received");
    let _ = shutdown_tx.send(true);

    let delivered = poll_handle.await?;
    info!(readings = delivered, "watch stopped");
    Ok(())
}

/// Send one tare command and report the captured offset.
pub async fn run_tare(config: ScaleConfig) -> anyhow::Result<()> {
    let client = ScaleClient::new(&config.client);
    let result = client.tare().await?;
    info!(
        address = %client.address(),
        tare_kg = result.tare,
        message = %result.message,
        "tare complete"
    );
    Ok(())
}
