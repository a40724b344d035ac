//! Emulator mode — serves the scale HTTP surface until Ctrl-C.

use std::net::SocketAddr;

use tracing::info;

use mockscale_core::ScaleConfig;
use mockscale_instrument::Instrument;

/// Run the scale emulator.
pub async fn run_serve(config: ScaleConfig) -> anyhow::Result<()> {
    info!("mock WiFi scale starting");

    let instrument = Instrument::from_config(&config.instrument)?;
    if let Some(seed) = config.instrument.seed {
        info!(seed, "using fixed RNG seed");
    }

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    let addr = listener.local_addr()?;
    log_banner(&config, addr);

    let router = mockscale_api::build_router(instrument, config.server.format);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            crate::shutdown_signal().await;
            info!("shutdown signal received");
        })
        .await?;

    info!("mock WiFi scale stopped");
    Ok(())
}

fn log_banner(config: &ScaleConfig, addr: SocketAddr) {
    let model = &config.instrument;
    info!(%addr, "listening");
    info!("weight API: GET http://{addr}/api/weight");
    info!("tare API:   POST http://{addr}/api/tare");
    info!(
        capacity_kg = model.capacity,
        precision_kg = 0.01,
        stable_rate = %format_args!("{:.0}%", model.stable_probability * 100.0),
        format = %config.server.format,
        "instrument ready"
    );
    info!(
        "point the integration module at Hardware:WiFiScale:IpAddress = {} and Port = {}",
        addr.ip(),
        addr.port()
    );
    info!("press Ctrl+C to stop");
}
