//! Reference client against a live emulator on a loopback port.

use std::time::Duration;

use mockscale_client::{Poller, ScaleClient};
use mockscale_core::WireFormat;
use mockscale_core::config::ClientConfig;
use mockscale_instrument::{Instrument, InstrumentModel, ScriptedRandom};
use tokio::sync::watch;

async fn spawn_scale(instrument: Instrument, format: WireFormat) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = mockscale_api::build_router(instrument, format);
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr.to_string()
}

fn client_config(address: String) -> ClientConfig {
    ClientConfig {
        address,
        read_interval_ms: 20,
        ..Default::default()
    }
}

fn scripted(uniforms: &[f64], chances: &[bool]) -> Instrument {
    let rng = ScriptedRandom::new()
        .with_uniforms(uniforms.iter().copied())
        .with_chances(chances.iter().copied());
    Instrument::new(InstrumentModel::default(), Box::new(rng))
}

#[tokio::test]
async fn client_probe_fetch_and_tare() {
    let address = spawn_scale(scripted(&[10.0, 0.1], &[true, true]), WireFormat::Standard).await;
    let client = ScaleClient::new(&client_config(address));

    client.probe().await.unwrap();

    let sample = client.fetch_weight().await.unwrap();
    assert_eq!(sample.grams, 10_000.0);
    assert!(sample.stable);

    let tared = client.tare().await.unwrap();
    assert!(tared.success);
    assert_eq!(tared.tare, 10.0);

    let sample = client.fetch_weight().await.unwrap();
    assert!((sample.grams - 100.0).abs() < 1e-6, "grams {}", sample.grams);
}

#[tokio::test]
async fn client_reads_every_dialect() {
    for format in [WireFormat::Standard, WireFormat::Nested, WireFormat::Compact] {
        let address = spawn_scale(scripted(&[6.25], &[false]), format).await;
        let client = ScaleClient::new(&client_config(address));
        let sample = client.fetch_weight().await.unwrap();
        assert_eq!(sample.grams, 6250.0, "{format}");
        assert!(!sample.stable, "{format}");
    }
}

#[tokio::test]
async fn client_wrong_path_reports_status() {
    let address = spawn_scale(scripted(&[], &[]), WireFormat::Standard).await;
    let config = ClientConfig {
        weight_path: "/weight".to_string(),
        ..client_config(address)
    };
    let client = ScaleClient::new(&config);
    let err = client.fetch_weight().await.unwrap_err();
    assert!(err.to_string().contains("404"), "{err}");
}

#[tokio::test]
async fn poller_delivers_readings_until_shutdown() {
    let instrument = Instrument::default();
    let address = spawn_scale(instrument.clone(), WireFormat::Standard).await;
    let config = client_config(address);
    let poller = Poller::new(ScaleClient::new(&config), &config);

    let (tx, rx) = watch::channel(false);
    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();
    let handle = tokio::spawn(poller.run(rx, move |event| {
        let _ = event_tx.send(event);
    }));

    for _ in 0..3 {
        let event = tokio::time::timeout(Duration::from_secs(5), event_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!((0.0..=20_000.0).contains(&event.grams));
        if event.hardware_stable {
            assert!(event.stable);
        }
    }

    tx.send(true).unwrap();
    let delivered = handle.await.unwrap();
    assert!(delivered >= 3);
    assert!(instrument.snapshot().reads >= 3);
}
