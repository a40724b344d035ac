//! Polling loop — reads the scale at a fixed interval until shutdown.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, warn};

use mockscale_core::config::ClientConfig;

use crate::client::ScaleClient;
use crate::stability::StabilityTracker;

/// Delay before retrying after a failed read.
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// One processed reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightEvent {
    pub grams: f64,
    /// Stability after software detection.
    pub stable: bool,
    /// Stability as reported by the scale.
    pub hardware_stable: bool,
}

/// Polls one scale and runs each sample through a `StabilityTracker`.
pub struct Poller {
    client: ScaleClient,
    interval: Duration,
    tracker: StabilityTracker,
}

impl Poller {
    pub fn new(client: ScaleClient, config: &ClientConfig) -> Self {
        Self {
            client,
            interval: Duration::from_millis(config.read_interval_ms),
            tracker: StabilityTracker::new(
                config.stable_tolerance_g,
                Duration::from_millis(config.stable_threshold_ms),
            ),
        }
    }

    /// Poll until `shutdown` flips, handing every sample to `on_event`.
    ///
    /// Failed reads are logged and retried after a one-second backoff.
    /// Returns the number of samples delivered.
    pub async fn run<F>(mut self, mut shutdown: watch::Receiver<bool>, mut on_event: F) -> u64
    where
        F: FnMut(WeightEvent),
    {
        let mut delivered = 0;
        let mut delay = Duration::ZERO;

        debug!(address = %self.client.address(), interval = ?self.interval, "poller starting");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.changed() => {
                    debug!("poller shutting down");
                    break;
                }
            }

            let result = tokio::select! {
                result = self.client.fetch_weight() => result,
                _ = shutdown.changed() => {
                    debug!("poller shutting down mid-request");
                    break;
                }
            };

            match result {
                Ok(sample) => {
                    let stable = self.tracker.record(sample.grams, sample.stable, Instant::now());
                    on_event(WeightEvent {
                        grams: sample.grams,
                        stable,
                        hardware_stable: sample.stable,
                    });
                    delivered += 1;
                    delay = self.interval;
                }
                Err(e) => {
                    warn!(address = %self.client.address(), error = %e, "weight read failed");
                    delay = ERROR_BACKOFF;
                }
            }
        }

        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn poller_stops_on_shutdown_without_scale() {
        let config = ClientConfig {
            address: "127.0.0.1:1".to_string(),
            read_interval_ms: 10,
            connect_timeout_ms: 50,
            request_timeout_ms: 50,
            ..Default::default()
        };
        let poller = Poller::new(ScaleClient::new(&config), &config);
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(poller.run(rx, |_| {}));
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(true).unwrap();

        let delivered = handle.await.unwrap();
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn poller_stops_during_stalled_request() {
        // Accepts connections at the socket level but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ClientConfig {
            address: listener.local_addr().unwrap().to_string(),
            read_interval_ms: 10,
            request_timeout_ms: 30_000,
            ..Default::default()
        };
        let poller = Poller::new(ScaleClient::new(&config), &config);
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(poller.run(rx, |_| {}));
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(true).unwrap();

        let delivered = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("poller did not stop while a request was pending")
            .unwrap();
        assert_eq!(delivered, 0);
        drop(listener);
    }
}
