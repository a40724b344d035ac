//! HTTP/1 client for a WiFi scale.
//!
//! Opens one connection per request, the way a polling integration
//! module does against an embedded scale web server.

use std::time::Duration;

use bytes::Bytes;
use http::{Method, Request, StatusCode, header};
use http_body_util::{BodyExt, Full};
use tracing::{debug, info};

use mockscale_core::TareResult;
use mockscale_core::config::ClientConfig;

use crate::error::{ClientError, ClientResult};
use crate::response::{WeightResponse, WeightSample};

/// Client for one scale at a fixed `host:port`.
#[derive(Debug, Clone)]
pub struct ScaleClient {
    address: String,
    weight_path: String,
    tare_path: String,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl ScaleClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            address: config.address.clone(),
            weight_path: config.weight_path.clone(),
            tare_path: config.tare_path.clone(),
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            request_timeout: Duration::from_millis(config.request_timeout_ms),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Check that something answers HTTP at the scale address.
    ///
    /// A 404 on `/` still proves a web server is listening, so it counts
    /// as reachable.
    pub async fn probe(&self) -> ClientResult<()> {
        let (status, _) = self
            .send(Method::GET, "/", Bytes::new(), self.connect_timeout)
            .await?;
        match status {
            StatusCode::OK | StatusCode::NOT_FOUND => {
                info!(address = %self.address, "scale reachable");
                Ok(())
            }
            other => Err(ClientError::Status(other.as_u16())),
        }
    }

    /// Fetch and normalize one reading.
    pub async fn fetch_weight(&self) -> ClientResult<WeightSample> {
        let (status, body) = self
            .send(Method::GET, &self.weight_path, Bytes::new(), self.request_timeout)
            .await?;
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        let sample = WeightResponse::from_slice(&body)?.to_sample()?;
        debug!(grams = sample.grams, stable = sample.stable, "weight received");
        Ok(sample)
    }

    /// Send the tare command.
    pub async fn tare(&self) -> ClientResult<TareResult> {
        let (status, body) = self
            .send(
                Method::POST,
                &self.tare_path,
                Bytes::from_static(b"{}"),
                self.request_timeout,
            )
            .await?;
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        let result: TareResult = serde_json::from_slice(&body)?;
        info!(tare = result.tare, "tare acknowledged");
        Ok(result)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Bytes,
        timeout: Duration,
    ) -> ClientResult<(StatusCode, Bytes)> {
        let exchange = async {
            let stream = tokio::net::TcpStream::connect(&self.address)
                .await
                .map_err(|e| ClientError::Connect {
                    address: self.address.clone(),
                    reason: e.to_string(),
                })?;

            let io = hyper_util::rt::TokioIo::new(stream);
            let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
                .await
                .map_err(|e| ClientError::Handshake(e.to_string()))?;

            // Drive the connection in the background.
            tokio::spawn(async move {
                let _ = conn.await;
            });

            let req = Request::builder()
                .method(method)
                .uri(path)
                .header(header::HOST, self.address.as_str())
                .header(header::USER_AGENT, "mockscale-client/0.1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Full::new(body))
                .map_err(|e| ClientError::Request(e.to_string()))?;

            let resp = sender
                .send_request(req)
                .await
                .map_err(|e| ClientError::Request(e.to_string()))?;

            let status = resp.status();
            let bytes = resp
                .into_body()
                .collect()
                .await
                .map_err(|e| ClientError::Body(e.to_string()))?
                .to_bytes();
            Ok::<_, ClientError>((status, bytes))
        };

        tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| ClientError::Timeout(timeout))?
    }
}
