//! JSON handlers.
//!
//! Each handler performs exactly one instrument operation and logs the
//! values it produced.

use axum::Json;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use tracing::{debug, info};

use mockscale_core::TareResult;

use crate::ApiState;

/// GET /api/weight
pub async fn read_weight(State(state): State<ApiState>) -> impl IntoResponse {
    let reading = state.instrument.read_weight();

    info!(
        weight = %format_args!("{:.2}", reading.weight),
        stable = if reading.stable { "✓" } else { "✗" },
        tare = %format_args!("{:.2}", reading.tare),
        "weight read"
    );

    (
        StatusCode::OK,
        [(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")],
        Json(state.format.render(&reading)),
    )
}

/// POST /api/tare
///
/// Any request body is ignored.
pub async fn tare(State(state): State<ApiState>) -> Json<TareResult> {
    let result = state.instrument.tare();
    info!(tare = %format_args!("{:.2}", result.tare), "tare applied");
    Json(result)
}

/// Unknown path, or a known path with the wrong method.
pub async fn not_found(method: Method, uri: Uri) -> StatusCode {
    debug!(%method, %uri, "no route");
    StatusCode::NOT_FOUND
}
