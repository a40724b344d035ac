//! mockscale-api — HTTP front of the scale emulator.
//!
//! Routes requests to the shared [`Instrument`] and serializes its
//! readings. Holds no measurement state of its own.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/weight` | Advance the simulation and return a reading |
//! | POST | `/api/tare` | Zero the scale at the current raw weight |
//! | GET | `/` | Informational HTML page |
//!
//! Anything else, including a wrong method on a known path, is a 404.

pub mod handlers;
pub mod landing;

use axum::Router;
use axum::routing::{get, post};
use mockscale_core::WireFormat;
use mockscale_instrument::Instrument;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub instrument: Instrument,
    pub format: WireFormat,
}

/// Build the complete router (JSON API + landing page).
pub fn build_router(instrument: Instrument, format: WireFormat) -> Router {
    let state = ApiState { instrument, format };

    Router::new()
        .route("/", get(landing::index).fallback(handlers::not_found))
        .route(
            "/api/weight",
            get(handlers::read_weight).fallback(handlers::not_found),
        )
        .route("/api/tare", post(handlers::tare).fallback(handlers::not_found))
        .fallback(handlers::not_found)
        .with_state(state)
}
