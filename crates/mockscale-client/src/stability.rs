//! Software stability detection.
//!
//! A scale's own stability flag is trusted when set. When the scale says
//! "unstable", the tracker still promotes the reading to stable if the
//! weight has stayed within a tolerance of its reference for long enough.

use std::time::{Duration, Instant};

use tracing::debug;

/// Tracks how long the weight has held still.
#[derive(Debug)]
pub struct StabilityTracker {
    /// Allowed deviation from the reference weight (grams).
    tolerance_g: f64,
    /// How long the weight must hold within tolerance.
    threshold: Duration,
    /// Last weight accepted as the reference.
    reference_g: f64,
    /// When the weight last moved outside tolerance.
    since: Option<Instant>,
}

impl StabilityTracker {
    pub fn new(tolerance_g: f64, threshold: Duration) -> Self {
        Self {
            tolerance_g,
            threshold,
            reference_g: 0.0,
            since: None,
        }
    }

    /// Record a sample taken at `now` and return whether it counts as
    /// stable.
    pub fn record(&mut self, grams: f64, hardware_stable: bool, now: Instant) -> bool {
        let since = *self.since.get_or_insert(now);

        if hardware_stable {
            self.reference_g = grams;
            self.since = Some(now);
            return true;
        }

        if (grams - self.reference_g).abs() <= self.tolerance_g {
            if now.duration_since(since) >= self.threshold {
                debug!(grams, held = ?now.duration_since(since), "weight settled");
                self.reference_g = grams;
                return true;
            }
            false
        } else {
            self.reference_g = grams;
            self.since = Some(now);
            false
        }
    }

    /// Current reference weight (grams).
    pub fn reference(&self) -> f64 {
        self.reference_g
    }
}
