//! Tick data representation.

use serde::{Deserialize, Serialize};

/// A single price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Unix timestamp in whole seconds.
    pub time: i64,
    /// Observed price. Always finite and positive once normalized.
    pub price: f64,
    /// Traded volume, when the source provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Tick {
    /// Creates a new tick without volume.
    #[must_use]
    pub const fn new(time: i64, price: f64) -> Self {
        Self {
            time,
            price,
            volume: None,
        }
    }

    /// Attaches a traded volume to the tick.
    #[must_use]
    pub const fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Returns the volume, or zero when the source had none.
    #[must_use]
    pub fn volume_or_zero(&self) -> f64 {
        self.volume.unwrap_or(0.0)
    }
}
