use crate::error::GatewayError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Half-open window `[min_ms, max_ms)` from which simulated latency is drawn.
///
/// A degenerate window (`min_ms == max_ms`) always yields exactly `min_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct LatencyWindow {
    min_ms: u64,
    max_ms: u64,
}

#[derive(Deserialize)]
struct RawWindow {
    min_ms: u64,
    max_ms: u64,
}

impl TryFrom<RawWindow> for LatencyWindow {
    type Error = GatewayError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.min_ms, raw.max_ms)
    }
}

impl LatencyWindow {
    pub fn new(min_ms: u64, max_ms: u64) -> Result<Self, GatewayError> {
        if min_ms > max_ms {
            return Err(GatewayError::invalid(format!(
                "latency window minimum {min_ms}ms exceeds maximum {max_ms}ms"
            )));
        }
        Ok(Self { min_ms, max_ms })
    }

    /// A window that never suspends.
    pub const fn instant() -> Self {
        Self {
            min_ms: 0,
            max_ms: 0,
        }
    }

    pub const fn fixed(ms: u64) -> Self {
        Self {
            min_ms: ms,
            max_ms: ms,
        }
    }

    pub fn min(&self) -> Duration {
        Duration::from_millis(self.min_ms)
    }

    pub fn max(&self) -> Duration {
        Duration::from_millis(self.max_ms)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.min_ms == self.max_ms {
            return self.min();
        }
        Duration::from_millis(rng.gen_range(self.min_ms..self.max_ms))
    }
}

/// A probability in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    pub const NEVER: Self = Self(0.0);
    pub const ALWAYS: Self = Self(1.0);

    pub fn new(value: f64) -> Result<Self, GatewayError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GatewayError::invalid(format!(
                "probability must be within [0, 1], got {value}"
            )))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_bool(self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = GatewayError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Probability> for f64 {
    fn from(probability: Probability) -> Self {
        probability.0
    }
}

/// Latency and failure characteristics of one simulated operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationProfile {
    pub latency: LatencyWindow,
    /// Chance that a valid request fails (or, for status polls, comes back
    /// `Unknown`).
    pub failure_rate: Probability,
}

impl SimulationProfile {
    pub fn new(latency: LatencyWindow, failure_rate: Probability) -> Self {
        Self {
            latency,
            failure_rate,
        }
    }

    pub fn payment() -> Self {
        Self::new(
            LatencyWindow {
                min_ms: 50,
                max_ms: 200,
            },
            Probability(0.4),
        )
    }

    pub fn status() -> Self {
        Self::new(
            LatencyWindow {
                min_ms: 20,
                max_ms: 100,
            },
            Probability(0.3),
        )
    }

    pub fn refund() -> Self {
        Self::new(
            LatencyWindow {
                min_ms: 100,
                max_ms: 300,
            },
            Probability(0.2),
        )
    }
}
