use super::simulation::{LatencyWindow, Probability};
use async_trait::async_trait;
use std::time::Duration;

/// Source of randomness for latency and outcome draws.
///
/// Implementations must be safe to share across concurrently running
/// operations.
pub trait Entropy: Send + Sync {
    fn latency(&self, window: LatencyWindow) -> Duration;
    /// `Probability::NEVER` must always yield false and `Probability::ALWAYS`
    /// always true.
    fn chance(&self, probability: Probability) -> bool;
}

/// The single suspension point of every simulated operation.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub type EntropyBox = Box<dyn Entropy>;
pub type DelayBox = Box<dyn Delay>;
