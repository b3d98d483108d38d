use crate::domain::ports::Entropy;
use crate::domain::simulation::{LatencyWindow, Probability};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Draws from the calling thread's own generator.
///
/// Concurrent operations on different worker threads never share state.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl Entropy for ThreadEntropy {
    fn latency(&self, window: LatencyWindow) -> Duration {
        window.sample(&mut rand::thread_rng())
    }

    fn chance(&self, probability: Probability) -> bool {
        probability.sample(&mut rand::thread_rng())
    }
}

/// Reproducible generator seeded once and shared behind a mutex.
#[derive(Debug)]
pub struct SeededEntropy {
    rng: Mutex<StdRng>,
}

impl SeededEntropy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        // A panic while holding the lock cannot leave the generator invalid.
        self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Entropy for SeededEntropy {
    fn latency(&self, window: LatencyWindow) -> Duration {
        window.sample(&mut *self.rng())
    }

    fn chance(&self, probability: Probability) -> bool {
        probability.sample(&mut *self.rng())
    }
}

/// Replays a fixed script of outcomes, one per `chance` call, ignoring the
/// requested probability.
///
/// Latency is always the window minimum. Once the script runs out every draw
/// reports `false`.
#[derive(Debug, Default)]
pub struct ScriptedEntropy {
    outcomes: Mutex<VecDeque<bool>>,
}

impl ScriptedEntropy {
    pub fn new(outcomes: impl IntoIterator<Item = bool>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl Entropy for ScriptedEntropy {
    fn latency(&self, window: LatencyWindow) -> Duration {
        window.min()
    }

    fn chance(&self, _probability: Probability) -> bool {
        self.outcomes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or(false)
    }
}
