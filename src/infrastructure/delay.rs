use crate::domain::ports::Delay;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Suspends on the tokio timer without blocking the worker thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Records every requested suspension and returns immediately.
///
/// Clones share the same log, so a test can keep one handle while the
/// gateway owns another.
#[derive(Debug, Default, Clone)]
pub struct RecordingDelay {
    sleeps: Arc<RwLock<Vec<Duration>>>,
}

impl RecordingDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn recorded(&self) -> Vec<Duration> {
        self.sleeps.read().await.clone()
    }

    pub async fn total(&self) -> Duration {
        self.sleeps.read().await.iter().sum()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.write().await.push(duration);
    }
}
