use super::gateway::PaymentGateway;
use crate::domain::payment::{PaymentRequest, Receipt};
use crate::error::{GatewayError, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{info, warn};

/// Drives payments for an ordered list of requests.
///
/// A batch is all-or-nothing: the first failing request aborts the batch and
/// its error is returned as-is. Receipts from earlier requests are discarded
/// and later requests are never attempted.
pub struct BatchOrchestrator<'g> {
    gateway: &'g PaymentGateway,
}

impl<'g> BatchOrchestrator<'g> {
    pub fn new(gateway: &'g PaymentGateway) -> Self {
        Self { gateway }
    }

    /// Processes `requests` one after another, in order.
    ///
    /// Each payment starts only after the previous one resolved, so total
    /// latency is the sum of the individual latencies.
    pub async fn process_batch(&self, requests: &[PaymentRequest]) -> Result<Vec<Receipt>> {
        info!(requests = requests.len(), "processing payment batch");

        let mut receipts = Vec::with_capacity(requests.len());
        for (position, request) in requests.iter().enumerate() {
            match self
                .gateway
                .process_payment(&request.id, request.amount)
                .await
            {
                Ok(receipt) => receipts.push(receipt),
                Err(e) => {
                    warn!(position, error = %e, "payment batch aborted");
                    return Err(e);
                }
            }
        }

        info!(receipts = receipts.len(), "payment batch completed");
        Ok(receipts)
    }

    /// Processes up to `limit` requests at a time.
    ///
    /// Receipts come back in input order. On failure the error of the earliest
    /// failing request (by input position) is returned and in-flight payments
    /// are dropped.
    pub async fn process_batch_bounded(
        &self,
        requests: &[PaymentRequest],
        limit: usize,
    ) -> Result<Vec<Receipt>> {
        if limit == 0 {
            return Err(GatewayError::invalid("batch concurrency must be at least 1"));
        }
        info!(requests = requests.len(), limit, "processing payment batch");

        let receipts: Vec<Receipt> = stream::iter(requests)
            .map(|request| self.gateway.process_payment(&request.id, request.amount))
            .buffered(limit)
            .try_collect()
            .await
            .inspect_err(|e| warn!(error = %e, "payment batch aborted"))?;

        info!(receipts = receipts.len(), "payment batch completed");
        Ok(receipts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;
    use crate::domain::ports::{Delay, Entropy};
    use crate::domain::simulation::{LatencyWindow, Probability, SimulationProfile};
    use crate::infrastructure::{RecordingDelay, ScriptedEntropy, SeededEntropy, TokioDelay};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Hands out latencies in call order and outcomes in completion order.
    struct StaggeredEntropy {
        latencies: Mutex<VecDeque<u64>>,
        outcomes: Mutex<VecDeque<bool>>,
    }

    impl StaggeredEntropy {
        fn new(
            latencies: impl IntoIterator<Item = u64>,
            outcomes: impl IntoIterator<Item = bool>,
        ) -> Self {
            Self {
                latencies: Mutex::new(latencies.into_iter().collect()),
                outcomes: Mutex::new(outcomes.into_iter().collect()),
            }
        }
    }

    impl Entropy for StaggeredEntropy {
        fn latency(&self, _window: LatencyWindow) -> Duration {
            Duration::from_millis(self.latencies.lock().unwrap().pop_front().unwrap_or(0))
        }

        fn chance(&self, _probability: Probability) -> bool {
            self.outcomes.lock().unwrap().pop_front().unwrap_or(false)
        }
    }

    /// Counts suspensions as they begin.
    struct CountingDelay {
        started: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Delay for CountingDelay {
        async fn sleep(&self, duration: Duration) {
            self.started.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(duration).await;
        }
    }

    fn four_requests() -> Vec<PaymentRequest> {
        ["A", "B", "C", "D"]
            .into_iter()
            .map(|id| PaymentRequest::new(id, dec!(5)))
            .collect()
    }

    fn requests() -> Vec<PaymentRequest> {
        vec![
            PaymentRequest::new("A", dec!(10)),
            PaymentRequest::new("B", dec!(20)),
            PaymentRequest::new("C", dec!(30)),
        ]
    }

    fn config(latency_ms: u64, failure_rate: Probability) -> GatewayConfig {
        GatewayConfig {
            payment: SimulationProfile::new(LatencyWindow::fixed(latency_ms), failure_rate),
            ..GatewayConfig::default()
        }
    }

    #[tokio::test]
    async fn test_batch_preserves_order() {
        let delay = RecordingDelay::new();
        let gateway = PaymentGateway::new(
            config(25, Probability::NEVER),
            Box::new(SeededEntropy::new(3)),
            Box::new(delay.clone()),
        );

        let receipts = BatchOrchestrator::new(&gateway)
            .process_batch(&requests())
            .await
            .unwrap();

        let rendered: Vec<String> = receipts.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["SUCCESS:A:10", "SUCCESS:B:20", "SUCCESS:C:30"]);
        assert_eq!(delay.total().await, Duration::from_millis(75));
    }

    #[tokio::test]
    async fn test_batch_stops_at_first_failure() {
        let delay = RecordingDelay::new();
        let gateway = PaymentGateway::new(
            GatewayConfig::default(),
            Box::new(ScriptedEntropy::new([false, true, false])),
            Box::new(delay.clone()),
        );

        let err = BatchOrchestrator::new(&gateway)
            .process_batch(&requests())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::GatewayTimeout {
                transaction_id: "B".to_string()
            }
        );
        // C was never attempted
        assert_eq!(delay.recorded().await.len(), 2);
    }

    #[tokio::test]
    async fn test_batch_invalid_entry_aborts() {
        let delay = RecordingDelay::new();
        let gateway = PaymentGateway::new(
            config(5, Probability::NEVER),
            Box::new(SeededEntropy::new(3)),
            Box::new(delay.clone()),
        );
        let batch = vec![
            PaymentRequest::new("A", dec!(10)),
            PaymentRequest::new("", dec!(20)),
            PaymentRequest::new("C", dec!(30)),
        ];

        let err = BatchOrchestrator::new(&gateway)
            .process_batch(&batch)
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidArgument(_)));
        assert_eq!(delay.recorded().await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let gateway = PaymentGateway::new(
            config(5, Probability::ALWAYS),
            Box::new(SeededEntropy::new(3)),
            Box::new(RecordingDelay::new()),
        );
        let receipts = BatchOrchestrator::new(&gateway)
            .process_batch(&[])
            .await
            .unwrap();
        assert!(receipts.is_empty());
    }

    #[tokio::test]
    async fn test_bounded_batch_keeps_input_order() {
        let gateway = PaymentGateway::with_config(config(0, Probability::NEVER));
        let batch: Vec<PaymentRequest> = (1..=20)
            .map(|i| PaymentRequest::new(format!("TX-{i}"), dec!(1)))
            .collect();

        let receipts = BatchOrchestrator::new(&gateway)
            .process_batch_bounded(&batch, 4)
            .await
            .unwrap();

        let ids: Vec<&str> = receipts.iter().map(|r| r.transaction_id.as_str()).collect();
        let expected: Vec<String> = (1..=20).map(|i| format!("TX-{i}")).collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_bounded_batch_reports_earliest_failure() {
        let gateway = PaymentGateway::new(
            config(0, Probability::NEVER),
            Box::new(ScriptedEntropy::new([false, true, true])),
            Box::new(RecordingDelay::new()),
        );

        let err = BatchOrchestrator::new(&gateway)
            .process_batch_bounded(&requests(), 1)
            .await
            .unwrap_err();
        assert_eq!(err.transaction_id(), Some("B"));
    }

    #[tokio::test]
    async fn test_bounded_batch_rejects_zero_limit() {
        let gateway = PaymentGateway::default();
        let err = BatchOrchestrator::new(&gateway)
            .process_batch_bounded(&requests(), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_batch_orders_receipts_completed_in_reverse() {
        // D finishes first and A last
        let gateway = PaymentGateway::new(
            GatewayConfig::default(),
            Box::new(StaggeredEntropy::new([40, 30, 20, 10], [false; 4])),
            Box::new(TokioDelay),
        );
        let started_at = tokio::time::Instant::now();

        let receipts = BatchOrchestrator::new(&gateway)
            .process_batch_bounded(&four_requests(), 4)
            .await
            .unwrap();

        let ids: Vec<&str> = receipts.iter().map(|r| r.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C", "D"]);
        // ran side by side, not one after another
        assert!(started_at.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_batch_reports_earliest_failure_not_first_finished() {
        // completion order is D, C, B, A: D fails first, B fails later
        let gateway = PaymentGateway::new(
            GatewayConfig::default(),
            Box::new(StaggeredEntropy::new([40, 30, 20, 10], [true, false, true, false])),
            Box::new(TokioDelay),
        );

        let err = BatchOrchestrator::new(&gateway)
            .process_batch_bounded(&four_requests(), 4)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::GatewayTimeout {
                transaction_id: "B".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_batch_cancels_pending_payments() {
        let started = Arc::new(AtomicUsize::new(0));
        let gateway = PaymentGateway::new(
            config(100, Probability::NEVER),
            Box::new(SeededEntropy::new(3)),
            Box::new(CountingDelay {
                started: Arc::clone(&started),
            }),
        );
        let orchestrator = BatchOrchestrator::new(&gateway);

        // A completes at 100ms, B is still suspended when the batch is dropped
        let outcome = tokio::time::timeout(
            Duration::from_millis(150),
            orchestrator.process_batch(&requests()),
        )
        .await;

        assert!(outcome.is_err());
        assert_eq!(started.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(started.load(Ordering::SeqCst), 2);
    }
}
