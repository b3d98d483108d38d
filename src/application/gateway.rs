use crate::config::GatewayConfig;
use crate::domain::card;
use crate::domain::payment::{Amount, PaymentStatus, Receipt, TransactionId};
use crate::domain::ports::{DelayBox, EntropyBox};
use crate::domain::simulation::SimulationProfile;
use crate::error::{GatewayError, Result};
use crate::infrastructure::{ThreadEntropy, TokioDelay};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Simulated payment processor.
///
/// Card validation and fee calculation are pure. Payments, status polls and
/// refunds each suspend once for a random latency, then draw a single random
/// outcome. Nothing is retried internally: transient failures go straight back
/// to the caller.
pub struct PaymentGateway {
    config: GatewayConfig,
    entropy: EntropyBox,
    delay: DelayBox,
}

impl Default for PaymentGateway {
    fn default() -> Self {
        Self::with_config(GatewayConfig::default())
    }
}

impl PaymentGateway {
    pub fn new(config: GatewayConfig, entropy: EntropyBox, delay: DelayBox) -> Self {
        Self {
            config,
            entropy,
            delay,
        }
    }

    /// Gateway with the given profiles, thread-local randomness and real
    /// tokio sleeps.
    pub fn with_config(config: GatewayConfig) -> Self {
        Self::new(config, Box::new(ThreadEntropy), Box::new(TokioDelay))
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn validate_card(&self, card_number: &str) -> bool {
        card::validate_card(card_number)
    }

    pub fn calculate_fee(&self, amount: Decimal, currency: &str) -> Result<Decimal> {
        self.config.fees.calculate_fee(amount, currency)
    }

    /// Charges `amount` against transaction `id`.
    ///
    /// Fails with `GatewayTimeout` at the configured payment failure rate.
    pub async fn process_payment(&self, id: &str, amount: Decimal) -> Result<Receipt> {
        let (transaction_id, amount) = validate_request(id, amount)?;
        let profile = self.config.payment;

        if self.attempt(&transaction_id, profile).await {
            warn!(transaction_id = %transaction_id, "simulated gateway timeout");
            return Err(GatewayError::GatewayTimeout {
                transaction_id: transaction_id.to_string(),
            });
        }

        info!(transaction_id = %transaction_id, amount = %amount, "payment accepted");
        Ok(Receipt::payment(transaction_id, amount))
    }

    /// Polls the processor for the status of `id`.
    ///
    /// An ambiguous answer is reported as `PaymentStatus::Unknown`, never as an
    /// error.
    pub async fn get_payment_status(&self, id: &str) -> Result<PaymentStatus> {
        let transaction_id = TransactionId::parse(id)?;
        let profile = self.config.status;

        let status = if self.attempt(&transaction_id, profile).await {
            PaymentStatus::Unknown
        } else {
            PaymentStatus::Completed
        };
        debug!(transaction_id = %transaction_id, %status, "status polled");
        Ok(status)
    }

    /// Refunds `amount` on transaction `id`.
    ///
    /// Fails with `ServiceUnavailable` at the configured refund failure rate.
    pub async fn refund_payment(&self, id: &str, amount: Decimal) -> Result<Receipt> {
        let (transaction_id, amount) = validate_request(id, amount)?;
        let profile = self.config.refund;

        if self.attempt(&transaction_id, profile).await {
            warn!(transaction_id = %transaction_id, "simulated refund outage");
            return Err(GatewayError::ServiceUnavailable {
                transaction_id: transaction_id.to_string(),
            });
        }

        info!(transaction_id = %transaction_id, amount = %amount, "refund accepted");
        Ok(Receipt::refund(transaction_id, amount))
    }

    /// Suspends for a latency drawn from `profile`, then reports whether the
    /// attempt hit its failure branch.
    async fn attempt(&self, transaction_id: &TransactionId, profile: SimulationProfile) -> bool {
        let latency = self.entropy.latency(profile.latency);
        debug!(
            transaction_id = %transaction_id,
            ?latency,
            "simulating processor latency"
        );
        self.delay.sleep(latency).await;
        self.entropy.chance(profile.failure_rate)
    }
}

fn validate_request(id: &str, amount: Decimal) -> Result<(TransactionId, Amount)> {
    Ok((TransactionId::parse(id)?, Amount::new(amount)?))
}
