use crate::error::{GatewayError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Immutable currency → fee-rate table with a fallback rate.
///
/// Currency codes are stored upper-cased, so lookups are case-insensitive.
/// Codes are otherwise matched exactly: `" EUR"` is not `"EUR"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct FeeSchedule {
    rates: BTreeMap<String, Decimal>,
    default_rate: Decimal,
}

#[derive(Deserialize)]
struct RawSchedule {
    #[serde(default)]
    rates: BTreeMap<String, Decimal>,
    default_rate: Decimal,
}

impl TryFrom<RawSchedule> for FeeSchedule {
    type Error = GatewayError;

    fn try_from(raw: RawSchedule) -> Result<Self, Self::Error> {
        Self::new(raw.rates, raw.default_rate)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl FeeSchedule {
    /// Builds a schedule, rejecting negative rates.
    pub fn new<K: AsRef<str>>(
        rates: impl IntoIterator<Item = (K, Decimal)>,
        default_rate: Decimal,
    ) -> Result<Self> {
        check_rate("default", default_rate)?;
        let rates = rates
            .into_iter()
            .map(|(code, rate)| -> Result<(String, Decimal)> {
                check_rate(code.as_ref(), rate)?;
                Ok((code.as_ref().to_uppercase(), rate))
            })
            .collect::<Result<_>>()?;
        Ok(Self {
            rates,
            default_rate,
        })
    }

    /// EUR 1.5%, USD 2.0%, GBP 1.8%, anything else 3.0%.
    pub fn standard() -> Self {
        let rates = [("EUR", dec!(0.015)), ("USD", dec!(0.020)), ("GBP", dec!(0.018))]
            .into_iter()
            .map(|(code, rate)| (code.to_string(), rate))
            .collect();
        Self {
            rates,
            default_rate: dec!(0.030),
        }
    }

    pub fn rate_for(&self, currency: &str) -> Decimal {
        self.rates
            .get(&currency.to_uppercase())
            .copied()
            .unwrap_or(self.default_rate)
    }

    pub fn default_rate(&self) -> Decimal {
        self.default_rate
    }

    /// Fee charged on `amount` in `currency`.
    ///
    /// Fails with `InvalidArgument` for a non-positive amount, or when the
    /// product does not fit in a `Decimal`.
    pub fn calculate_fee(&self, amount: Decimal, currency: &str) -> Result<Decimal> {
        if amount <= Decimal::ZERO {
            return Err(GatewayError::invalid(format!(
                "amount must be positive, got {amount}"
            )));
        }
        amount
            .checked_mul(self.rate_for(currency))
            .ok_or_else(|| GatewayError::invalid(format!("fee on {amount} overflows")))
    }
}

fn check_rate(code: &str, rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO {
        return Err(GatewayError::invalid(format!(
            "fee rate for {code} must not be negative, got {rate}"
        )));
    }
    Ok(())
}
