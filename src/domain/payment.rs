use crate::error::GatewayError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Caller-supplied transaction identifier. Never empty or blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn parse(id: &str) -> Result<Self, GatewayError> {
        if id.trim().is_empty() {
            return Err(GatewayError::invalid("transaction id must not be empty"));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a positive monetary amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, GatewayError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(GatewayError::invalid(format!(
                "amount must be positive, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = GatewayError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of a payment batch, as supplied by the caller.
///
/// Left unvalidated on purpose: an empty id or non-positive amount surfaces as
/// `InvalidArgument` when the entry is processed, at its position in the batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentRequest {
    pub id: String,
    /// Parsed from its text form so the caller's scale and digits survive.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

impl PaymentRequest {
    pub fn new(id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            id: id.into(),
            amount,
        }
    }
}

impl<S: Into<String>> From<(S, Decimal)> for PaymentRequest {
    fn from((id, amount): (S, Decimal)) -> Self {
        Self::new(id, amount)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    /// The processor answered, but could not say what happened.
    Unknown,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Completed => write!(f, "COMPLETED"),
            PaymentStatus::Failed => write!(f, "FAILED"),
            PaymentStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    Payment,
    Refund,
}

impl ReceiptKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ReceiptKind::Payment => "SUCCESS",
            ReceiptKind::Refund => "REFUND",
        }
    }
}

/// Confirmation returned by a successful payment or refund.
///
/// Renders as `SUCCESS:<id>:<amount>` or `REFUND:<id>:<amount>`, keeping the
/// amount's decimal scale (`99.99`, `1500.00`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub kind: ReceiptKind,
    pub transaction_id: TransactionId,
    pub amount: Amount,
}

impl Receipt {
    pub fn payment(transaction_id: TransactionId, amount: Amount) -> Self {
        Self {
            kind: ReceiptKind::Payment,
            transaction_id,
            amount,
        }
    }

    pub fn refund(transaction_id: TransactionId, amount: Amount) -> Self {
        Self {
            kind: ReceiptKind::Refund,
            transaction_id,
            amount,
        }
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.kind.prefix(),
            self.transaction_id,
            self.amount
        )
    }
}

impl FromStr for Receipt {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Ids may themselves contain ':' so split the prefix and amount off the ends.
        let (prefix, rest) = s
            .split_once(':')
            .ok_or_else(|| GatewayError::invalid(format!("malformed receipt: {s}")))?;
        let (id, amount) = rest
            .rsplit_once(':')
            .ok_or_else(|| GatewayError::invalid(format!("malformed receipt: {s}")))?;

        let kind = match prefix {
            "SUCCESS" => ReceiptKind::Payment,
            "REFUND" => ReceiptKind::Refund,
            other => {
                return Err(GatewayError::invalid(format!(
                    "unknown receipt prefix: {other}"
                )));
            }
        };
        let amount = Decimal::from_str(amount)
            .map_err(|e| GatewayError::invalid(format!("malformed receipt amount: {e}")))?;

        Ok(Self {
            kind,
            transaction_id: TransactionId::parse(id)?,
            amount: Amount::new(amount)?,
        })
    }
}
