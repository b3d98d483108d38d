use thiserror::Error;

/// Failures raised by the simulated gateway operations.
///
/// `InvalidArgument` is always detected before any simulated latency and is
/// never randomized. The other two variants are transient and carry the id of
/// the transaction that failed; retrying them is the caller's business.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Gateway timeout for transaction {transaction_id}")]
    GatewayTimeout { transaction_id: String },
    #[error("Refund failed for {transaction_id}: service unavailable")]
    ServiceUnavailable { transaction_id: String },
}

impl GatewayError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Whether a caller could reasonably retry the same request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::GatewayTimeout { .. } | Self::ServiceUnavailable { .. }
        )
    }

    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::GatewayTimeout { transaction_id } | Self::ServiceUnavailable { transaction_id } => {
                Some(transaction_id)
            }
        }
    }
}

pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

/// Errors surfaced by the outer layers (CLI, config loading, CSV input).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
