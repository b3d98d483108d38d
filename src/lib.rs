pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;

pub use application::{BatchOrchestrator, PaymentGateway};
pub use config::GatewayConfig;
pub use error::{AppError, GatewayError};
