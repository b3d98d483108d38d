//! Application layer: the simulated gateway and the batch orchestrator that
//! drives it.

pub mod batch;
pub mod gateway;

pub use batch::BatchOrchestrator;
pub use gateway::PaymentGateway;
