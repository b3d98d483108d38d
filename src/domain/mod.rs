//! Pure domain types: card validation, fee schedule, payment values and the
//! ports through which the simulator reaches randomness and time.

pub mod card;
pub mod fee;
pub mod payment;
pub mod ports;
pub mod simulation;

pub use card::validate_card;
pub use fee::FeeSchedule;
pub use payment::{Amount, PaymentRequest, PaymentStatus, Receipt, ReceiptKind, TransactionId};
pub use simulation::{LatencyWindow, Probability, SimulationProfile};
