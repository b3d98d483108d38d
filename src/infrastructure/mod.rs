//! Concrete adapters for the domain ports.

pub mod delay;
pub mod entropy;

pub use delay::{RecordingDelay, TokioDelay};
pub use entropy::{ScriptedEntropy, SeededEntropy, ThreadEntropy};
