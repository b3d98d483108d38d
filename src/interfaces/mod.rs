//! Input adapters for the command-line surface.

pub mod csv;
