//! Infrastructure implementations.
//!
//! Contains port trait definitions and the adapters the console host wires in.

pub mod correlation;
pub mod host;
pub mod ports;
pub mod progression;
pub mod settings;
