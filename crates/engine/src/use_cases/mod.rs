//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across ports to fulfill user stories.

pub mod buy_level;

pub use buy_level::{BuyLevel, PurchaseOutcome};
