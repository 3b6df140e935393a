//! BuyLevel Engine library.
//!
//! Lets players spend kill points on an immediate weapon-level advance.
//!
//! ## Structure
//!
//! - `use_cases/` - The level purchase transaction and equipment sync
//! - `infrastructure/` - Ports, settings, and host-side adapters
//! - `api/` - Command surface
//! - `app` - Plugin composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end purchase flows against the in-memory host.
#[cfg(test)]
mod e2e_tests;

pub use app::BuyLevelPlugin;
