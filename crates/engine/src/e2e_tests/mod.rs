//! End-to-end purchase tests.
//!
//! These tests drive the loaded plugin through its command surface against
//! the in-memory progression service and the simulated host, so every layer
//! between a chat trigger and the equipped weapon is real.
//!
//! ```bash
//! cargo test -p buylevel-engine --lib e2e_tests
//! ```

mod console_flow_tests;
mod e2e_helpers;

pub use e2e_helpers::*;
