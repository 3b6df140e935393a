//! Aggregate roots - domain objects that own their related data
//!
//! Aggregates expose behavior through methods, not public fields, and
//! return the resulting state from transitions instead of mutating in place.

pub mod progression_record;

pub use progression_record::{ProgressionRecord, PurchasedRecord};
