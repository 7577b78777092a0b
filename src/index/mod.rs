//! Index building.
//!
//! Turns the descriptor files of one category into autocomplete entries.

pub mod aggregator;

pub use aggregator::*;
