//! Analysis modules.
//!
//! Turns the seed directory into an aggregate question report.

pub mod aggregator;

pub use aggregator::*;
