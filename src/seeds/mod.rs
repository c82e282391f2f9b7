//! Seed data access.
//!
//! Locates per-year seed files and turns their contents into question counts.

pub mod reader;

pub use reader::*;
