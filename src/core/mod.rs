//! Core data types and errors shared across the crate.

pub mod error;
pub mod types;
