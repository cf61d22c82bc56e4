//! Utility functions and structures.

pub mod data;
pub mod value;
