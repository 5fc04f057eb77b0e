//! Windows utility functions

pub mod strings;

// Re-export commonly used utilities
pub use strings::{string_to_wide, wide_to_string};
