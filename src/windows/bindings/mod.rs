//! Raw Windows API bindings with safe wrappers

pub mod kernel32;
