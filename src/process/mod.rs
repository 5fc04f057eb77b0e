//! Suspended process creation and lifecycle
//!
//! The launcher owns the process and primary-thread handles of a target
//! created with its first instruction held, and guarantees both handles are
//! released exactly once no matter how the run ends.

#[cfg(windows)]
mod launcher;

#[cfg(windows)]
pub use launcher::SuspendedProcess;
