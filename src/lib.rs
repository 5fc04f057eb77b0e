//! vslaunch: launch a process suspended and attach a running Visual Studio
//! debugger to it
//!
//! The pipeline is: create the target with its primary thread held, scan
//! the OS-wide object broker for live debugger hosts, let the operator pick
//! one, attach that host's debugger to the target PID, best-effort continue,
//! then release the suspended thread.
//!
//! Everything except the `windows` and `process` modules is platform
//! neutral; discovery and attach are written against traits so the
//! orchestration logic tests anywhere.

pub mod attach;
pub mod catalog;
pub mod config;
pub mod core;
pub mod discovery;
pub mod host;
pub mod picker;
#[cfg(windows)]
pub mod process;
#[cfg(windows)]
pub mod windows;

// Re-export main types
pub use crate::core::types::{LauncherError, LauncherResult, ProcessId};
pub use attach::{AttachOutcome, AttachReport, AttachRequest, ContinueOutcome, RetryPolicy};
pub use catalog::{HostDescriptor, SUPPORTED_HOSTS};
pub use discovery::{discover, DiscoveredInstance, ObjectBroker, NO_SOLUTION_LABEL};
pub use host::{DebuggeeProcess, DebuggerHost};
pub use picker::{ConsolePicker, InstancePicker};
