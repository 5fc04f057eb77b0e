//! Windows API layer for process creation and COM automation
//!
//! Provides safe wrappers around the Win32 and COM surfaces this tool
//! touches: suspended process creation, the running object table, and
//! late-bound IDispatch automation against Visual Studio's DTE object
//! model. All unsafe FFI calls are contained within this module.

pub mod bindings;
pub mod com;
pub mod dispatch;
pub mod dte;
pub mod rot;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use com::ComSession;
pub use dte::{DteHost, DteProcess};
pub use rot::RunningObjectBroker;
pub use types::Handle;
