//! Debugger host automation surface
//!
//! A debugger host is an external IDE instance reached through the object
//! broker. The traits here describe the capability the rest of the crate
//! needs from it: a live-process list with an attach verb, a best-effort
//! continue verb, the open-solution path, and an optional output pane.
//!
//! The production implementation drives Visual Studio's DTE object model
//! over COM (`crate::windows::dte`); tests substitute in-memory fakes.

use crate::core::types::{LauncherResult, ProcessId};

/// One entry of a host's live-process list
pub trait DebuggeeProcess {
    /// OS process id of this entry, as reported by the host
    fn pid(&self) -> ProcessId;

    /// Display name of this entry
    fn name(&self) -> LauncherResult<String>;

    /// Attach the host's debugger to this process
    fn attach(&self) -> LauncherResult<()>;
}

/// A live debugger host instance
pub trait DebuggerHost {
    type Process: DebuggeeProcess;

    /// Full path of the host's currently open solution; empty when none
    fn solution_path(&self) -> LauncherResult<String>;

    /// Snapshot of the host's live-process list, in the host's own order
    fn processes(&self) -> LauncherResult<Vec<Self::Process>>;

    /// Resume execution of the attached process. May fail transiently right
    /// after attach; callers retry with a bounded policy.
    fn continue_execution(&self) -> LauncherResult<()>;

    /// Make the host's debug-output pane visible. Cosmetic; failures are
    /// ignored by callers.
    fn reveal_output_pane(&self) -> LauncherResult<()>;
}
