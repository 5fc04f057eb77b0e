//! Suspended process launcher with RAII handle ownership

use crate::core::types::{LauncherError, LauncherResult};
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use std::fmt;

/// A process created suspended, together with its two OS handles
///
/// The primary thread does not execute a single user instruction until
/// [`resume`](Self::resume) is called. Both handles are closed at most once
/// when the value drops, on every exit path.
pub struct SuspendedProcess {
    pid: u32,
    process: Handle,
    thread: Handle,
    resumed: bool,
}

impl SuspendedProcess {
    /// Creates the target process suspended, with a fresh console
    ///
    /// `command_line` is the executable path and arguments as one string,
    /// handed to the OS verbatim; no shell interpretation happens.
    pub fn spawn(command_line: &str) -> LauncherResult<Self> {
        let created = kernel32::create_process_suspended(command_line)?;
        Ok(SuspendedProcess {
            pid: created.process_id,
            process: Handle::new(created.process),
            thread: Handle::new(created.thread),
            resumed: false,
        })
    }

    /// OS-assigned process id, the correlation key for debugger attach
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Whether the primary thread has already been released
    pub fn has_resumed(&self) -> bool {
        self.resumed
    }

    /// Releases the primary thread to begin executing
    ///
    /// Single-call discipline: resuming an already-running thread is
    /// rejected rather than passed through to the OS.
    pub fn resume(&mut self) -> LauncherResult<()> {
        if self.resumed {
            return Err(LauncherError::AlreadyResumed(self.pid));
        }
        unsafe { kernel32::resume_thread(self.thread.raw()) }
            .map_err(|err| LauncherError::resume_failed(self.pid, err.to_string()))?;
        self.resumed = true;
        Ok(())
    }
}

impl fmt::Debug for SuspendedProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendedProcess")
            .field("pid", &self.pid)
            .field("resumed", &self.resumed)
            .finish()
    }
}
