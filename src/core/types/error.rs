//! Custom error types for vslaunch

use thiserror::Error;

/// Main error type for launcher operations
#[derive(Error, Debug)]
pub enum LauncherError {
    /// The OS-wide object broker could not be obtained. Fatal: no discovery
    /// is possible without it.
    #[error("Object broker unavailable: {0}")]
    BrokerUnavailable(String),

    #[error("Failed to launch `{command}`: {reason}")]
    LaunchFailed { command: String, reason: String },

    #[error("Process {0} was already resumed")]
    AlreadyResumed(u32),

    #[error("Failed to resume process {pid}: {reason}")]
    ResumeFailed { pid: u32, reason: String },

    /// A call into the debugger host's automation surface failed.
    #[error("Debugger host call `{call}` failed: {reason}")]
    HostCall { call: String, reason: String },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Windows API: {0}")]
    WindowsApi(String),

    #[cfg(windows)]
    #[error("COM error: {0}")]
    Com(#[from] windows::core::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for launcher operations
pub type LauncherResult<T> = Result<T, LauncherError>;

impl LauncherError {
    /// Creates a launch failure error
    pub fn launch_failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        LauncherError::LaunchFailed {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Creates a resume failure error
    pub fn resume_failed(pid: u32, reason: impl Into<String>) -> Self {
        LauncherError::ResumeFailed {
            pid,
            reason: reason.into(),
        }
    }

    /// Creates a host automation call failure error
    pub fn host_call(call: impl Into<String>, reason: impl Into<String>) -> Self {
        LauncherError::HostCall {
            call: call.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Windows API error carrying the last OS error code
    #[cfg(windows)]
    pub fn last_os_error() -> Self {
        LauncherError::Com(windows::core::Error::from_win32())
    }
}
