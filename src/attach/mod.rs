//! Attach orchestration
//!
//! Correlates the launched process with an entry in the chosen host's own
//! live-process list and drives the attach/continue sequence. The host's
//! list and the OS process table are independent collections; the numeric
//! PID is the only identity trusted to match them.

mod retry;

pub use retry::{continue_with_retry, ContinueOutcome, RetryPolicy};

use tracing::{debug, info, warn};

use crate::core::types::{LauncherResult, ProcessId};
use crate::host::{DebuggeeProcess, DebuggerHost};

/// One attach attempt against a chosen host
pub struct AttachRequest<'a, H> {
    pub host: &'a H,
    pub target_pid: ProcessId,
    /// Issue the debugger's continue verb after a successful attach
    pub continue_after_attach: bool,
    /// Reveal the host's debug-output pane before attaching
    pub reveal_output_pane: bool,
}

/// Terminal result of the attach phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The host's debugger is attached to the target
    Attached { process_name: String },
    /// The host reported an empty live-process list; no attach occurred
    NoProcesses,
    /// No entry in the host's list carried the target PID; no attach
    /// occurred. Reported, never retried.
    PidNotFound,
}

impl AttachOutcome {
    pub fn is_attached(&self) -> bool {
        matches!(self, AttachOutcome::Attached { .. })
    }
}

/// Result of a full attach request, continuation included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachReport {
    pub outcome: AttachOutcome,
    /// Present only when continuation was requested and attach succeeded
    pub continuation: Option<ContinueOutcome>,
}

/// First entry of the host's list whose PID equals the target
///
/// Iteration order is whatever the host exposes; the first match wins.
pub fn find_debuggee<P: DebuggeeProcess>(processes: &[P], pid: ProcessId) -> Option<&P> {
    processes.iter().find(|process| process.pid() == pid)
}

/// Walks the host's live-process list and attaches to the target PID
pub fn attach<H: DebuggerHost>(
    host: &H,
    target_pid: ProcessId,
    reveal_output_pane: bool,
) -> LauncherResult<AttachOutcome> {
    if reveal_output_pane {
        if let Err(err) = host.reveal_output_pane() {
            debug!(error = %err, "could not reveal the output pane, continuing without it");
        }
    }

    let processes = host.processes()?;
    if processes.is_empty() {
        warn!("host exposes no live processes, cannot attach");
        return Ok(AttachOutcome::NoProcesses);
    }

    match find_debuggee(&processes, target_pid) {
        Some(process) => {
            process.attach()?;
            let process_name = process
                .name()
                .unwrap_or_else(|_| format!("pid {target_pid}"));
            info!(pid = target_pid, name = %process_name, "debugger attached");
            Ok(AttachOutcome::Attached { process_name })
        }
        None => {
            warn!(
                pid = target_pid,
                candidates = processes.len(),
                "target PID not present in the host's process list"
            );
            Ok(AttachOutcome::PidNotFound)
        }
    }
}

/// Runs a full attach request: reveal pane, attach, optionally continue
pub fn run<H: DebuggerHost>(
    request: &AttachRequest<'_, H>,
    policy: &RetryPolicy,
) -> LauncherResult<AttachReport> {
    let outcome = attach(request.host, request.target_pid, request.reveal_output_pane)?;

    let continuation = match (&outcome, request.continue_after_attach) {
        (AttachOutcome::Attached { .. }, true) => {
            Some(continue_with_retry(request.host, policy))
        }
        _ => None,
    };

    Ok(AttachReport {
        outcome,
        continuation,
    })
}
