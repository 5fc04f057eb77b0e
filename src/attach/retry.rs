//! Bounded fixed-delay retry for the debugger continue verb

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::host::DebuggerHost;

/// Fixed-attempt, fixed-delay retry policy
///
/// `max_attempts` counts calls, not sleeps: five attempts mean at most four
/// delays between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 5,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        RetryPolicy {
            max_attempts,
            delay,
        }
    }

    /// Policy with no sleeping between attempts, for tests
    pub fn without_delay(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }
}

/// Terminal result of the continuation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueOutcome {
    /// The continue verb succeeded on the given attempt
    Continued { attempts: u32 },
    /// Every attempt failed; continuation is abandoned
    Exhausted { attempts: u32 },
}

/// Issues the host's continue verb until it succeeds or the policy is spent
///
/// The debugger is frequently not ready right after attach, so every kind
/// of failure is treated as transient and retried. Exhaustion is reported
/// in the outcome and logged, never raised as an error: continuation is a
/// convenience, the process is already attached at this point.
pub fn continue_with_retry<H: DebuggerHost>(host: &H, policy: &RetryPolicy) -> ContinueOutcome {
    for attempt in 1..=policy.max_attempts {
        match host.continue_execution() {
            Ok(()) => {
                info!(attempt, "debugger continued target execution");
                return ContinueOutcome::Continued { attempts: attempt };
            }
            Err(err) => {
                debug!(attempt, error = %err, "continue not accepted yet");
                if attempt < policy.max_attempts {
                    thread::sleep(policy.delay);
                }
            }
        }
    }

    warn!(
        attempts = policy.max_attempts,
        "debugger never accepted the continue call, leaving target stopped in the debugger"
    );
    ContinueOutcome::Exhausted {
        attempts: policy.max_attempts,
    }
}
