//! Instance selection
//!
//! Thin UI collaborator: turns the discovered-instance list into a single
//! chosen index or a cancellation signal. The console implementation prompts
//! on stdin; non-interactive callers preselect an index instead.

use std::io::{self, BufRead, Write};

use crate::core::types::LauncherResult;
use crate::discovery::DiscoveredInstance;
use crate::host::DebuggerHost;

/// Picks one instance from the discovered list, or cancels
pub trait InstancePicker {
    /// Returns the zero-based index of the chosen instance, or `None` on
    /// cancellation. Never called with an empty list.
    fn pick<H: DebuggerHost>(
        &self,
        instances: &[DiscoveredInstance<H>],
    ) -> LauncherResult<Option<usize>>;
}

/// What a line of operator input means
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Cancelled,
    Chosen(usize),
    Invalid,
}

/// Parses one line of input against a list of `count` instances
///
/// Empty input and `q` cancel; a 1-based number in range selects.
fn parse_selection(input: &str, count: usize) -> Selection {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("q") {
        return Selection::Cancelled;
    }
    match trimmed.parse::<usize>() {
        Ok(n) if n >= 1 && n <= count => Selection::Chosen(n - 1),
        _ => Selection::Invalid,
    }
}

/// Interactive picker prompting on stdin/stdout
#[derive(Debug, Default)]
pub struct ConsolePicker;

impl ConsolePicker {
    pub fn new() -> Self {
        ConsolePicker
    }
}

impl InstancePicker for ConsolePicker {
    fn pick<H: DebuggerHost>(
        &self,
        instances: &[DiscoveredInstance<H>],
    ) -> LauncherResult<Option<usize>> {
        let stdout = io::stdout();
        let stdin = io::stdin();
        let mut out = stdout.lock();

        writeln!(out, "Running debugger instances:")?;
        for (index, instance) in instances.iter().enumerate() {
            writeln!(out, "  [{}] {}", index + 1, instance)?;
        }

        loop {
            write!(
                out,
                "Attach to which instance? [1-{}, empty cancels] ",
                instances.len()
            )?;
            out.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // stdin closed counts as cancellation
                return Ok(None);
            }

            match parse_selection(&line, instances.len()) {
                Selection::Cancelled => return Ok(None),
                Selection::Chosen(index) => return Ok(Some(index)),
                Selection::Invalid => {
                    writeln!(out, "Not a valid selection: {}", line.trim())?;
                }
            }
        }
    }
}
