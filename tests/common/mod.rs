//! Shared in-memory fakes for integration tests
//!
//! `ScriptedBroker` plays the OS-wide object broker over a fixed entry
//! table; probed entries become `ScriptedHost`s that share the broker's
//! call counters, so tests can assert how often attach and continue were
//! actually invoked.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use vslaunch::core::types::{LauncherError, LauncherResult};
use vslaunch::discovery::ObjectBroker;
use vslaunch::host::{DebuggeeProcess, DebuggerHost};

#[derive(Clone)]
pub struct ScriptedEntry {
    /// Broker display name; `None` means the name cannot be resolved
    pub name: Option<String>,
    /// Whether probing yields the automation capability
    pub probeable: bool,
    /// Open solution path; `None` means the read fails, empty means none
    pub solution: Option<String>,
    /// The host's live-process list
    pub processes: Vec<(u32, String)>,
}

impl ScriptedEntry {
    pub fn named(name: &str) -> Self {
        ScriptedEntry {
            name: Some(name.to_string()),
            probeable: true,
            solution: Some("C:\\projects\\app.sln".to_string()),
            processes: Vec::new(),
        }
    }

    pub fn with_solution(mut self, solution: &str) -> Self {
        self.solution = Some(solution.to_string());
        self
    }

    pub fn with_processes(mut self, processes: &[(u32, &str)]) -> Self {
        self.processes = processes
            .iter()
            .map(|&(pid, name)| (pid, name.to_string()))
            .collect();
        self
    }

    pub fn unprobeable(mut self) -> Self {
        self.probeable = false;
        self
    }
}

#[derive(Default)]
pub struct CallCounters {
    pub attach_calls: Rc<Cell<u32>>,
    pub continue_calls: Rc<Cell<u32>>,
    pub reveal_calls: Rc<Cell<u32>>,
    /// Number of continue calls that fail before one succeeds;
    /// `u32::MAX` fails forever
    pub continue_failures: Rc<Cell<u32>>,
}

pub struct ScriptedBroker {
    pub entries: Vec<ScriptedEntry>,
    pub counters: CallCounters,
}

impl ScriptedBroker {
    pub fn new(entries: Vec<ScriptedEntry>) -> Self {
        ScriptedBroker {
            entries,
            counters: CallCounters::default(),
        }
    }
}

impl ObjectBroker for ScriptedBroker {
    type Moniker = usize;
    type Host = ScriptedHost;
    type Iter = std::ops::Range<usize>;

    fn monikers(&self) -> LauncherResult<Self::Iter> {
        Ok(0..self.entries.len())
    }

    fn display_name(&self, moniker: &usize) -> Option<String> {
        self.entries[*moniker].name.clone()
    }

    fn probe(&self, moniker: &usize) -> Option<ScriptedHost> {
        let entry = &self.entries[*moniker];
        entry.probeable.then(|| ScriptedHost {
            solution: entry.solution.clone(),
            processes: entry.processes.clone(),
            attach_calls: Rc::clone(&self.counters.attach_calls),
            continue_calls: Rc::clone(&self.counters.continue_calls),
            reveal_calls: Rc::clone(&self.counters.reveal_calls),
            continue_failures: Rc::clone(&self.counters.continue_failures),
        })
    }
}

pub struct ScriptedHost {
    pub solution: Option<String>,
    pub processes: Vec<(u32, String)>,
    pub attach_calls: Rc<Cell<u32>>,
    pub continue_calls: Rc<Cell<u32>>,
    pub reveal_calls: Rc<Cell<u32>>,
    pub continue_failures: Rc<Cell<u32>>,
}

impl ScriptedHost {
    pub fn with_processes(processes: &[(u32, &str)]) -> Self {
        ScriptedHost {
            solution: Some(String::new()),
            processes: processes
                .iter()
                .map(|&(pid, name)| (pid, name.to_string()))
                .collect(),
            attach_calls: Rc::default(),
            continue_calls: Rc::default(),
            reveal_calls: Rc::default(),
            continue_failures: Rc::default(),
        }
    }

    /// Makes the next `n` continue calls fail before one succeeds
    pub fn failing_continues(self, n: u32) -> Self {
        self.continue_failures.set(n);
        self
    }
}

impl DebuggerHost for ScriptedHost {
    type Process = ScriptedProcess;

    fn solution_path(&self) -> LauncherResult<String> {
        self.solution
            .clone()
            .ok_or_else(|| LauncherError::host_call("Solution.FullName", "unavailable"))
    }

    fn processes(&self) -> LauncherResult<Vec<ScriptedProcess>> {
        Ok(self
            .processes
            .iter()
            .map(|(pid, name)| ScriptedProcess {
                pid: *pid,
                name: name.clone(),
                attach_calls: Rc::clone(&self.attach_calls),
            })
            .collect())
    }

    fn continue_execution(&self) -> LauncherResult<()> {
        self.continue_calls.set(self.continue_calls.get() + 1);
        let remaining = self.continue_failures.get();
        if remaining == 0 {
            Ok(())
        } else {
            if remaining != u32::MAX {
                self.continue_failures.set(remaining - 1);
            }
            Err(LauncherError::host_call("Debugger.Go", "debugger busy"))
        }
    }

    fn reveal_output_pane(&self) -> LauncherResult<()> {
        self.reveal_calls.set(self.reveal_calls.get() + 1);
        Ok(())
    }
}

pub struct ScriptedProcess {
    pub pid: u32,
    pub name: String,
    pub attach_calls: Rc<Cell<u32>>,
}

impl DebuggeeProcess for ScriptedProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn name(&self) -> LauncherResult<String> {
        Ok(self.name.clone())
    }

    fn attach(&self) -> LauncherResult<()> {
        self.attach_calls.set(self.attach_calls.get() + 1);
        Ok(())
    }
}
