//! Visual Studio DTE automation surface
//!
//! Implements the debugger-host traits over the DTE object model, reached
//! exclusively through late-bound dispatch calls: `Solution.FullName`,
//! `Debugger.LocalProcesses` (1-based collection of entries carrying
//! `ProcessID`, `Name` and `Attach()`), `Debugger.Go(false)` to continue,
//! and the output tool window for visibility.

use windows::Win32::System::Com::IDispatch;

use crate::core::types::{LauncherError, LauncherResult};
use crate::host::{DebuggeeProcess, DebuggerHost};
use crate::windows::dispatch::{
    call_method, get_i32, get_object, get_string, put_property, Variant,
};

/// EnvDTE vsWindowKindOutput
const OUTPUT_WINDOW_KIND: &str = "{34E76E81-EE4A-11D0-AE2E-00A0C90FFFC3}";

/// A live Visual Studio instance reached through the object broker
pub struct DteHost {
    object: IDispatch,
}

impl DteHost {
    pub fn new(object: IDispatch) -> Self {
        DteHost { object }
    }

    fn debugger(&self) -> LauncherResult<IDispatch> {
        get_object(&self.object, "Debugger")
    }
}

impl DebuggerHost for DteHost {
    type Process = DteProcess;

    fn solution_path(&self) -> LauncherResult<String> {
        let solution = get_object(&self.object, "Solution")?;
        get_string(&solution, "FullName")
    }

    fn processes(&self) -> LauncherResult<Vec<DteProcess>> {
        let debugger = self.debugger()?;
        let list = get_object(&debugger, "LocalProcesses")?;
        let count = get_i32(&list, "Count")?;

        let mut processes = Vec::with_capacity(count.max(0) as usize);
        for index in 1..=count {
            let entry = call_method(&list, "Item", vec![Variant::from_i32(index)])?
                .to_dispatch()
                .ok_or_else(|| {
                    LauncherError::host_call("LocalProcesses.Item", "entry is not an object")
                })?;
            // The PID is read eagerly so matching never re-enters the host
            let pid = get_i32(&entry, "ProcessID")?;
            processes.push(DteProcess {
                object: entry,
                pid: pid as u32,
            });
        }
        Ok(processes)
    }

    fn continue_execution(&self) -> LauncherResult<()> {
        let debugger = self.debugger()?;
        // WaitForBreakOrEnd = false: return immediately
        call_method(&debugger, "Go", vec![Variant::from_bool(false)]).map(|_| ())
    }

    fn reveal_output_pane(&self) -> LauncherResult<()> {
        let windows = get_object(&self.object, "Windows")?;
        let pane = call_method(&windows, "Item", vec![Variant::from_str(OUTPUT_WINDOW_KIND)])?
            .to_dispatch()
            .ok_or_else(|| LauncherError::host_call("Windows.Item", "pane is not an object"))?;
        put_property(&pane, "Visible", Variant::from_bool(true))
    }
}

/// One entry of the host's live-process list
pub struct DteProcess {
    object: IDispatch,
    pid: u32,
}

impl DebuggeeProcess for DteProcess {
    fn pid(&self) -> u32 {
        self.pid
    }

    fn name(&self) -> LauncherResult<String> {
        get_string(&self.object, "Name")
    }

    fn attach(&self) -> LauncherResult<()> {
        call_method(&self.object, "Attach", Vec::new()).map(|_| ())
    }
}
