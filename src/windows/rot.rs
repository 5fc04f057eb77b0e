//! Running object table access
//!
//! The running object table is the OS-wide broker mapping monikers to live
//! automation objects. This wrapper enumerates it lazily, resolves display
//! names through per-call bind contexts, and probes entries for the DTE
//! automation capability.

use windows::core::ComInterface;
use windows::Win32::System::Com::{
    CoTaskMemFree, CreateBindCtx, GetRunningObjectTable, IDispatch, IEnumMoniker, IMoniker,
    IRunningObjectTable,
};

use crate::core::types::{LauncherError, LauncherResult};
use crate::discovery::ObjectBroker;
use crate::windows::dte::DteHost;

/// Broker over the COM running object table
pub struct RunningObjectBroker {
    table: IRunningObjectTable,
}

impl RunningObjectBroker {
    /// Obtains the process-wide table. Failure here is fatal: without the
    /// table no discovery is possible.
    pub fn new() -> LauncherResult<Self> {
        let table = unsafe { GetRunningObjectTable(0) }
            .map_err(|err| LauncherError::BrokerUnavailable(err.message().to_string()))?;
        Ok(RunningObjectBroker { table })
    }
}

/// Lazy, non-restartable walk over the table's registered monikers
pub struct MonikerEnumerator {
    inner: IEnumMoniker,
}

impl Iterator for MonikerEnumerator {
    type Item = IMoniker;

    fn next(&mut self) -> Option<IMoniker> {
        let mut slot = [None];
        let mut fetched = 0u32;
        let hr = unsafe { self.inner.Next(&mut slot, Some(&mut fetched)) };
        if hr.is_ok() && fetched == 1 {
            slot[0].take()
        } else {
            None
        }
    }
}

impl ObjectBroker for RunningObjectBroker {
    type Moniker = IMoniker;
    type Host = DteHost;
    type Iter = MonikerEnumerator;

    fn monikers(&self) -> LauncherResult<MonikerEnumerator> {
        let inner = unsafe { self.table.EnumRunning() }?;
        unsafe { inner.Reset() }?;
        Ok(MonikerEnumerator { inner })
    }

    fn display_name(&self, moniker: &IMoniker) -> Option<String> {
        let context = unsafe { CreateBindCtx(0) }.ok()?;
        let raw = unsafe { moniker.GetDisplayName(&context, None) }.ok()?;
        if raw.is_null() {
            return None;
        }
        let name = unsafe { raw.to_string() }.ok();
        // The display name buffer is allocated by the moniker
        unsafe { CoTaskMemFree(Some(raw.0 as *const _)) };
        name
    }

    fn probe(&self, moniker: &IMoniker) -> Option<DteHost> {
        let object = unsafe { self.table.GetObject(moniker) }.ok()?;
        let dispatch = object.cast::<IDispatch>().ok()?;
        Some(DteHost::new(dispatch))
    }
}
