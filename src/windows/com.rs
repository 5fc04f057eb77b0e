//! COM apartment lifetime management

use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};

use crate::core::types::LauncherResult;

/// Scoped COM apartment initialization
///
/// Holds the calling thread's apartment for as long as the value lives and
/// uninitializes on drop. Create one before touching the running object
/// table or any automation object, and keep it alive until the last COM
/// reference is gone.
pub struct ComSession(());

impl ComSession {
    /// Enters a single-threaded apartment on the calling thread
    pub fn initialize() -> LauncherResult<Self> {
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }.ok()?;
        Ok(ComSession(()))
    }
}

impl Drop for ComSession {
    fn drop(&mut self) {
        unsafe { CoUninitialize() };
    }
}
