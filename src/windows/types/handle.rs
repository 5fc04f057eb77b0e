//! Safe HANDLE wrapper with automatic cleanup

use crate::windows::bindings::kernel32;
use std::ptr;
use winapi::um::winnt::HANDLE;

/// Owned Windows HANDLE with RAII semantics
///
/// Dropping closes the underlying handle at most once; a null wrapper is a
/// no-op on drop. This is the only way handles leave the process, so every
/// exit path, early returns and unwinds included, releases exactly once.
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Takes ownership of a raw handle
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// A wrapper that owns nothing
    pub fn null() -> Self {
        Handle {
            handle: ptr::null_mut(),
        }
    }

    /// Whether this wrapper owns a real handle
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// The raw handle, still owned by this wrapper
    pub fn raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            // Close failures cannot be reported from drop
            unsafe {
                let _ = kernel32::close_handle(self.handle);
            }
            self.handle = ptr::null_mut();
        }
    }
}

// HANDLEs are process-local
unsafe impl Send for Handle {}
