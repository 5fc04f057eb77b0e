//! Kernel32.dll bindings for suspended process creation and thread control

use crate::core::types::{LauncherError, LauncherResult};
use crate::windows::utils::strings::string_to_wide;
use std::{io, mem, ptr};
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::{
    CreateProcessW, ResumeThread, PROCESS_INFORMATION, STARTUPINFOW,
};
use winapi::um::winbase::{CREATE_NEW_CONSOLE, CREATE_SUSPENDED};
use winapi::um::winnt::HANDLE;

/// Raw result of a successful suspended process creation
pub struct CreatedProcess {
    pub process_id: u32,
    pub process: HANDLE,
    pub thread: HANDLE,
}

/// Safe wrapper for CreateProcessW with CREATE_SUSPENDED | CREATE_NEW_CONSOLE
///
/// The new process gets its own console and its primary thread is held
/// before the first instruction. The command line is passed through
/// verbatim; CreateProcessW requires it mutable, hence the local buffer.
pub fn create_process_suspended(command_line: &str) -> LauncherResult<CreatedProcess> {
    let mut wide_command = string_to_wide(command_line);

    let mut startup: STARTUPINFOW = unsafe { mem::zeroed() };
    startup.cb = mem::size_of::<STARTUPINFOW>() as u32;
    let mut info: PROCESS_INFORMATION = unsafe { mem::zeroed() };

    let created = unsafe {
        CreateProcessW(
            ptr::null(),
            wide_command.as_mut_ptr(),
            ptr::null_mut(),
            ptr::null_mut(),
            FALSE,
            CREATE_SUSPENDED | CREATE_NEW_CONSOLE,
            ptr::null_mut(),
            ptr::null(),
            &mut startup,
            &mut info,
        )
    };

    if created == FALSE {
        return Err(LauncherError::launch_failed(
            command_line,
            io::Error::last_os_error().to_string(),
        ));
    }

    Ok(CreatedProcess {
        process_id: info.dwProcessId,
        process: info.hProcess,
        thread: info.hThread,
    })
}

/// Safe wrapper for ResumeThread
///
/// # Safety
/// The handle must be a valid thread handle with THREAD_SUSPEND_RESUME
/// access.
pub unsafe fn resume_thread(thread: HANDLE) -> LauncherResult<()> {
    // ResumeThread reports failure as (DWORD)-1
    if ResumeThread(thread) == u32::MAX {
        Err(LauncherError::WindowsApi(
            io::Error::last_os_error().to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle or null.
pub unsafe fn close_handle(handle: HANDLE) -> LauncherResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(LauncherError::WindowsApi(
            "Failed to close handle".to_string(),
        ))
    } else {
        Ok(())
    }
}
