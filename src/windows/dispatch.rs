//! Late-bound IDispatch automation helpers
//!
//! The debugger host's object model is only reachable through IDispatch:
//! every property walk and method call goes name -> dispid -> Invoke. These
//! helpers wrap that dance, and [`Variant`] owns the VARIANTs crossing the
//! boundary so they are always cleared exactly once.

use std::mem::ManuallyDrop;
use std::ptr;

use windows::core::{BSTR, GUID, PCWSTR};
use windows::Win32::Foundation::{VARIANT_FALSE, VARIANT_TRUE};
use windows::Win32::System::Com::{IDispatch, DISPATCH_FLAGS, DISPPARAMS};
use windows::Win32::System::Variant::{
    VariantClear, VARENUM, VARIANT, VT_BOOL, VT_BSTR, VT_DISPATCH, VT_I2, VT_I4,
};

use crate::core::types::{LauncherError, LauncherResult};

const DISPATCH_METHOD: DISPATCH_FLAGS = DISPATCH_FLAGS(1);
const DISPATCH_PROPERTYGET: DISPATCH_FLAGS = DISPATCH_FLAGS(2);
const DISPATCH_PROPERTYPUT: DISPATCH_FLAGS = DISPATCH_FLAGS(4);
const DISPID_PROPERTYPUT: i32 = -3;
const LOCALE_USER_DEFAULT: u32 = 0x0400;

/// Owned VARIANT that is cleared exactly once on drop
pub struct Variant(VARIANT);

impl Variant {
    pub fn from_bool(value: bool) -> Self {
        let mut raw = VARIANT::default();
        unsafe {
            raw.Anonymous.Anonymous.vt = VT_BOOL;
            raw.Anonymous.Anonymous.Anonymous.boolVal =
                if value { VARIANT_TRUE } else { VARIANT_FALSE };
        }
        Variant(raw)
    }

    pub fn from_i32(value: i32) -> Self {
        let mut raw = VARIANT::default();
        unsafe {
            raw.Anonymous.Anonymous.vt = VT_I4;
            raw.Anonymous.Anonymous.Anonymous.lVal = value;
        }
        Variant(raw)
    }

    pub fn from_str(value: &str) -> Self {
        let mut raw = VARIANT::default();
        unsafe {
            raw.Anonymous.Anonymous.vt = VT_BSTR;
            raw.Anonymous.Anonymous.Anonymous.bstrVal = ManuallyDrop::new(BSTR::from(value));
        }
        Variant(raw)
    }

    fn vt(&self) -> VARENUM {
        unsafe { self.0.Anonymous.Anonymous.vt }
    }

    /// Integral payload, accepting the two integer shapes hosts hand back
    pub fn to_i32(&self) -> Option<i32> {
        unsafe {
            match self.vt() {
                VT_I4 => Some(self.0.Anonymous.Anonymous.Anonymous.lVal),
                VT_I2 => Some(i32::from(self.0.Anonymous.Anonymous.Anonymous.iVal)),
                _ => None,
            }
        }
    }

    pub fn to_string_value(&self) -> Option<String> {
        unsafe {
            if self.vt() == VT_BSTR {
                Some(self.0.Anonymous.Anonymous.Anonymous.bstrVal.to_string())
            } else {
                None
            }
        }
    }

    pub fn to_dispatch(&self) -> Option<IDispatch> {
        unsafe {
            if self.vt() == VT_DISPATCH {
                (*self.0.Anonymous.Anonymous.Anonymous.pdispVal).clone()
            } else {
                None
            }
        }
    }

    /// Releases the raw VARIANT to the caller, who becomes responsible for
    /// clearing it
    fn into_raw(self) -> VARIANT {
        let this = ManuallyDrop::new(self);
        unsafe { ptr::read(&this.0) }
    }
}

impl Drop for Variant {
    fn drop(&mut self) {
        unsafe {
            let _ = VariantClear(&mut self.0);
        }
    }
}

fn dispid_of(object: &IDispatch, name: &str) -> LauncherResult<i32> {
    let wide: Vec<u16> = name.encode_utf16().chain(std::iter::once(0)).collect();
    let wide_name = PCWSTR::from_raw(wide.as_ptr());
    let mut dispid = 0i32;
    unsafe {
        object.GetIDsOfNames(&GUID::zeroed(), &wide_name, 1, LOCALE_USER_DEFAULT, &mut dispid)
    }
    .map_err(|err| LauncherError::host_call(name, err.message().to_string()))?;
    Ok(dispid)
}

/// Invokes a member with already-reversed raw arguments
fn invoke_raw(
    object: &IDispatch,
    name: &str,
    flags: DISPATCH_FLAGS,
    args: &mut [VARIANT],
    property_put: bool,
) -> LauncherResult<Variant> {
    let dispid = dispid_of(object, name)?;

    let mut named_arg = DISPID_PROPERTYPUT;
    let named_args: *mut i32 = if property_put {
        &mut named_arg
    } else {
        ptr::null_mut()
    };
    let params = DISPPARAMS {
        rgvarg: if args.is_empty() {
            ptr::null_mut()
        } else {
            args.as_mut_ptr()
        },
        rgdispidNamedArgs: named_args,
        cArgs: args.len() as u32,
        cNamedArgs: u32::from(property_put),
    };

    let mut result = VARIANT::default();
    unsafe {
        object.Invoke(
            dispid,
            &GUID::zeroed(),
            LOCALE_USER_DEFAULT,
            flags,
            &params,
            Some(&mut result),
            None,
            None,
        )
    }
    .map_err(|err| LauncherError::host_call(name, err.message().to_string()))?;

    Ok(Variant(result))
}

/// Reads a property by name
pub fn get_property(object: &IDispatch, name: &str) -> LauncherResult<Variant> {
    invoke_raw(object, name, DISPATCH_PROPERTYGET, &mut [], false)
}

/// Reads an object-valued property by name
pub fn get_object(object: &IDispatch, name: &str) -> LauncherResult<IDispatch> {
    get_property(object, name)?
        .to_dispatch()
        .ok_or_else(|| LauncherError::host_call(name, "property is not an object"))
}

/// Reads a string-valued property by name
pub fn get_string(object: &IDispatch, name: &str) -> LauncherResult<String> {
    get_property(object, name)?
        .to_string_value()
        .ok_or_else(|| LauncherError::host_call(name, "property is not a string"))
}

/// Reads an integer-valued property by name
pub fn get_i32(object: &IDispatch, name: &str) -> LauncherResult<i32> {
    get_property(object, name)?
        .to_i32()
        .ok_or_else(|| LauncherError::host_call(name, "property is not an integer"))
}

/// Writes a property by name
pub fn put_property(object: &IDispatch, name: &str, value: Variant) -> LauncherResult<()> {
    let mut args = [value.into_raw()];
    let result = invoke_raw(object, name, DISPATCH_PROPERTYPUT, &mut args, true);
    unsafe {
        let _ = VariantClear(&mut args[0]);
    }
    result.map(|_| ())
}

/// Calls a method by name
///
/// Automation servers expect the argument array in reverse order. The
/// combined METHOD | PROPERTYGET flags match how automation clients
/// conventionally invoke members that are callable either way (e.g.
/// collection `Item`).
pub fn call_method(
    object: &IDispatch,
    name: &str,
    args: Vec<Variant>,
) -> LauncherResult<Variant> {
    let mut raw: Vec<VARIANT> = args.into_iter().rev().map(Variant::into_raw).collect();
    let result = invoke_raw(
        object,
        name,
        DISPATCH_FLAGS(DISPATCH_METHOD.0 | DISPATCH_PROPERTYGET.0),
        &mut raw,
        false,
    );
    for arg in &mut raw {
        unsafe {
            let _ = VariantClear(arg);
        }
    }
    result
}
