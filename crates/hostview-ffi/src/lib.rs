//! C-callable boundary over the hostview surface.
//!
//! Four entry points (`webview_new`, `webview_run`, `webview_free`,
//! `webview_eval_script`) plus callback registration
//! (`webview_set_callbacks`). Errors are the internal signalling mechanism
//! below this layer; here every failure is converted into a sentinel value
//! (null handle or nonzero status) and every entry point is wrapped in
//! `catch_unwind` so nothing unwinds across the ABI. See
//! `include/hostview.h` for the C declarations.

#![warn(unsafe_op_in_unsafe_fn)]

pub mod callbacks;

use std::ffi::{c_char, c_int, c_void, CStr};
use std::panic::{self, AssertUnwindSafe};

use tracing_subscriber::EnvFilter;

use hostview_common::{ContentType, SurfaceDescriptor};
use hostview_core::Surface;

/// Install a fmt subscriber unless the host process already has one.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Borrow a C string as UTF-8. Null or invalid UTF-8 is a validation
/// failure, not an error to report.
unsafe fn utf8_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Create a surface: a titled top-level window with an embedded
/// web-rendering control, already navigated to `content`.
///
/// Validation happens before any resource is allocated: null `title` or
/// `content`, negative dimensions, an unknown `content_type` (0 = URL,
/// 1 = HTML), or non-UTF-8 input all return null. Construction or
/// navigation failures also return null, with nothing left visible.
///
/// # Safety
/// `title` and `content`, when non-null, must point to NUL-terminated
/// strings valid for the duration of the call. Must be called from the
/// UI thread.
#[no_mangle]
pub unsafe extern "C" fn webview_new(
    title: *const c_char,
    content: *const c_char,
    content_type: c_int,
    width: i32,
    height: i32,
    resizable: bool,
) -> *mut c_void {
    let result = panic::catch_unwind(|| {
        let title = unsafe { utf8_arg(title) }?;
        let content = unsafe { utf8_arg(content) }?;
        let content_type = ContentType::from_raw(content_type)?;
        if width < 0 || height < 0 {
            return None;
        }

        init_tracing();

        let descriptor = SurfaceDescriptor {
            title: title.to_owned(),
            width: width as u32,
            height: height as u32,
            resizable,
        };

        let surface = match Surface::new(&descriptor) {
            Ok(surface) => surface,
            Err(e) => {
                tracing::error!(error = %e, "surface construction failed");
                return None;
            }
        };

        let navigated = match content_type {
            ContentType::Url => surface.navigate_to_url(content),
            ContentType::Html => surface.navigate_to_string(content),
        };
        if let Err(e) = navigated {
            // Dropping the surface tears the window back down.
            tracing::error!(error = %e, "initial navigation failed");
            return None;
        }

        Some(Box::into_raw(Box::new(surface)))
    });

    match result {
        Ok(Some(handle)) => handle.cast(),
        Ok(None) => std::ptr::null_mut(),
        Err(_) => std::ptr::null_mut(),
    }
}

/// Pump the native event loop until the window is destroyed, invoking the
/// registered callbacks with `owner` for every control event. Returns the
/// loop's exit code, or -1 on failure.
///
/// # Safety
/// `handle` must be a live handle from a successful [`webview_new`], used
/// from the UI thread. `owner` is borrowed opaquely and never freed here.
#[no_mangle]
pub unsafe extern "C" fn webview_run(handle: *mut c_void, owner: *mut c_void) -> c_int {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let surface = unsafe { &mut *handle.cast::<Surface>() };
        let table = callbacks::registered();
        surface.run(move |event| callbacks::dispatch(&table, owner, event))
    }));

    match result {
        Ok(Ok(exit_code)) => exit_code as c_int,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "run loop failed");
            -1
        }
        Err(_) => -1,
    }
}

/// Destroy a surface: terminates the control's backing renderer process
/// and releases the window. Single ownership, single free.
///
/// # Safety
/// `handle` must be null or a live handle from [`webview_new`] that has
/// not already been freed.
#[no_mangle]
pub unsafe extern "C" fn webview_free(handle: *mut c_void) {
    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        if handle.is_null() {
            return;
        }
        drop(unsafe { Box::from_raw(handle.cast::<Surface>()) });
        tracing::debug!("surface freed");
    }));
}

/// Evaluate script in the surface's page, fire-and-forget. Returns 0 on
/// submission, nonzero on failure. The script's result is not propagated.
///
/// # Safety
/// `handle` must be a live handle from [`webview_new`]; `script`, when
/// non-null, must point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn webview_eval_script(handle: *mut c_void, script: *const c_char) -> c_int {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let script = match unsafe { utf8_arg(script) } {
            Some(script) => script,
            None => return 1,
        };
        let surface = unsafe { &*handle.cast::<Surface>() };
        match surface.evaluate_script(script) {
            Ok(()) => 0,
            Err(e) => {
                tracing::error!(error = %e, "script evaluation failed");
                1
            }
        }
    }));

    result.unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    // Validation rejects before the runtime is touched, so these are safe
    // to exercise headless.

    #[test]
    fn new_rejects_null_title() {
        let content = CString::new("https://example.test").expect("cstring");
        let handle =
            unsafe { webview_new(std::ptr::null(), content.as_ptr(), 0, 100, 100, false) };
        assert!(handle.is_null());
    }

    #[test]
    fn new_rejects_null_content() {
        let title = CString::new("T").expect("cstring");
        let handle = unsafe { webview_new(title.as_ptr(), std::ptr::null(), 0, 100, 100, false) };
        assert!(handle.is_null());
    }

    #[test]
    fn new_rejects_negative_dimensions() {
        let title = CString::new("T").expect("cstring");
        let content = CString::new("x").expect("cstring");
        let handle = unsafe { webview_new(title.as_ptr(), content.as_ptr(), 0, -1, 100, false) };
        assert!(handle.is_null());

        let handle = unsafe { webview_new(title.as_ptr(), content.as_ptr(), 0, 100, -1, false) };
        assert!(handle.is_null());
    }

    #[test]
    fn new_rejects_unknown_content_type() {
        let title = CString::new("T").expect("cstring");
        let content = CString::new("x").expect("cstring");
        let handle = unsafe { webview_new(title.as_ptr(), content.as_ptr(), 2, 100, 100, false) };
        assert!(handle.is_null());

        let handle = unsafe { webview_new(title.as_ptr(), content.as_ptr(), -1, 100, 100, false) };
        assert!(handle.is_null());
    }

    #[test]
    fn new_rejects_invalid_utf8_title() {
        let bogus: &[u8] = b"\xff\xfe\0";
        let content = CString::new("x").expect("cstring");
        let handle = unsafe {
            webview_new(
                bogus.as_ptr().cast::<c_char>(),
                content.as_ptr(),
                0,
                100,
                100,
                false,
            )
        };
        assert!(handle.is_null());
    }

    #[test]
    fn free_tolerates_null() {
        unsafe { webview_free(std::ptr::null_mut()) };
    }
}
