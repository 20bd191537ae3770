//! Host callback registration and event dispatch.
//!
//! The host supplies two plain C function pointers; registered once, they
//! serve every surface in the process. During `webview_run` each drained
//! control event is translated and invoked synchronously on the UI thread
//! with the opaque `owner` pointer recorded at run time. Events with no
//! registered callback are dropped.

use std::ffi::{c_char, c_void, CString};
use std::sync::Mutex;

use hostview_core::{SurfaceEvent, EVENT_DOM_CONTENT_LOADED};

/// Generic control event: `owner` plus an event code
/// ([`EVENT_DOM_CONTENT_LOADED`] for page-load completion).
pub type GenericEventFn = unsafe extern "C" fn(owner: *mut c_void, event: u32);

/// Script-notify payload from in-page script, NUL-terminated UTF-8. The
/// pointer is only valid for the duration of the call.
pub type ScriptNotifyFn = unsafe extern "C" fn(owner: *mut c_void, value: *const c_char);

#[derive(Clone, Copy, Default)]
pub struct CallbackTable {
    pub on_generic_event: Option<GenericEventFn>,
    pub on_script_notify: Option<ScriptNotifyFn>,
}

static CALLBACKS: Mutex<CallbackTable> = Mutex::new(CallbackTable {
    on_generic_event: None,
    on_script_notify: None,
});

/// Register (or clear, with nulls) the host's callback entry points.
#[no_mangle]
pub extern "C" fn webview_set_callbacks(
    on_generic_event: Option<GenericEventFn>,
    on_script_notify: Option<ScriptNotifyFn>,
) {
    if let Ok(mut table) = CALLBACKS.lock() {
        table.on_generic_event = on_generic_event;
        table.on_script_notify = on_script_notify;
    }
}

/// Snapshot of the registered callbacks, taken once per run loop.
pub fn registered() -> CallbackTable {
    match CALLBACKS.lock() {
        Ok(table) => *table,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

/// Translate one control event into the matching host callback.
pub fn dispatch(table: &CallbackTable, owner: *mut c_void, event: SurfaceEvent) {
    match event {
        SurfaceEvent::LoadComplete => {
            if let Some(cb) = table.on_generic_event {
                unsafe { cb(owner, EVENT_DOM_CONTENT_LOADED) };
            }
        }
        SurfaceEvent::ScriptNotify(value) => {
            if let Some(cb) = table.on_script_notify {
                let payload = c_payload(&value);
                unsafe { cb(owner, payload.as_ptr()) };
            }
        }
    }
}

/// Convert a notify payload to a C string, stripping interior NULs that
/// would otherwise truncate it on the host side.
fn c_payload(value: &str) -> CString {
    match CString::new(value) {
        Ok(payload) => payload,
        Err(_) => {
            tracing::warn!(len = value.len(), "script notify payload contained NUL");
            let cleaned: String = value.chars().filter(|c| *c != '\0').collect();
            CString::new(cleaned).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;
    use std::sync::atomic::{AtomicU32, Ordering};

    static GENERIC_CALLS: AtomicU32 = AtomicU32::new(0);
    static LAST_EVENT: AtomicU32 = AtomicU32::new(0);
    static NOTIFY_PAYLOAD: Mutex<String> = Mutex::new(String::new());

    unsafe extern "C" fn record_generic(_owner: *mut c_void, event: u32) {
        GENERIC_CALLS.fetch_add(1, Ordering::SeqCst);
        LAST_EVENT.store(event, Ordering::SeqCst);
    }

    unsafe extern "C" fn record_notify(_owner: *mut c_void, value: *const c_char) {
        let value = unsafe { CStr::from_ptr(value) };
        *NOTIFY_PAYLOAD.lock().expect("lock") = value.to_string_lossy().into_owned();
    }

    // -- Dispatch --

    #[test]
    fn load_complete_maps_to_generic_event_code_1() {
        let table = CallbackTable {
            on_generic_event: Some(record_generic),
            on_script_notify: None,
        };
        dispatch(&table, std::ptr::null_mut(), SurfaceEvent::LoadComplete);

        assert!(GENERIC_CALLS.load(Ordering::SeqCst) >= 1);
        assert_eq!(LAST_EVENT.load(Ordering::SeqCst), EVENT_DOM_CONTENT_LOADED);
    }

    #[test]
    fn script_notify_delivers_the_payload() {
        let table = CallbackTable {
            on_generic_event: None,
            on_script_notify: Some(record_notify),
        };
        dispatch(
            &table,
            std::ptr::null_mut(),
            SurfaceEvent::ScriptNotify("ping".into()),
        );

        assert_eq!(NOTIFY_PAYLOAD.lock().expect("lock").as_str(), "ping");
    }

    #[test]
    fn unregistered_callbacks_drop_events() {
        let table = CallbackTable::default();
        // Must not panic or dereference anything.
        dispatch(&table, std::ptr::null_mut(), SurfaceEvent::LoadComplete);
        dispatch(
            &table,
            std::ptr::null_mut(),
            SurfaceEvent::ScriptNotify("dropped".into()),
        );
    }

    // -- Payload conversion --

    #[test]
    fn payload_without_nul_converts_verbatim() {
        let payload = c_payload("hello world");
        assert_eq!(payload.to_str().expect("utf8"), "hello world");
    }

    #[test]
    fn interior_nuls_are_stripped() {
        let payload = c_payload("he\0llo");
        assert_eq!(payload.to_str().expect("utf8"), "hello");
    }
}
