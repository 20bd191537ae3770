//! One-time, process-wide bootstrap of the UI runtime.
//!
//! The winit event loop may be created exactly once per process and is not
//! `Send`, so the bootstrap records the owning thread behind a mutex and
//! parks the loop itself in thread-local storage. All later access goes
//! through [`with_event_loop`], which fails fast if called from any other
//! thread. DPI awareness is configured by winit as part of loop creation.

use std::cell::RefCell;
use std::sync::Mutex;
use std::thread::{self, ThreadId};

use winit::event_loop::EventLoop;

use hostview_common::RuntimeError;

static BOOTSTRAP_THREAD: Mutex<Option<ThreadId>> = Mutex::new(None);

thread_local! {
    static EVENT_LOOP: RefCell<Option<EventLoop<()>>> = const { RefCell::new(None) };
}

/// Initialize the UI runtime if it has not been initialized yet.
///
/// Idempotent on the bootstrap thread; an error on every other thread.
/// The first successful call owns the event loop for the process lifetime.
pub fn ensure_initialized() -> Result<(), RuntimeError> {
    let mut guard = BOOTSTRAP_THREAD
        .lock()
        .map_err(|_| RuntimeError::Poisoned)?;

    match *guard {
        Some(tid) if tid == thread::current().id() => Ok(()),
        Some(_) => Err(RuntimeError::WrongThread),
        None => {
            let event_loop =
                build_event_loop().map_err(|e| RuntimeError::EventLoop(e.to_string()))?;
            EVENT_LOOP.with(|slot| *slot.borrow_mut() = Some(event_loop));
            *guard = Some(thread::current().id());
            tracing::debug!("ui runtime initialized");
            Ok(())
        }
    }
}

/// Run `f` with scoped access to the process event loop.
///
/// The loop stays borrowed while `f` pumps it, so handler code dispatched
/// from inside a pump must not call back in here; a nested call reports
/// [`RuntimeError::Reentrant`] instead of panicking.
pub fn with_event_loop<R>(f: impl FnOnce(&mut EventLoop<()>) -> R) -> Result<R, RuntimeError> {
    EVENT_LOOP.with(|slot| {
        let mut slot = slot.try_borrow_mut().map_err(|_| RuntimeError::Reentrant)?;
        match slot.as_mut() {
            Some(event_loop) => Ok(f(event_loop)),
            None => Err(RuntimeError::NotInitialized),
        }
    })
}

fn build_event_loop() -> Result<EventLoop<()>, winit::error::EventLoopError> {
    let mut builder = EventLoop::builder();

    // The boundary is driven by a foreign host, so the bootstrap thread is
    // whichever thread first calls in. Platforms that allow it get an
    // any-thread loop; macOS still requires the process main thread.
    #[cfg(target_os = "windows")]
    {
        use winit::platform::windows::EventLoopBuilderExtWindows;
        builder.with_any_thread(true);
    }
    #[cfg(target_os = "linux")]
    {
        winit::platform::x11::EventLoopBuilderExtX11::with_any_thread(&mut builder, true);
        winit::platform::wayland::EventLoopBuilderExtWayland::with_any_thread(&mut builder, true);
    }

    builder.build()
}
