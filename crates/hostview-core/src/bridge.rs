//! Blocking bridge over asynchronous control operations.
//!
//! The control APIs complete through callbacks that run on the same UI
//! thread that is waiting, so a naive blocking wait would deadlock. The
//! bridge instead polls a completion channel and, while it stays empty,
//! invokes the caller-supplied pump — one bounded iteration of the native
//! event loop — so the completion handler gets a chance to fire.

use std::sync::mpsc::{Receiver, TryRecvError};

use hostview_common::SurfaceError;

/// Block until `rx` yields the operation's result, pumping between polls.
///
/// No timeout: if the operation never completes, this never returns. A
/// disconnected channel means the completion handler was dropped without
/// signalling, which is reported as [`SurfaceError::BridgeDisconnected`].
pub fn await_operation<T>(
    rx: &Receiver<T>,
    mut pump: impl FnMut() -> Result<(), SurfaceError>,
) -> Result<T, SurfaceError> {
    loop {
        match rx.try_recv() {
            Ok(value) => return Ok(value),
            Err(TryRecvError::Empty) => pump()?,
            Err(TryRecvError::Disconnected) => return Err(SurfaceError::BridgeDisconnected),
        }
    }
}
