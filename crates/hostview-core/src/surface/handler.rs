//! `ApplicationHandler` implementation for the surface's window events.
//!
//! Resize pushes fresh client-area bounds into the control; a close
//! request exits the loop (exit code 0). Everything else falls through to
//! default handling.

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::{bounds, Surface};

impl ApplicationHandler for Surface {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // The window is created up front, not on resume.
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested");
                event_loop.exit();
            }

            WindowEvent::Destroyed => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                self.sync_control_bounds(size.width, size.height);
            }

            _ => {}
        }
    }
}

impl Surface {
    /// Push the current client-area rectangle into the control.
    pub(super) fn sync_control_bounds(&self, width: u32, height: u32) {
        let client = bounds::client_rect(width, height);
        if let Err(e) = self.webview.set_bounds(bounds::rect_to_wry(&client)) {
            tracing::warn!(error = %e, width, height, "failed to sync control bounds");
        }
    }
}
