//! The surface: one native window bound to one web-rendering control.

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use winit::dpi::LogicalSize;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes};
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use hostview_common::{SurfaceDescriptor, SurfaceError};

use crate::bridge;
use crate::events::{EventQueue, SurfaceEvent};
use crate::notify;
use crate::runtime;

pub mod bounds;
mod handler;

/// Upper bound on one run-loop pump before control returns to the caller.
const PUMP_INTERVAL: Duration = Duration::from_millis(16);

/// A native top-level window with an embedded web-rendering control.
///
/// The window handle is stable from the moment construction succeeds; the
/// control is never touched before construction completes nor after the
/// surface is dropped. Dropping the surface terminates the control's
/// backing renderer process and then destroys the window.
pub struct Surface {
    // Declared before the window so the renderer process is torn down
    // while its parent window still exists.
    webview: WebView,
    window: Window,
    queue: EventQueue,
}

impl Surface {
    /// Create the window, bind a control to its client area, and wait for
    /// the control to come up.
    ///
    /// The window stays hidden until the control is live, so a failed
    /// construction never leaves a partially visible window behind.
    pub fn new(desc: &SurfaceDescriptor) -> Result<Self, SurfaceError> {
        runtime::ensure_initialized()?;

        let attrs = WindowAttributes::default()
            .with_title(desc.title.as_str())
            .with_inner_size(LogicalSize::new(
                f64::from(desc.width),
                f64::from(desc.height),
            ))
            .with_resizable(desc.resizable)
            .with_visible(false);

        #[allow(deprecated)]
        let window = runtime::with_event_loop(|event_loop| event_loop.create_window(attrs))?
            .map_err(|e| SurfaceError::WindowCreation(e.to_string()))?;

        let size = window.inner_size();
        let client = bounds::client_rect(size.width, size.height);

        let queue = EventQueue::new();
        let (ready_tx, ready_rx) = mpsc::channel();
        let webview = build_control(&window, &client, queue.clone(), ready_tx)?;

        let mut surface = Surface {
            webview,
            window,
            queue,
        };
        surface.await_control_ready(&ready_rx)?;

        surface
            .webview
            .set_visible(true)
            .map_err(|e| SurfaceError::ControlOperation(e.to_string()))?;
        surface.window.set_visible(true);

        tracing::info!(
            title = %desc.title,
            width = desc.width,
            height = desc.height,
            resizable = desc.resizable,
            "surface ready"
        );
        Ok(surface)
    }

    /// Navigate the control to a URL. Failures after the post are not
    /// reported back.
    pub fn navigate_to_url(&self, url: &str) -> Result<(), SurfaceError> {
        tracing::debug!(url, "navigate");
        self.webview
            .load_url(url)
            .map_err(|e| SurfaceError::ControlOperation(e.to_string()))
    }

    /// Render raw markup in the control.
    pub fn navigate_to_string(&self, html: &str) -> Result<(), SurfaceError> {
        tracing::debug!(len = html.len(), "navigate to string");
        self.webview
            .load_html(html)
            .map_err(|e| SurfaceError::ControlOperation(e.to_string()))
    }

    /// Evaluate script in the page, fire-and-forget. The script's result
    /// is never propagated.
    pub fn evaluate_script(&self, script: &str) -> Result<(), SurfaceError> {
        self.webview
            .evaluate_script(script)
            .map_err(|e| SurfaceError::ControlOperation(e.to_string()))
    }

    /// Pump the native event loop until the window is destroyed, feeding
    /// control events into `sink` after every pump.
    ///
    /// Event delivery is scoped to this call: nothing raised before it
    /// started or after it returns reaches the sink. Returns the loop's
    /// exit code.
    pub fn run(&mut self, sink: impl FnMut(SurfaceEvent)) -> Result<i32, SurfaceError> {
        tracing::debug!("entering run loop");

        let queue = self.queue.clone();
        let result = pump_loop(
            &queue,
            || {
                runtime::with_event_loop(|event_loop| {
                    event_loop.pump_app_events(Some(PUMP_INTERVAL), &mut *self)
                })
                .map_err(SurfaceError::from)
            },
            sink,
        );

        match result {
            Ok(exit_code) => {
                tracing::debug!(exit_code, "run loop exited");
                Ok(exit_code)
            }
            Err(e) => Err(e),
        }
    }

    /// Block until the control signals readiness, pumping the event loop
    /// so the signal can actually arrive on this thread.
    fn await_control_ready(&mut self, ready: &Receiver<()>) -> Result<(), SurfaceError> {
        bridge::await_operation(ready, || {
            runtime::with_event_loop(|event_loop| {
                let _ = event_loop.pump_app_events(Some(PUMP_INTERVAL), &mut *self);
            })?;
            Ok(())
        })
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        self.queue.disarm();
        tracing::debug!("surface terminated");
    }
}

/// Arm the queue, pump until exit or failure, and disarm before
/// returning on both paths. No event may outlive the loop.
fn pump_loop(
    queue: &EventQueue,
    mut pump: impl FnMut() -> Result<PumpStatus, SurfaceError>,
    mut sink: impl FnMut(SurfaceEvent),
) -> Result<i32, SurfaceError> {
    queue.arm();

    let result = loop {
        let status = match pump() {
            Ok(status) => status,
            Err(e) => break Err(e),
        };

        for event in queue.drain() {
            sink(event);
        }

        if let PumpStatus::Exit(code) = status {
            break Ok(code);
        }
    };

    queue.disarm();
    result
}

fn build_control(
    window: &Window,
    client: &hostview_common::Rect,
    queue: EventQueue,
    ready_tx: Sender<()>,
) -> Result<WebView, SurfaceError> {
    let load_queue = queue.clone();

    WebViewBuilder::new()
        .with_bounds(bounds::rect_to_wry(client))
        .with_focused(false)
        .with_initialization_script(notify::NOTIFY_INIT_SCRIPT)
        // Placeholder page; the initial content is navigated in afterwards.
        .with_html("<html><body></body></html>")
        .with_ipc_handler(move |request| {
            let body = request.body().to_string();
            tracing::debug!(len = body.len(), "script notify from page");
            queue.push(SurfaceEvent::ScriptNotify(body));
        })
        .with_on_page_load_handler(move |event, url| match event {
            PageLoadEvent::Started => {
                tracing::debug!(url = %url, "page load started");
                // First load signals that the control process is live.
                // Later sends land on a dropped receiver and are ignored.
                let _ = ready_tx.send(());
            }
            PageLoadEvent::Finished => {
                tracing::debug!(url = %url, "page load finished");
                load_queue.push(SurfaceEvent::LoadComplete);
            }
        })
        .build_as_child(window)
        .map_err(|e| SurfaceError::ControlCreation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_loop_returns_the_exit_code_and_disarms() {
        let queue = EventQueue::new();
        let loop_queue = queue.clone();

        let mut delivered = Vec::new();
        let result = pump_loop(
            &queue,
            || {
                loop_queue.push(SurfaceEvent::LoadComplete);
                Ok(PumpStatus::Exit(0))
            },
            |event| delivered.push(event),
        );

        assert_eq!(result.expect("exit code"), 0);
        assert_eq!(delivered, vec![SurfaceEvent::LoadComplete]);

        // Subscriptions end with the loop: nothing recorded afterwards.
        queue.push(SurfaceEvent::ScriptNotify("late".into()));
        queue.arm();
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn pump_failure_still_disarms_the_queue() {
        let queue = EventQueue::new();

        let result = pump_loop(
            &queue,
            || Err(SurfaceError::ControlOperation("pump broke".into())),
            |_| {},
        );
        assert!(matches!(result, Err(SurfaceError::ControlOperation(_))));

        // The error path must not leave the queue armed.
        queue.push(SurfaceEvent::LoadComplete);
        queue.arm();
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn events_are_drained_every_iteration_until_exit() {
        let queue = EventQueue::new();
        let loop_queue = queue.clone();

        let mut pumps = 0;
        let mut delivered = Vec::new();
        let result = pump_loop(
            &queue,
            || {
                pumps += 1;
                loop_queue.push(SurfaceEvent::ScriptNotify(format!("pump-{pumps}")));
                if pumps == 3 {
                    Ok(PumpStatus::Exit(7))
                } else {
                    Ok(PumpStatus::Continue)
                }
            },
            |event| delivered.push(event),
        );

        assert_eq!(result.expect("exit code"), 7);
        assert_eq!(delivered.len(), 3);
        assert_eq!(
            delivered[2],
            SurfaceEvent::ScriptNotify("pump-3".into())
        );
    }
}
