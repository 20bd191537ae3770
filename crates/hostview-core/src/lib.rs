//! Native web-rendering surface behind a synchronous Rust API.
//!
//! Wraps `winit` + `wry` to provide:
//! - One-time, process-wide bootstrap of the UI event loop
//! - A blocking bridge over the control's asynchronous readiness
//! - A `Surface` pairing one native window with one web-rendering control
//! - Navigation (URL, raw HTML) and fire-and-forget script evaluation
//! - A run loop that forwards load-complete and script-notify events

pub mod bridge;
pub mod events;
pub mod notify;
pub mod runtime;
pub mod surface;

pub use events::{SurfaceEvent, EVENT_DOM_CONTENT_LOADED};
pub use surface::Surface;
