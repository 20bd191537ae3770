//! Script-notify plumbing between the page and the host.
//!
//! The host-facing contract is the classic `window.external.notify(value)`
//! call. The control only exposes `window.ipc.postMessage`, so every page
//! gets an initialization script that installs the former on top of the
//! latter; the raw string payload then arrives through the control's IPC
//! handler and is forwarded verbatim.

/// Injected into every page before any of its own script runs.
pub const NOTIFY_INIT_SCRIPT: &str = r#"
(function() {
    window.external = window.external || {};
    window.external.notify = function(value) {
        window.ipc.postMessage(String(value));
    };
})();
"#;
