#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("event loop creation failed: {0}")]
    EventLoop(String),

    #[error("ui runtime not initialized on this thread")]
    NotInitialized,

    #[error("ui runtime was initialized on a different thread")]
    WrongThread,

    #[error("ui runtime is already being pumped on this thread")]
    Reentrant,

    #[error("ui runtime bootstrap guard poisoned")]
    Poisoned,
}

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    #[error("control creation failed: {0}")]
    ControlCreation(String),

    #[error("control operation failed: {0}")]
    ControlOperation(String),

    #[error("async operation abandoned before completion")]
    BridgeDisconnected,

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

#[derive(Debug, thiserror::Error)]
pub enum HostviewError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("{0}")]
    Other(String),
}
