pub mod errors;
pub mod types;

pub use errors::{HostviewError, RuntimeError, SurfaceError};
pub use types::{ContentType, Rect, SurfaceDescriptor};

pub type Result<T> = std::result::Result<T, HostviewError>;
