use serde::{Deserialize, Serialize};

/// A rectangle in physical pixels, relative to the window client area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What kind of content the initial navigation string carries.
///
/// The boundary receives this as a raw integer; anything outside the
/// closed set rejects surface creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    Url,
    Html,
}

impl ContentType {
    /// Parse the boundary discriminant (0 = Url, 1 = Html).
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Url),
            1 => Some(Self::Html),
            _ => None,
        }
    }
}

/// Everything needed to construct a surface, minus the initial content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceDescriptor {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}
