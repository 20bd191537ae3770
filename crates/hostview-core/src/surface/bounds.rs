//! Client-area geometry for the rendering control.

use hostview_common::Rect;

/// The control always fills the window client area, so its rectangle is
/// anchored at the origin with the client dimensions in physical pixels.
pub fn client_rect(width: u32, height: u32) -> Rect {
    Rect {
        x: 0.0,
        y: 0.0,
        width: f64::from(width),
        height: f64::from(height),
    }
}

/// Convert a client [`Rect`] to the control's bounds type.
pub fn rect_to_wry(rect: &Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Physical(wry::dpi::PhysicalPosition::new(
            rect.x as i32,
            rect.y as i32,
        )),
        size: wry::dpi::Size::Physical(wry::dpi::PhysicalSize::new(
            rect.width as u32,
            rect.height as u32,
        )),
    }
}
