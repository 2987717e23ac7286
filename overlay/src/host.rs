//! Collaborator traits over the platform.
//!
//! Window creation, the event pump and screen composition live outside
//! this crate; the runner only sees these narrow interfaces.

use ledge_core::{PixelBuffer, SiblingWindow};

/// Pointer input delivered by the platform event pump, coordinates in
/// window-local physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Move { x: i32, y: i32 },
    Enter,
    Leave,
    Down { x: i32, y: i32 },
    Up { x: i32, y: i32 },
    DoubleClick { x: i32, y: i32 },
    RightDown { x: i32, y: i32 },
    /// Pointer capture stolen by the system; distinct from a normal
    /// release.
    CaptureLost,
}

/// The window this widget draws into.
pub trait SurfaceHost {
    /// Composite a finished frame onto the surface at the given screen
    /// position.
    fn present(&mut self, buffer: &PixelBuffer, screen_x: i32, screen_y: i32);

    fn dpi_scale(&self) -> f32;

    /// Height allotted to the strip, physical px.
    fn strip_height(&self) -> i32;

    /// Current window left edge in strip coordinates.
    fn window_left(&self) -> i32;

    /// Move the window horizontally (vertical position is pinned to the
    /// strip).
    fn move_window(&mut self, x: i32);

    fn resize_window(&mut self, width: i32, height: i32);

    fn begin_pointer_capture(&mut self);

    fn end_pointer_capture(&mut self);
}

/// Enumeration, and for the drag protocol movement, of the visible widget
/// windows on the strip.
pub trait WidgetWindows {
    /// Every visible widget window in strip coordinates, this process's
    /// own window included.
    fn list(&self) -> Vec<SiblingWindow>;

    /// Move a peer window horizontally. Used by the dragging process to
    /// animate its siblings; peers self-correct on the next broadcast, so
    /// a stale move is harmless.
    fn move_to(&mut self, name: &str, x: i32);

    /// Left edge of the reserved system region (clock/tray), when the
    /// platform exposes one.
    fn reserved_left(&self) -> Option<i32>;

    /// Total strip width.
    fn strip_width(&self) -> i32;
}
