//! Recorded canvas draw commands, replayed by the rasterizer.

use crate::color::Color;

/// A draw command in canvas-local DIP coordinates, immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        thickness: f32,
        color: Color,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },
    FilledCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    FilledRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    FilledRoundedRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        color: Color,
    },
}
