//! Rasterizer/compositor.
//!
//! Walks the arranged scene tree and paints every node into the frame's
//! pixel buffer with premultiplied source-over blending. The finished
//! buffer is handed to the surface host by the caller.

pub mod image;
pub mod primitives;
pub mod rounded;


use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::geometry::{Rect, scale_dip};
use crate::scene::{CanvasCommand, Node, NodeKind, PanelProps, TextProps};
use crate::text::{TextAlign, TextShaper};

/// Initial value for every pixel: alpha 1 keeps empty regions
/// mouse-responsive without being visibly opaque.
pub const BASE_PIXEL: u32 = 0x0100_0000;

/// Inset rounded highlight painted under the frame while the pointer is
/// over the widget.
#[derive(Debug, Clone, Copy)]
pub struct HoverOverlay {
    /// Inset from the buffer edges, physical px.
    pub inset: i32,
    /// Corner radius in DIP.
    pub corner_radius: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderParams {
    pub dpi_scale: f32,
    pub hover_overlay: Option<HoverOverlay>,
    /// Phase of the shared blink clock; blinking panels use their hover
    /// background while it is on.
    pub blink_on: bool,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            dpi_scale: 1.0,
            hover_overlay: None,
            blink_on: false,
        }
    }
}

/// Paint one frame: reset the buffer to the base pixel, lay down the hover
/// highlight if any, then paint the tree pre-order.
pub fn render(
    buffer: &mut PixelBuffer,
    tree: &Node,
    shaper: &mut dyn TextShaper,
    params: &RenderParams,
) {
    buffer.fill(BASE_PIXEL);

    if let Some(overlay) = params.hover_overlay {
        let bounds =
            Rect::new(0, 0, buffer.width() as i32, buffer.height() as i32).inset(overlay.inset);
        let radius = scale_dip(overlay.corner_radius, params.dpi_scale);
        primitives::fill_rounded_rect(buffer, bounds, radius, overlay.color);
    }

    paint_node(buffer, tree, shaper, params);
}

fn paint_node(
    buffer: &mut PixelBuffer,
    node: &Node,
    shaper: &mut dyn TextShaper,
    params: &RenderParams,
) {
    let rect = Rect::new(
        node.layout.abs_x,
        node.layout.abs_y,
        node.layout.width,
        node.layout.height,
    );

    match &node.kind {
        NodeKind::Root | NodeKind::Horizontal | NodeKind::Vertical => {}
        NodeKind::Panel(p) => paint_panel(buffer, p, rect, node.hovered, params),
        NodeKind::Text(t) => paint_text(buffer, t, rect, shaper, params),
        NodeKind::Image(img) => image::draw_bitmap(buffer, &img.bitmap, rect),
        NodeKind::Canvas(commands) => paint_canvas(buffer, commands, rect, params.dpi_scale),
    }

    for child in &node.children {
        paint_node(buffer, child, shaper, params);
    }
}

fn paint_panel(
    buffer: &mut PixelBuffer,
    props: &PanelProps,
    rect: Rect,
    hovered: bool,
    params: &RenderParams,
) {
    let highlighted = hovered || (props.blink && params.blink_on);
    let background = if highlighted {
        props.hover_background.unwrap_or(props.background)
    } else {
        props.background
    };
    if background.is_transparent() {
        return;
    }

    let radius = scale_dip(props.corner_radius, params.dpi_scale);
    if radius > 0 {
        primitives::fill_rounded_rect(buffer, rect, radius, background);
    } else {
        primitives::fill_rect(buffer, rect, background);
    }
}

/// Two-pass text: the shaper paints white ink and zeroes the alpha of every
/// pixel it touches; coverage is then recovered from the RGB maximum and
/// the run recolored as `(coverage, target * coverage / 255)`. Needed
/// because the platform glyph rasterizer cannot composite arbitrary
/// foreground alpha against a transparent destination.
fn paint_text(
    buffer: &mut PixelBuffer,
    props: &TextProps,
    rect: Rect,
    shaper: &mut dyn TextShaper,
    params: &RenderParams,
) {
    let px_size = props.font.size * params.dpi_scale;
    shaper.draw(buffer, &props.text, &props.font, px_size, rect, TextAlign::Left);

    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            let Some(pixel) = buffer.get(x, y) else {
                continue;
            };
            if pixel >> 24 != 0 {
                continue;
            }
            let r = (pixel >> 16) & 0xff;
            let g = (pixel >> 8) & 0xff;
            let b = pixel & 0xff;
            let coverage = r.max(g).max(b) as u8;
            let ink = Color {
                a: coverage,
                r: (props.color.r as u32 * coverage as u32 / 255) as u8,
                g: (props.color.g as u32 * coverage as u32 / 255) as u8,
                b: (props.color.b as u32 * coverage as u32 / 255) as u8,
            };
            buffer.put(x, y, ink.to_argb());
        }
    }
}

fn paint_canvas(buffer: &mut PixelBuffer, commands: &[CanvasCommand], rect: Rect, scale: f32) {
    let ox = rect.x as f32;
    let oy = rect.y as f32;

    for command in commands {
        match *command {
            CanvasCommand::Line {
                x0,
                y0,
                x1,
                y1,
                thickness,
                color,
            } => primitives::draw_line(
                buffer,
                ox + x0 * scale,
                oy + y0 * scale,
                ox + x1 * scale,
                oy + y1 * scale,
                scale_dip(thickness, scale).max(1),
                color,
            ),
            CanvasCommand::Circle {
                cx,
                cy,
                radius,
                color,
            } => primitives::draw_circle(
                buffer,
                rect.x + (cx * scale).round() as i32,
                rect.y + (cy * scale).round() as i32,
                (radius * scale).round() as i32,
                color,
            ),
            CanvasCommand::FilledCircle {
                cx,
                cy,
                radius,
                color,
            } => primitives::fill_circle(
                buffer,
                rect.x + (cx * scale).round() as i32,
                rect.y + (cy * scale).round() as i32,
                (radius * scale).round() as i32,
                color,
            ),
            CanvasCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => primitives::draw_rect(
                buffer,
                Rect::new(
                    rect.x + (x * scale).round() as i32,
                    rect.y + (y * scale).round() as i32,
                    scale_dip(width, scale),
                    scale_dip(height, scale),
                ),
                color,
            ),
            CanvasCommand::FilledRect {
                x,
                y,
                width,
                height,
                color,
            } => primitives::fill_rect(
                buffer,
                Rect::new(
                    rect.x + (x * scale).round() as i32,
                    rect.y + (y * scale).round() as i32,
                    scale_dip(width, scale),
                    scale_dip(height, scale),
                ),
                color,
            ),
            CanvasCommand::FilledRoundedRect {
                x,
                y,
                width,
                height,
                radius,
                color,
            } => primitives::fill_rounded_rect(
                buffer,
                Rect::new(
                    rect.x + (x * scale).round() as i32,
                    rect.y + (y * scale).round() as i32,
                    scale_dip(width, scale),
                    scale_dip(height, scale),
                ),
                scale_dip(radius, scale),
                color,
            ),
        }
    }
}
