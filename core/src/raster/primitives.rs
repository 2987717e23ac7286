//! Pixel-level drawing primitives for canvas commands and panel fills.

use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::geometry::Rect;
use crate::raster::rounded::rounded_rect_contains;

/// Blend a pixel with fractional coverage (0.0..=1.0).
#[inline]
fn plot(buffer: &mut PixelBuffer, x: i32, y: i32, color: Color, coverage: f32) {
    let c = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
    if c == 0 {
        return;
    }
    buffer.blend(x, y, color.scaled(c));
}

/// Plot one step of an anti-aliased line: a perpendicular band `thickness`
/// pixels tall whose two edge pixels carry the fractional coverage.
fn plot_band(
    buffer: &mut PixelBuffer,
    steep: bool,
    major: i32,
    minor: i32,
    frac: f32,
    gap: f32,
    thickness: i32,
    color: Color,
) {
    let put = |buffer: &mut PixelBuffer, m: i32, coverage: f32| {
        if steep {
            plot(buffer, m, major, color, coverage);
        } else {
            plot(buffer, major, m, color, coverage);
        }
    };
    put(buffer, minor, (1.0 - frac) * gap);
    for k in 1..thickness.max(1) {
        put(buffer, minor + k, gap);
    }
    put(buffer, minor + thickness.max(1), frac * gap);
}

/// Anti-aliased line with thickness, coverage-weighted at the endpoints and
/// at every scanline step (Wu's algorithm extended with a band).
pub fn draw_line(
    buffer: &mut PixelBuffer,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    thickness: i32,
    color: Color,
) {
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    let (mut x0, mut y0, mut x1, mut y1) = if steep {
        (y0, x0, y1, x1)
    } else {
        (x0, y0, x1, y1)
    };
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

    // First endpoint.
    let xend = x0.round();
    let yend = y0 + gradient * (xend - x0);
    let xgap = 1.0 - (x0 + 0.5).fract();
    let xpxl1 = xend as i32;
    plot_band(
        buffer,
        steep,
        xpxl1,
        yend.floor() as i32,
        yend - yend.floor(),
        xgap,
        thickness,
        color,
    );
    let mut intery = yend + gradient;

    // Second endpoint.
    let xend = x1.round();
    let yend = y1 + gradient * (xend - x1);
    let xgap = (x1 + 0.5).fract();
    let xpxl2 = xend as i32;

    for x in (xpxl1 + 1)..xpxl2 {
        plot_band(
            buffer,
            steep,
            x,
            intery.floor() as i32,
            intery - intery.floor(),
            1.0,
            thickness,
            color,
        );
        intery += gradient;
    }

    plot_band(
        buffer,
        steep,
        xpxl2,
        yend.floor() as i32,
        yend - yend.floor(),
        xgap,
        thickness,
        color,
    );
}

/// Circle outline via the integer midpoint algorithm, plotted with 8-way
/// symmetry.
pub fn draw_circle(buffer: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: Color) {
    if radius <= 0 {
        buffer.blend(cx, cy, color);
        return;
    }
    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        buffer.blend(cx + x, cy + y, color);
        buffer.blend(cx + y, cy + x, color);
        buffer.blend(cx - y, cy + x, color);
        buffer.blend(cx - x, cy + y, color);
        buffer.blend(cx - x, cy - y, color);
        buffer.blend(cx - y, cy - x, color);
        buffer.blend(cx + y, cy - x, color);
        buffer.blend(cx + x, cy - y, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Filled circle by direct membership test.
pub fn fill_circle(buffer: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: Color) {
    let r2 = (radius as i64) * (radius as i64);
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if (dx as i64) * (dx as i64) + (dy as i64) * (dy as i64) <= r2 {
                buffer.blend(cx + dx, cy + dy, color);
            }
        }
    }
}

/// One-pixel rectangle outline.
pub fn draw_rect(buffer: &mut PixelBuffer, rect: Rect, color: Color) {
    if rect.width <= 0 || rect.height <= 0 {
        return;
    }
    for x in rect.x..rect.right() {
        buffer.blend(x, rect.y, color);
        buffer.blend(x, rect.bottom() - 1, color);
    }
    for y in rect.y + 1..rect.bottom() - 1 {
        buffer.blend(rect.x, y, color);
        buffer.blend(rect.right() - 1, y, color);
    }
}

pub fn fill_rect(buffer: &mut PixelBuffer, rect: Rect, color: Color) {
    for y in rect.y..rect.bottom() {
        for x in rect.x..rect.right() {
            buffer.blend(x, y, color);
        }
    }
}

/// Rounded fill through the shared membership predicate, so painted bounds
/// and clickable bounds never diverge.
pub fn fill_rounded_rect(buffer: &mut PixelBuffer, rect: Rect, radius: i32, color: Color) {
    for y in 0..rect.height {
        for x in 0..rect.width {
            if rounded_rect_contains(rect.width, rect.height, radius, x, y) {
                buffer.blend(rect.x + x, rect.y + y, color);
            }
        }
    }
}
