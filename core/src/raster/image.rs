//! Bitmap sampling into the destination buffer.

use crate::bitmap::Bitmap;
use crate::buffer::PixelBuffer;
use crate::color::Color;
use crate::geometry::Rect;

/// Draw a bitmap into `dest`. Matching sizes copy 1:1; any other size runs
/// a box filter that averages every source pixel mapped into each
/// destination pixel (an upscale footprint degrades to a single sample,
/// i.e. nearest-neighbor). Fully transparent results are skipped only at
/// the final blend.
pub fn draw_bitmap(buffer: &mut PixelBuffer, bitmap: &Bitmap, dest: Rect) {
    let (sw, sh) = (bitmap.width(), bitmap.height());
    if dest.width <= 0 || dest.height <= 0 || sw == 0 || sh == 0 {
        return;
    }

    if dest.width as u32 == sw && dest.height as u32 == sh {
        for y in 0..sh {
            for x in 0..sw {
                let argb = bitmap.pixel(x, y);
                if argb >> 24 == 0 {
                    continue;
                }
                buffer.blend(
                    dest.x + x as i32,
                    dest.y + y as i32,
                    Color::from_argb(argb),
                );
            }
        }
        return;
    }

    let (dw, dh) = (dest.width as u64, dest.height as u64);
    for dy in 0..dh {
        let sy0 = (dy * sh as u64 / dh) as u32;
        let sy1 = (((dy + 1) * sh as u64 / dh) as u32).clamp(sy0 + 1, sh);
        for dx in 0..dw {
            let sx0 = (dx * sw as u64 / dw) as u32;
            let sx1 = (((dx + 1) * sw as u64 / dw) as u32).clamp(sx0 + 1, sw);

            let (mut a, mut r, mut g, mut b) = (0u64, 0u64, 0u64, 0u64);
            let mut samples = 0u64;
            for sy in sy0..sy1 {
                for sx in sx0..sx1 {
                    let p = bitmap.pixel(sx, sy) as u64;
                    a += (p >> 24) & 0xff;
                    r += (p >> 16) & 0xff;
                    g += (p >> 8) & 0xff;
                    b += p & 0xff;
                    samples += 1;
                }
            }

            let avg = Color {
                a: (a / samples) as u8,
                r: (r / samples) as u8,
                g: (g / samples) as u8,
                b: (b / samples) as u8,
            };
            if avg.is_transparent() {
                continue;
            }
            buffer.blend(dest.x + dx as i32, dest.y + dy as i32, avg);
        }
    }
}
