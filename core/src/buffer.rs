//! Top-down ARGB pixel buffer, exclusively owned by one render pass.
//!
//! The alpha channel doubles as the hit-test mask: alpha 1 marks pixels
//! that are invisible but still mouse-responsive.

use crate::color::{Color, blend_over};

/// A width x height array of premultiplied 32-bit ARGB values, rows top-down.
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Overwrite every pixel with the given packed ARGB value.
    pub fn fill(&mut self, argb: u32) {
        self.pixels.fill(argb);
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Direct write, bounds-checked; out-of-bounds writes are dropped.
    pub fn put(&mut self, x: i32, y: i32, argb: u32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = argb;
        }
    }

    /// Source-over blend at a single pixel, bounds-checked.
    pub fn blend(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = blend_over(self.pixels[i], color);
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_is_dropped() {
        let mut buf = PixelBuffer::new(4, 4);
        buf.put(-1, 0, 0xffff_ffff);
        buf.put(4, 0, 0xffff_ffff);
        buf.put(0, 4, 0xffff_ffff);
        assert!(buf.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_put_get_round_trip() {
        let mut buf = PixelBuffer::new(3, 2);
        buf.put(2, 1, 0x1234_5678);
        assert_eq!(buf.get(2, 1), Some(0x1234_5678));
        assert_eq!(buf.get(3, 1), None);
    }
}
