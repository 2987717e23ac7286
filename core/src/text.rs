//! The text shaping collaborator interface.
//!
//! Shaping and glyph rasterization are external concerns; the engine only
//! needs a bounding box for layout and white-ink coverage for compositing.

use crate::buffer::PixelBuffer;
use crate::geometry::Rect;

/// Font request in device-independent units.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Size in DIP; the layout pass converts to physical pixels.
    pub size: f32,
    pub bold: bool,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12.0,
            bold: false,
        }
    }
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// External text shaper.
///
/// Implementations draw pure white ink and zero the alpha of every pixel
/// they touch; the compositor recovers coverage from the RGB channels
/// afterwards and recolors the run. This split exists because platform
/// glyph rasterizers cannot composite arbitrary foreground alpha against a
/// transparent destination.
pub trait TextShaper {
    /// Bounding box of the shaped text at the given physical pixel size.
    fn measure(&mut self, text: &str, font: &FontSpec, px_size: f32) -> (u32, u32);

    /// Paint white coverage into `buffer` within `rect`, zeroing the alpha
    /// of touched pixels.
    fn draw(
        &mut self,
        buffer: &mut PixelBuffer,
        text: &str,
        font: &FontSpec,
        px_size: f32,
        rect: Rect,
        align: TextAlign,
    );
}
