//! PNG decoding into premultiplied bitmaps.
//!
//! Decoded pixels are premultiplied up front so the compositor never has
//! to special-case image sources.

use std::fs::File;
use std::path::Path;

use ledge_core::{Bitmap, Color};

/// Errors that can occur while loading an image
#[derive(Debug)]
pub enum BitmapError {
    /// File could not be opened or read
    Io(std::io::Error),
    /// PNG stream could not be decoded
    Decode(png::DecodingError),
    /// Pixel format this loader does not handle
    Unsupported(String),
}

impl std::fmt::Display for BitmapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BitmapError::Io(e) => write!(f, "io error: {}", e),
            BitmapError::Decode(e) => write!(f, "decode error: {}", e),
            BitmapError::Unsupported(s) => write!(f, "unsupported format: {}", s),
        }
    }
}

impl std::error::Error for BitmapError {}

impl From<std::io::Error> for BitmapError {
    fn from(e: std::io::Error) -> Self {
        BitmapError::Io(e)
    }
}

impl From<png::DecodingError> for BitmapError {
    fn from(e: png::DecodingError) -> Self {
        BitmapError::Decode(e)
    }
}

/// Decode an 8-bit RGB or RGBA PNG into a premultiplied ARGB bitmap.
pub fn load_png(path: &Path) -> Result<Bitmap, BitmapError> {
    let decoder = png::Decoder::new(File::open(path)?);
    let mut reader = decoder.read_info()?;
    let mut data = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut data)?;

    if info.bit_depth != png::BitDepth::Eight {
        return Err(BitmapError::Unsupported(format!(
            "bit depth {:?}",
            info.bit_depth
        )));
    }

    let pixel_count = (info.width * info.height) as usize;
    let mut pixels = Vec::with_capacity(pixel_count);

    match info.color_type {
        png::ColorType::Rgba => {
            for chunk in data[..info.buffer_size()].chunks_exact(4) {
                pixels.push(Color::rgba(chunk[0], chunk[1], chunk[2], chunk[3]).to_argb());
            }
        }
        png::ColorType::Rgb => {
            for chunk in data[..info.buffer_size()].chunks_exact(3) {
                pixels.push(Color::rgb(chunk[0], chunk[1], chunk[2]).to_argb());
            }
        }
        other => {
            return Err(BitmapError::Unsupported(format!("color type {:?}", other)));
        }
    }

    Bitmap::new(info.width, info.height, pixels)
        .ok_or_else(|| BitmapError::Unsupported("pixel count mismatch".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32, rgba: &[u8]) {
        let file = File::create(path).expect("create");
        let mut encoder = png::Encoder::new(file, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("header");
        writer.write_image_data(rgba).expect("data");
    }

    #[test]
    fn test_load_png_premultiplies() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("dot.png");
        // One red pixel at half alpha.
        write_png(&path, 1, 1, &[255, 0, 0, 128]);

        let bitmap = load_png(&path).expect("load");
        assert_eq!(bitmap.width(), 1);
        assert_eq!(bitmap.height(), 1);
        assert_eq!(bitmap.pixel(0, 0), Color::rgba(255, 0, 0, 128).to_argb());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_png(Path::new("/nonexistent/nope.png")).expect_err("must fail");
        assert!(matches!(err, BitmapError::Io(_)));
    }
}
