//! Text shaper backed by cosmic-text.
//!
//! Shapes and rasterizes through `FontSystem` + `SwashCache`, with an LRU
//! shaping cache so per-frame rebuilds do not re-shape unchanged strings.
//! Glyphs are painted as white ink with the alpha channel zeroed, per the
//! compositor's coverage contract.

use std::collections::HashMap;

use cosmic_text::{
    Attrs, Buffer, Family, FontSystem, LayoutGlyph, Metrics, Shaping, SwashCache, Weight,
};

use ledge_core::{FontSpec, PixelBuffer, Rect, TextAlign, TextShaper};

/// Maximum entries in the text shaping cache (LRU eviction when exceeded)
const TEXT_CACHE_MAX_ENTRIES: usize = 512;

/// Cached result of text shaping
struct CachedText {
    /// Pre-shaped glyphs with their run baselines
    glyphs: Vec<(LayoutGlyph, f32)>,
    width: f32,
    height: f32,
    /// LRU tracking: set to the access counter on each hit
    last_used: u64,
}

/// Key: (text, family, size in tenths of px, bold)
type TextCacheKey = (String, String, u32, bool);

pub struct CosmicShaper {
    font_system: FontSystem,
    swash_cache: SwashCache,
    text_cache: HashMap<TextCacheKey, CachedText>,
    cache_access_counter: u64,
}

impl CosmicShaper {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            swash_cache: SwashCache::new(),
            text_cache: HashMap::with_capacity(64),
            cache_access_counter: 0,
        }
    }

    /// Evict least recently used entries if the cache grew too large
    fn evict_lru_if_needed(&mut self) {
        if self.text_cache.len() <= TEXT_CACHE_MAX_ENTRIES {
            return;
        }

        // Drop the oldest quarter of the cache.
        let target_size = TEXT_CACHE_MAX_ENTRIES * 3 / 4;
        let mut entries: Vec<_> = self
            .text_cache
            .iter()
            .map(|(k, v)| (k.clone(), v.last_used))
            .collect();
        entries.sort_by_key(|(_, last_used)| *last_used);

        for (key, _) in entries
            .into_iter()
            .take(self.text_cache.len() - target_size)
        {
            self.text_cache.remove(&key);
        }
    }

    /// Find a cached entry by borrowed key parts (no allocation on a hit).
    fn find_cached(
        &mut self,
        text: &str,
        family: &str,
        size_key: u32,
        bold: bool,
    ) -> Option<&mut CachedText> {
        // Most widgets hold well under a dozen unique strings per frame, so
        // a linear scan beats building an owned key.
        self.text_cache
            .iter_mut()
            .find(|(k, _)| k.0 == text && k.1 == family && k.2 == size_key && k.3 == bold)
            .map(|(_, v)| v)
    }

    /// Ensure text is cached, shaping if needed. Returns (width, height).
    fn ensure_cached(&mut self, text: &str, font: &FontSpec, px_size: f32) -> (f32, f32) {
        let size_key = (px_size * 10.0).round() as u32;

        self.cache_access_counter += 1;
        let current_access = self.cache_access_counter;

        if let Some(cached) = self.find_cached(text, &font.family, size_key, font.bold) {
            cached.last_used = current_access;
            return (cached.width, cached.height);
        }

        let metrics = Metrics::new(px_size, px_size * 1.2);
        let mut text_buffer = Buffer::new(&mut self.font_system, metrics);

        let family = if font.family == "sans-serif" {
            Family::SansSerif
        } else {
            Family::Name(&font.family)
        };
        let mut attrs = Attrs::new().family(family);
        if font.bold {
            attrs = attrs.weight(Weight::BOLD);
        }
        text_buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        text_buffer.shape_until_scroll(&mut self.font_system, false);

        let mut glyphs = Vec::new();
        let mut width = 0.0f32;
        let mut height = 0.0f32;

        for run in text_buffer.layout_runs() {
            width = width.max(run.line_w);
            height += run.line_height;

            for glyph in run.glyphs.iter() {
                glyphs.push((glyph.clone(), run.line_y));
            }
        }

        // Only allocate the owned key on a miss.
        let key = (
            text.to_string(),
            font.family.clone(),
            size_key,
            font.bold,
        );
        self.text_cache.insert(
            key,
            CachedText {
                glyphs,
                width,
                height,
                last_used: current_access,
            },
        );
        self.evict_lru_if_needed();

        (width, height)
    }
}

impl Default for CosmicShaper {
    fn default() -> Self {
        Self::new()
    }
}

impl TextShaper for CosmicShaper {
    fn measure(&mut self, text: &str, font: &FontSpec, px_size: f32) -> (u32, u32) {
        let (w, h) = self.ensure_cached(text, font, px_size);
        (w.ceil() as u32, h.ceil() as u32)
    }

    fn draw(
        &mut self,
        buffer: &mut PixelBuffer,
        text: &str,
        font: &FontSpec,
        px_size: f32,
        rect: Rect,
        align: TextAlign,
    ) {
        let (text_w, _) = self.ensure_cached(text, font, px_size);

        let origin_x = match align {
            TextAlign::Left => rect.x as f32,
            TextAlign::Center => rect.x as f32 + (rect.width as f32 - text_w) / 2.0,
            TextAlign::Right => rect.x as f32 + rect.width as f32 - text_w,
        };

        // Clone out of the cache: swash needs &mut self while we iterate.
        let size_key = (px_size * 10.0).round() as u32;
        let glyphs = self
            .find_cached(text, &font.family, size_key, font.bold)
            .map(|c| c.glyphs.clone())
            .unwrap_or_default();

        for (glyph, line_y) in &glyphs {
            let physical = glyph.physical((origin_x, rect.y as f32 + line_y), 1.0);

            if let Some(image) = self
                .swash_cache
                .get_image(&mut self.font_system, physical.cache_key)
            {
                let glyph_x = physical.x + image.placement.left;
                let glyph_y = physical.y - image.placement.top;

                blit_white_ink(
                    buffer,
                    &image.data,
                    image.placement.width,
                    image.placement.height,
                    glyph_x,
                    glyph_y,
                );
            }
        }
    }
}

/// Blend white into the RGB channels by glyph coverage and zero the alpha
/// of every touched pixel; the compositor rebuilds alpha from max(R,G,B).
fn blit_white_ink(
    buffer: &mut PixelBuffer,
    glyph_data: &[u8],
    glyph_width: u32,
    glyph_height: u32,
    dest_x: i32,
    dest_y: i32,
) {
    for gy in 0..glyph_height as i32 {
        for gx in 0..glyph_width as i32 {
            let idx = (gy as u32 * glyph_width + gx as u32) as usize;
            let Some(&coverage) = glyph_data.get(idx) else {
                continue;
            };
            if coverage == 0 {
                continue;
            }

            let (px, py) = (dest_x + gx, dest_y + gy);
            let Some(pixel) = buffer.get(px, py) else {
                continue;
            };

            let cov = coverage as u32;
            let blend = |c: u32| c + (255 - c) * cov / 255;
            let r = blend((pixel >> 16) & 0xff);
            let g = blend((pixel >> 8) & 0xff);
            let b = blend(pixel & 0xff);
            buffer.put(px, py, r << 16 | g << 8 | b);
        }
    }
}
