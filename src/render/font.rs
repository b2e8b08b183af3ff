//! TrueType label rendering using fontdue (pure Rust)

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::fonts::FALLBACK_PATHS;

/// Rendered text as ARGB bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedText {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>, // ARGB pixels (premultiplied alpha)
}

impl RenderedText {
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Rotate 90° counter-clockwise so the text reads bottom-to-top
    pub fn rotated_ccw(&self) -> Self {
        let mut data = vec![0u32; self.data.len()];
        let (new_width, new_height) = (self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                let nx = y;
                let ny = self.width - 1 - x;
                data[ny * new_width + nx] = self.data[y * self.width + x];
            }
        }
        Self {
            width: new_width,
            height: new_height,
            data,
        }
    }
}

#[derive(Debug)]
pub struct FontRenderer {
    font: Font,
    size: f32,
}

impl FontRenderer {
    pub fn from_path(path: &Path, size: f32) -> Result<Self> {
        let font_data = fs::read(path)
            .with_context(|| format!("Failed to read font file: {}", path.display()))?;
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to parse font {}: {}", path.display(), e))?;
        debug!(path = %path.display(), size, "Loaded label font");
        Ok(Self { font, size })
    }

    /// Configured font first, then well-known system locations
    pub fn discover(configured: Option<&Path>, size: f32) -> Option<Self> {
        if let Some(path) = configured {
            match Self::from_path(path, size) {
                Ok(renderer) => return Some(renderer),
                Err(e) => warn!(error = %e, "Configured font unusable, trying system fonts"),
            }
        }
        FALLBACK_PATHS
            .iter()
            .map(PathBuf::from)
            .find_map(|path| Self::from_path(&path, size).ok())
    }

    /// Render `text` in `fg_color` (ARGB, not premultiplied) on a transparent background
    pub fn render_text(&self, text: &str, fg_color: u32) -> RenderedText {
        if text.is_empty() {
            return RenderedText::empty();
        }

        let mut glyphs = Vec::new();
        let mut pen_x = 0.0f32;
        let mut max_ascent = 0i32;
        let mut max_descent = 0i32;

        for ch in text.chars() {
            let (metrics, bitmap) = self.font.rasterize(ch, self.size);
            max_ascent = max_ascent.max(metrics.height as i32 + metrics.ymin);
            max_descent = max_descent.max(-metrics.ymin);
            glyphs.push((pen_x as i32 + metrics.xmin, metrics, bitmap));
            pen_x += metrics.advance_width;
        }

        let width = pen_x.ceil() as usize;
        let height = (max_ascent + max_descent).max(0) as usize;
        if width == 0 || height == 0 {
            return RenderedText::empty();
        }

        let mut data = vec![0u32; width * height];
        let channel = |shift: u32| ((fg_color >> shift) & 0xFF) as f32 / 255.0;
        let (fg_a, fg_r, fg_g, fg_b) = (channel(24), channel(16), channel(8), channel(0));

        for (x_offset, metrics, bitmap) in glyphs {
            let top = max_ascent - (metrics.height as i32 + metrics.ymin);
            for gy in 0..metrics.height {
                for gx in 0..metrics.width {
                    let px = x_offset + gx as i32;
                    let py = top + gy as i32;
                    if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                        continue;
                    }
                    let coverage = bitmap[gy * metrics.width + gx] as f32 / 255.0;
                    if coverage <= 0.0 {
                        continue;
                    }
                    let a = (fg_a * coverage * 255.0) as u32;
                    let r = (fg_r * fg_a * coverage * 255.0) as u32;
                    let g = (fg_g * fg_a * coverage * 255.0) as u32;
                    let b = (fg_b * fg_a * coverage * 255.0) as u32;
                    data[py as usize * width + px as usize] = (a << 24) | (r << 16) | (g << 8) | b;
                }
            }
        }

        RenderedText { width, height, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotated_ccw_dimensions_and_pixels() {
        // 3x2 bitmap:
        // a b c
        // d e f
        let text = RenderedText {
            width: 3,
            height: 2,
            data: vec![1, 2, 3, 4, 5, 6],
        };
        let rotated = text.rotated_ccw();
        assert_eq!((rotated.width, rotated.height), (2, 3));
        // c f
        // b e
        // a d
        assert_eq!(rotated.data, vec![3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_rotating_empty_is_empty() {
        assert!(RenderedText::empty().rotated_ccw().is_empty());
    }

    #[test]
    fn test_missing_font_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FontRenderer::from_path(&dir.path().join("none.ttf"), 14.0).is_err());
    }
}
