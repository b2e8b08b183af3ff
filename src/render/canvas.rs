//! RGBA pixel buffer with the few drawing primitives the grid needs

use super::font::RenderedText;
use super::{ImageFormat, RenderError};
use crate::constants::export::JPEG_QUALITY;

#[derive(Debug, Clone)]
pub struct RgbaCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaCanvas {
    /// Opaque canvas filled with `background`
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width as usize * height as usize) {
            pixels.extend_from_slice(&[background[0], background[1], background[2], 0xFF]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Fill a rectangle, clipped to the canvas
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, rgb: [u8; 3]) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y.min(y_end)..y_end {
            for px in x.min(x_end)..x_end {
                let i = (py as usize * self.width as usize + px as usize) * 4;
                self.pixels[i..i + 4].copy_from_slice(&[rgb[0], rgb[1], rgb[2], 0xFF]);
            }
        }
    }

    /// Composite premultiplied ARGB text at (x, y); off-canvas pixels are skipped
    pub fn draw_text(&mut self, x: i64, y: i64, text: &RenderedText) {
        for ty in 0..text.height {
            for tx in 0..text.width {
                let src = text.data[ty * text.width + tx];
                let alpha = (src >> 24) & 0xFF;
                if alpha == 0 {
                    continue;
                }
                let (px, py) = (x + tx as i64, y + ty as i64);
                if px < 0 || py < 0 || px >= self.width as i64 || py >= self.height as i64 {
                    continue;
                }
                let i = (py as usize * self.width as usize + px as usize) * 4;
                let inverse = 255 - alpha;
                for (channel, shift) in [16u32, 8, 0].into_iter().enumerate() {
                    let s = (src >> shift) & 0xFF;
                    let d = self.pixels[i + channel] as u32;
                    self.pixels[i + channel] = (s + d * inverse / 255).min(255) as u8;
                }
            }
        }
    }

    pub fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, RenderError> {
        match format {
            ImageFormat::Png => self.encode_png(),
            ImageFormat::Jpeg => self.encode_jpeg(),
        }
    }

    fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
            writer.finish()?;
        }
        Ok(out)
    }

    fn encode_jpeg(&self) -> Result<Vec<u8>, RenderError> {
        // Canvas is always opaque; JPEG has no alpha
        let rgb: Vec<u8> = self
            .pixels
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();
        let mut out = Vec::new();
        let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
        encoder.encode(&rgb, self.width, self.height, image::ColorType::Rgb8)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_filled() {
        let canvas = RgbaCanvas::new(3, 2, [1, 2, 3]);
        assert_eq!(canvas.pixel(2, 1), Some([1, 2, 3, 255]));
        assert_eq!(canvas.pixel(3, 0), None);
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut canvas = RgbaCanvas::new(4, 4, [0, 0, 0]);
        canvas.fill_rect(2, 2, 10, 10, [9, 9, 9]);
        assert_eq!(canvas.pixel(3, 3), Some([9, 9, 9, 255]));
        assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_draw_text_blends_premultiplied() {
        let mut canvas = RgbaCanvas::new(2, 1, [0, 0, 100]);
        let text = RenderedText {
            width: 2,
            height: 1,
            // opaque white, then fully transparent
            data: vec![0xFF_FF_FF_FF, 0x00_00_00_00],
        };
        canvas.draw_text(0, 0, &text);
        assert_eq!(canvas.pixel(0, 0), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(1, 0), Some([0, 0, 100, 255]));
    }

    #[test]
    fn test_draw_text_offscreen_is_skipped() {
        let mut canvas = RgbaCanvas::new(1, 1, [0, 0, 0]);
        let text = RenderedText {
            width: 1,
            height: 1,
            data: vec![0xFF_FF_FF_FF],
        };
        canvas.draw_text(-5, 3, &text);
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_png_header_has_dimensions() {
        let bytes = RgbaCanvas::new(7, 5, [10, 20, 30]).encode(ImageFormat::Png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(u32::from_be_bytes(bytes[16..20].try_into().unwrap()), 7);
        assert_eq!(u32::from_be_bytes(bytes[20..24].try_into().unwrap()), 5);
    }

    #[test]
    fn test_jpeg_markers() {
        let bytes = RgbaCanvas::new(8, 8, [200, 20, 30]).encode(ImageFormat::Jpeg).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }
}
