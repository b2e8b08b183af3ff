use tracing::{debug, warn};

use super::canvas::RgbaCanvas;
use super::font::{FontRenderer, RenderedText};
use super::{CellFill, GridView, RasterStyle, RenderError, Rasterizer};
use crate::constants::labels::{OPPONENT, YOUR_PICK};
use crate::constants::raster::{DIAGONAL_COLOR, TEXT_COLOR, UNRANKED_COLOR};

/// Largest edge we are willing to allocate
const MAX_EDGE: u64 = 16_384;

/// Draws the grid with row labels on the left and rotated column labels on top
#[derive(Debug)]
pub struct SoftwareRasterizer {
    style: RasterStyle,
    font: Option<FontRenderer>,
}

impl SoftwareRasterizer {
    pub fn new(style: RasterStyle) -> Self {
        let font = FontRenderer::discover(style.font_path.as_deref(), style.text_size);
        if font.is_none() {
            warn!("No usable TrueType font found, images will have no labels");
        }
        Self { style, font }
    }

    /// Rasterizer that never draws text
    pub fn without_labels(style: RasterStyle) -> Self {
        Self { style, font: None }
    }

    fn label(&self, text: &str) -> RenderedText {
        match &self.font {
            Some(font) => font.render_text(text, TEXT_COLOR),
            None => RenderedText::empty(),
        }
    }
}

impl Rasterizer for SoftwareRasterizer {
    fn rasterize(&self, view: &GridView) -> Result<RgbaCanvas, RenderError> {
        let style = &self.style;
        let pad = style.label_padding as u64;
        let pitch = style.cell_size as u64 + style.gap as u64;
        let size = view.size() as u64;

        let row_labels: Vec<RenderedText> = view.names.iter().map(|n| self.label(n)).collect();
        let col_labels: Vec<RenderedText> = row_labels.iter().map(|t| t.rotated_ccw()).collect();
        let your_pick = self.label(YOUR_PICK);
        let opponent = self.label(OPPONENT);

        let widest = row_labels
            .iter()
            .chain([&your_pick, &opponent])
            .map(|t| t.width as u64)
            .max()
            .unwrap_or(0);
        // Square header band so the rotated names fit as well as the row names
        let band = (widest + 2 * pad).max(style.cell_size as u64);

        let width = pad + band + size * pitch + pad;
        let height = width;
        if width > MAX_EDGE {
            return Err(RenderError::TooLarge { width, height });
        }

        let mut canvas = RgbaCanvas::new(width as u32, height as u32, style.background);
        let origin = pad + band;

        for (row, fills) in view.cells.iter().enumerate() {
            for (col, fill) in fills.iter().enumerate() {
                let rgb = match fill {
                    CellFill::Diagonal => DIAGONAL_COLOR,
                    CellFill::Rank(rgb) => *rgb,
                    CellFill::Unranked => UNRANKED_COLOR,
                };
                canvas.fill_rect(
                    (origin + col as u64 * pitch) as u32,
                    (origin + row as u64 * pitch) as u32,
                    style.cell_size,
                    style.cell_size,
                    rgb,
                );
            }
        }

        let cell = style.cell_size as i64;
        let origin = origin as i64;
        let pitch = pitch as i64;
        let pad = pad as i64;

        for (i, text) in row_labels.iter().enumerate() {
            let x = origin - pad - text.width as i64;
            let y = origin + i as i64 * pitch + (cell - text.height as i64) / 2;
            canvas.draw_text(x, y, text);
        }
        for (i, text) in col_labels.iter().enumerate() {
            let x = origin + i as i64 * pitch + (cell - text.width as i64) / 2;
            let y = origin - pad - text.height as i64;
            canvas.draw_text(x, y, text);
        }

        // Axis captions in the corner: columns top-right, rows bottom-left
        canvas.draw_text(origin - pad - opponent.width as i64, pad, &opponent);
        canvas.draw_text(pad, origin - pad - your_pick.height as i64, &your_pick);

        debug!(width, height, labelled = self.font.is_some(), "Rasterized grid");
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crate::types::RankId;

    fn style() -> RasterStyle {
        RasterStyle {
            cell_size: 10,
            gap: 2,
            label_padding: 3,
            text_size: 12.0,
            background: [1, 2, 3],
            font_path: None,
        }
    }

    #[test]
    fn test_unlabelled_dimensions() {
        let state = AppState::default();
        let view = GridView::capture(&state);
        let canvas = SoftwareRasterizer::without_labels(style())
            .rasterize(&view)
            .unwrap();
        // pad + band(cell) + n * (cell + gap) + pad
        let expected = 3 + 10 + view.size() as u32 * 12 + 3;
        assert_eq!((canvas.width(), canvas.height()), (expected, expected));
    }

    #[test]
    fn test_cell_colors() {
        let mut state = AppState::default();
        state.delete_rank(&RankId::Num(3));
        let view = GridView::capture(&state);
        let canvas = SoftwareRasterizer::without_labels(style())
            .rasterize(&view)
            .unwrap();
        let origin = 3 + 10;
        let rgb = |x: u32, y: u32| canvas.pixel(x, y).map(|p| [p[0], p[1], p[2]]);
        assert_eq!(rgb(0, 0), Some([1, 2, 3]));
        assert_eq!(rgb(origin + 1, origin + 1), Some(DIAGONAL_COLOR));
        assert_eq!(rgb(origin + 12 + 1, origin + 1), Some(UNRANKED_COLOR));
        // gap between cells shows the background
        assert_eq!(rgb(origin + 10, origin + 1), Some([1, 2, 3]));
    }

    #[test]
    fn test_empty_roster_still_renders() {
        let state = AppState::new(Vec::new(), Vec::new());
        let canvas = SoftwareRasterizer::without_labels(style())
            .rasterize(&GridView::capture(&state))
            .unwrap();
        assert_eq!(canvas.width(), 16);
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let huge = RasterStyle {
            cell_size: 4_000,
            ..style()
        };
        let view = GridView::capture(&AppState::default());
        let result = SoftwareRasterizer::without_labels(huge).rasterize(&view);
        assert!(matches!(result, Err(RenderError::TooLarge { .. })));
    }
}
