//! Raster image export of the active matrix
//!
//! A [`GridView`] is captured from the state at invocation time, so the
//! rasterizer never sees the live state. The [`Rasterizer`] turns the view
//! into an RGBA canvas that is then encoded as PNG or JPEG.

mod canvas;
mod font;
mod raster;

use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::color::{rgb_for_tag, HexColor};
use crate::config::ImageSettings;
use crate::state::AppState;
use crate::types::Mode;

pub use canvas::RgbaCanvas;
pub use raster::SoftwareRasterizer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("JPEG encoding failed: {0}")]
    Jpeg(#[from] image::ImageError),
    #[error("image of {width}x{height} pixels is too large")]
    TooLarge { width: u64, height: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
        }
    }
}

/// How one cell is filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFill {
    Diagonal,
    Rank([u8; 3]),
    Unranked,
}

/// Immutable snapshot of what the image shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridView {
    pub mode: Mode,
    pub names: Vec<String>,
    pub cells: Vec<Vec<CellFill>>,
}

impl GridView {
    pub fn capture(state: &AppState) -> Self {
        let size = state.roster().len();
        let cells = (0..size)
            .map(|row| {
                (0..size)
                    .map(|col| {
                        if row == col {
                            CellFill::Diagonal
                        } else {
                            match state.resolve_cell(row, col) {
                                Some(rank) => CellFill::Rank(rgb_for_tag(&rank.color_tag)),
                                None => CellFill::Unranked,
                            }
                        }
                    })
                    .collect()
            })
            .collect();

        Self {
            mode: state.active_mode(),
            names: state.roster().iter().map(|c| c.name.clone()).collect(),
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.names.len()
    }
}

/// Layout and colors for the software rasterizer
#[derive(Debug, Clone, PartialEq)]
pub struct RasterStyle {
    pub cell_size: u32,
    pub gap: u32,
    pub label_padding: u32,
    pub text_size: f32,
    pub background: [u8; 3],
    pub font_path: Option<PathBuf>,
}

impl Default for RasterStyle {
    fn default() -> Self {
        Self::from(&ImageSettings::default())
    }
}

impl From<&ImageSettings> for RasterStyle {
    fn from(settings: &ImageSettings) -> Self {
        let background = HexColor::parse(&settings.background)
            .map(|c| c.rgb())
            .unwrap_or_else(|| {
                warn!(background = %settings.background, "Invalid background color, using default");
                [0x1F, 0x29, 0x37]
            });
        Self {
            cell_size: settings.cell_size,
            gap: settings.gap,
            label_padding: settings.label_padding,
            text_size: settings.text_size,
            background,
            font_path: settings.font_path.clone(),
        }
    }
}

pub trait Rasterizer {
    fn rasterize(&self, view: &GridView) -> Result<RgbaCanvas, RenderError>;
}

/// Render a captured view and encode it
pub fn export_raster_image(
    rasterizer: &dyn Rasterizer,
    view: &GridView,
    format: ImageFormat,
) -> Result<Vec<u8>, RenderError> {
    let canvas = rasterizer.rasterize(view)?;
    let bytes = canvas.encode(format)?;
    debug!(
        mode = %view.mode,
        format = format.extension(),
        width = canvas.width(),
        height = canvas.height(),
        bytes = bytes.len(),
        "Encoded raster image"
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RankId;

    #[test]
    fn test_capture_marks_diagonal_and_unranked() {
        let mut state = AppState::default();
        state.delete_rank(&RankId::Num(3));
        let view = GridView::capture(&state);
        assert_eq!(view.size(), state.roster().len());
        assert_eq!(view.cells[0][0], CellFill::Diagonal);
        // cells hold the sentinel, which no longer resolves
        assert_eq!(view.cells[0][1], CellFill::Unranked);
    }

    #[test]
    fn test_capture_resolves_rank_colors() {
        let mut state = AppState::default();
        state.select_rank(RankId::Num(1));
        assert!(state.paint(0, 1));
        let view = GridView::capture(&state);
        let red = rgb_for_tag(&state.ranks().by_id(&RankId::Num(1)).unwrap().color_tag);
        assert_eq!(view.cells[0][1], CellFill::Rank(red));
    }

    #[test]
    fn test_capture_is_a_snapshot() {
        let mut state = AppState::default();
        let view = GridView::capture(&state);
        state.select_rank(RankId::Num(1));
        state.paint(0, 1);
        assert_ne!(GridView::capture(&state), view);
    }

    #[test]
    fn test_style_invalid_background_falls_back() {
        let settings = ImageSettings {
            background: "not a color".to_string(),
            ..ImageSettings::default()
        };
        assert_eq!(RasterStyle::from(&settings).background, [0x1F, 0x29, 0x37]);
    }

    struct FailingRasterizer;

    impl Rasterizer for FailingRasterizer {
        fn rasterize(&self, _view: &GridView) -> Result<RgbaCanvas, RenderError> {
            Err(RenderError::TooLarge { width: 1, height: 1 })
        }
    }

    #[test]
    fn test_export_propagates_rasterizer_failure() {
        let state = AppState::default();
        let view = GridView::capture(&state);
        let result = export_raster_image(&FailingRasterizer, &view, ImageFormat::Png);
        assert!(matches!(result, Err(RenderError::TooLarge { .. })));
    }
}
