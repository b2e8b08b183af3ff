//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Rank registry constants
pub mod ranks {
    /// Maximum number of concurrent rank definitions (one per digit hotkey)
    pub const MAX_RANKS: usize = 9;

    /// Rank id every cell falls back to (the "Even" rank of the default set)
    pub const DEFAULT_RANK_ID: i64 = 3;

    /// Palette index used for newly added ranks (green)
    pub const NEW_RANK_COLOR_INDEX: usize = 5;
}

/// Labels shared by the CSV table, raster image and GUI
pub mod labels {
    /// Top-left header of the CSV table
    pub const YOUR_PICK: &str = "Your Pick";

    /// Column axis label
    pub const OPPONENT: &str = "Opponent";

    /// Placeholder for cells whose rank id does not resolve
    pub const UNRANKED: &str = "Unranked";
}

/// Export artifact naming
pub mod export {
    /// JSON envelope file name
    pub const JSON_FILENAME: &str = "matchup-data.json";

    /// CSV table file name
    pub const CSV_FILENAME: &str = "matchup-table.csv";

    /// Raster image base name (extension added per format)
    pub const IMAGE_BASENAME: &str = "matchup-table";

    /// JPEG quality (0.9 of the encoder's 1..=100 range)
    pub const JPEG_QUALITY: u8 = 90;
}

/// Raster rendering colors (RGB)
pub mod raster {
    /// Fill for diagonal (self-matchup) cells
    pub const DIAGONAL_COLOR: [u8; 3] = [0x11, 0x18, 0x27];

    /// Fill for cells whose rank id does not resolve
    pub const UNRANKED_COLOR: [u8; 3] = [0x4B, 0x55, 0x63];

    /// Label text color (ARGB)
    pub const TEXT_COLOR: u32 = 0xFF_D1_D5_DB;
}

/// Settings file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "matchup-ranker";

    /// Settings file name
    pub const FILENAME: &str = "config.toml";
}

/// Font discovery
pub mod fonts {
    /// Fallback TrueType paths tried when no font is configured
    pub const FALLBACK_PATHS: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/usr/share/fonts/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
}

/// Settings validation limits
pub mod validation {
    pub const MIN_CELL_SIZE: u32 = 16;
    pub const MAX_CELL_SIZE: u32 = 256;
    pub const MAX_GAP: u32 = 32;
    pub const MAX_LABEL_PADDING: u32 = 64;
    pub const MIN_TEXT_SIZE: f32 = 6.0;
    pub const MAX_TEXT_SIZE: f32 = 72.0;
    pub const MIN_WINDOW_WIDTH: u32 = 480;
    pub const MIN_WINDOW_HEIGHT: u32 = 360;
    pub const MAX_WINDOW_DIMENSION: u32 = 8192;
    pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
}
