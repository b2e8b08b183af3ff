use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::color::HexColor;
use crate::constants::validation::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Used when `LOG_LEVEL` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where GUI exports are written
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    #[serde(default)]
    pub image: ImageSettings,

    #[serde(default)]
    pub window: WindowSettings,
}

/// Raster export layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    #[serde(default = "default_gap")]
    pub gap: u32,

    #[serde(default = "default_label_padding")]
    pub label_padding: u32,

    /// Label size in pixels (accepts integer or float)
    #[serde(
        default = "default_text_size",
        deserialize_with = "deserialize_text_size",
        serialize_with = "serialize_text_size"
    )]
    pub text_size: f32,

    #[serde(default = "default_background")]
    pub background: String,

    /// TrueType font for labels; system fonts are tried when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_cell_size() -> u32 {
    64
}

fn default_gap() -> u32 {
    2
}

fn default_label_padding() -> u32 {
    8
}

fn default_text_size() -> f32 {
    16.0
}

fn default_background() -> String {
    "#1f2937".to_string()
}

fn default_window_width() -> u32 {
    1100
}

fn default_window_height() -> u32 {
    820
}

fn deserialize_text_size<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrFloat {
        Int(i64),
        Float(f32),
    }

    match IntOrFloat::deserialize(deserializer)? {
        IntOrFloat::Int(i) => Ok(i as f32),
        IntOrFloat::Float(f) => Ok(f),
    }
}

/// Whole numbers are written without a decimal point
fn serialize_text_size<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.fract() == 0.0 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f32(*value)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            export_dir: default_export_dir(),
            image: ImageSettings::default(),
            window: WindowSettings::default(),
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            gap: default_gap(),
            label_padding: default_label_padding(),
            text_size: default_text_size(),
            background: default_background(),
            font_path: None,
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Settings {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::config::APP_DIR);
        path.push(crate::constants::config::FILENAME);
        path
    }

    /// Load from the default location; defaults when no file exists
    pub fn load() -> Result<Self> {
        let path = Self::path();
        if path.exists() {
            return Self::load_from(&path);
        }
        Ok(Self::default())
    }

    /// Write these settings to `path` unless a file is already there
    ///
    /// Returns whether a file was created.
    pub fn create_if_missing(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        self.save_to(path)?;
        info!(path = %path.display(), "Generated settings file");
        Ok(true)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let mut settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        settings.validate_and_clamp();
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings to TOML")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        Ok(())
    }

    /// Clamp values into safe ranges, logging each correction
    pub fn validate_and_clamp(&mut self) {
        let level = self.log_level.to_ascii_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
            self.log_level = level;
        } else {
            warn!(log_level = %self.log_level, "Unknown log_level, using info");
            self.log_level = default_log_level();
        }

        let image = &mut self.image;
        if image.cell_size < MIN_CELL_SIZE {
            warn!(cell_size = image.cell_size, min = MIN_CELL_SIZE, "cell_size below minimum, clamping");
            image.cell_size = MIN_CELL_SIZE;
        } else if image.cell_size > MAX_CELL_SIZE {
            warn!(cell_size = image.cell_size, max = MAX_CELL_SIZE, "cell_size exceeds maximum, clamping");
            image.cell_size = MAX_CELL_SIZE;
        }

        if image.gap > MAX_GAP {
            warn!(gap = image.gap, max = MAX_GAP, "gap exceeds maximum, clamping");
            image.gap = MAX_GAP;
        }

        if image.label_padding > MAX_LABEL_PADDING {
            warn!(label_padding = image.label_padding, max = MAX_LABEL_PADDING, "label_padding exceeds maximum, clamping");
            image.label_padding = MAX_LABEL_PADDING;
        }

        if !image.text_size.is_finite() || image.text_size < MIN_TEXT_SIZE {
            warn!(text_size = image.text_size, min = MIN_TEXT_SIZE, "text_size below minimum, clamping");
            image.text_size = MIN_TEXT_SIZE;
        } else if image.text_size > MAX_TEXT_SIZE {
            warn!(text_size = image.text_size, max = MAX_TEXT_SIZE, "text_size exceeds maximum, clamping");
            image.text_size = MAX_TEXT_SIZE;
        }

        if HexColor::parse(&image.background).is_none() {
            warn!(background = %image.background, "Invalid background hex, using default");
            image.background = default_background();
        }

        let window = &mut self.window;
        window.width = clamp_dimension("window.width", window.width, MIN_WINDOW_WIDTH);
        window.height = clamp_dimension("window.height", window.height, MIN_WINDOW_HEIGHT);
    }
}

fn clamp_dimension(field: &str, value: u32, min: u32) -> u32 {
    if value < min {
        warn!(field, value, min, "Window dimension below minimum, clamping");
        min
    } else if value > MAX_WINDOW_DIMENSION {
        warn!(field, value, max = MAX_WINDOW_DIMENSION, "Window dimension exceeds maximum, clamping");
        MAX_WINDOW_DIMENSION
    } else {
        value
    }
}
