//! User settings
//!
//! A single TOML file under the platform config directory. It is created with
//! defaults the first time the editor starts and clamped to safe ranges on every load.

pub mod settings;

pub use settings::{ImageSettings, Settings, WindowSettings};
