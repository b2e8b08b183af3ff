//! Import/export of the (roster, ranks, grids) triple
//!
//! - **json**: export envelope in the current dual-mode format, import of both
//!   current and legacy single-grid files
//! - **csv**: flattened table of one mode
//! - **files**: reading import files and writing export artifacts

mod csv;
mod files;
mod json;

use thiserror::Error;

use crate::modes::ModeStore;
use crate::types::{Character, Rank};

pub use csv::export_csv;
pub use files::{image_filename, read_import, write_artifact};
pub use json::{export_json, import_json};

#[derive(Debug, Error)]
pub enum ImportError {
    /// Not valid JSON at all
    #[error("failed to import file, it is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    /// Valid JSON, wrong shape
    #[error("invalid import file format: {0}")]
    Malformed(String),
}

/// A validated envelope, normalized to dual-mode grids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imported {
    pub roster: Vec<Character>,
    pub ranks: Vec<Rank>,
    pub grids: ModeStore,
    /// Came from a legacy single-grid file
    pub legacy: bool,
}
