use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::export::IMAGE_BASENAME;
use crate::render::ImageFormat;

/// Read an import file as UTF-8 text
pub fn read_import(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read import file {}", path.display()))
}

/// Write an export artifact into `dir`, creating the directory if needed
pub fn write_artifact(dir: &Path, filename: &str, contents: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(filename);
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote export");
    Ok(path)
}

pub fn image_filename(format: ImageFormat) -> String {
    format!("{IMAGE_BASENAME}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifact_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports/today");
        let path = write_artifact(&nested, "table.csv", b"Your Pick").unwrap();
        assert_eq!(path, nested.join("table.csv"));
        assert_eq!(read_import(&path).unwrap(), "Your Pick");
    }

    #[test]
    fn test_read_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_import(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_image_filenames() {
        assert_eq!(image_filename(ImageFormat::Png), "matchup-table.png");
        assert_eq!(image_filename(ImageFormat::Jpeg), "matchup-table.jpeg");
    }
}
