//! Command-line surface
//!
//! Without a subcommand the desktop editor is launched. The other commands
//! work on export files directly so charts can be converted in scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Settings;
use crate::exchange::read_import;
use crate::gui;
use crate::render::{export_raster_image, GridView, ImageFormat, RasterStyle, SoftwareRasterizer};
use crate::state::{AppState, ImportSummary};
use crate::types::{Character, Mode};

/// Matchup Ranker - rate every pairing of a roster and export the chart
#[derive(Parser, Debug)]
#[command(name = "matchup-ranker")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the grid editor (default)
    Gui {
        /// Export file to load on startup
        #[arg(long)]
        open: Option<PathBuf>,
    },

    /// Write one mode of an export file as a CSV table
    Csv {
        /// JSON export file
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Mode::Solo)]
        mode: Mode,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render one mode of an export file as an image
    Image {
        /// JSON export file
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Mode::Solo)]
        mode: Mode,

        #[arg(short, long, value_enum, default_value_t = ImageFormat::Png)]
        format: ImageFormat,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Rewrite a legacy single-grid file in the current format
    Upgrade {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },

    /// Write the default roster, ranks and grids as an export file
    Template {
        #[arg(short, long)]
        output: PathBuf,

        /// Comma-separated character names replacing the default roster
        #[arg(short, long, value_delimiter = ',')]
        characters: Vec<String>,
    },

    /// Validate an export file and report what it contains
    Check {
        #[arg(short, long)]
        input: PathBuf,
    },
}

pub fn run(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command.unwrap_or(Commands::Gui { open: None }) {
        Commands::Gui { open } => gui::run_gui(settings, open),
        Commands::Csv {
            input,
            mode,
            output,
        } => {
            let (state, _) = load_state(&input, mode)?;
            let table = state.export_csv();
            match output {
                Some(path) => write_output(&path, table.as_bytes()),
                None => {
                    let mut stdout = std::io::stdout().lock();
                    writeln!(stdout, "{table}").context("Failed to write CSV to stdout")
                }
            }
        }
        Commands::Image {
            input,
            mode,
            format,
            output,
        } => {
            let (state, _) = load_state(&input, mode)?;
            let rasterizer = SoftwareRasterizer::new(RasterStyle::from(&settings.image));
            let bytes = export_raster_image(&rasterizer, &GridView::capture(&state), format)
                .context("Failed to render image")?;
            write_output(&output, &bytes)
        }
        Commands::Upgrade { input, output } => {
            let (state, summary) = load_state(&input, Mode::Solo)?;
            if !summary.legacy {
                info!(path = %input.display(), "File already uses the current format");
            }
            let json = state.export_json().context("Failed to serialize export")?;
            write_output(&output, json.as_bytes())
        }
        Commands::Template { output, characters } => {
            let mut state = AppState::default();
            if !characters.is_empty() {
                let roster = characters
                    .iter()
                    .map(|name| Character::new(name.trim(), ""))
                    .collect();
                state = state.with_roster(roster);
            }
            let json = state.export_json().context("Failed to serialize export")?;
            write_output(&output, json.as_bytes())
        }
        Commands::Check { input } => {
            let (state, summary) = load_state(&input, Mode::Solo)?;
            let mut stdout = std::io::stdout().lock();
            write!(stdout, "{}", check_report(&state, &summary)).context("Failed to write report")
        }
    }
}

/// Import into a fresh state and switch to `mode`
fn load_state(input: &Path, mode: Mode) -> Result<(AppState, ImportSummary)> {
    let text = read_import(input)?;
    let mut state = AppState::default();
    let summary = state
        .import_json(&text)
        .with_context(|| format!("Failed to import {}", input.display()))?;
    state.set_active_mode(mode);
    Ok((state, summary))
}

fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = contents.len(), "Wrote output");
    Ok(())
}

fn check_report(state: &AppState, summary: &ImportSummary) -> String {
    let mut report = format!(
        "format: {}\ncharacters: {}\nranks: {}\n",
        if summary.legacy { "legacy (gridState)" } else { "current (gridStates)" },
        summary.characters,
        summary.ranks,
    );
    for mode in Mode::ALL {
        let dangling = state.grids().get(mode).dangling_cells(state.ranks());
        report.push_str(&format!("{mode}: {} unknown rank reference(s)", dangling.len()));
        if let Some((row, col)) = dangling.first() {
            report.push_str(&format!(", first at row {row} column {col}"));
        }
        report.push('\n');
    }
    report
}
