//! JSON export envelope
//!
//! Export always writes `gridStates: {solo, dual}`. Import also accepts the
//! legacy `gridState` single matrix, which becomes the solo grid while dual
//! starts from defaults.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ImportError, Imported};
use crate::matrix::MatchupMatrix;
use crate::modes::ModeStore;
use crate::registry::RankRegistry;
use crate::state::default_rank_id;
use crate::types::{Character, Rank};

#[derive(Serialize)]
struct ExportEnvelope<'a> {
    characters: &'a [Character],
    ranks: &'a [Rank],
    #[serde(rename = "gridStates")]
    grid_states: &'a ModeStore,
}

/// Serialize the triple as a pretty-printed envelope (2-space indent)
pub fn export_json(
    roster: &[Character],
    registry: &RankRegistry,
    grids: &ModeStore,
) -> serde_json::Result<String> {
    let envelope = ExportEnvelope {
        characters: roster,
        ranks: registry.list(),
        grid_states: grids,
    };
    serde_json::to_string_pretty(&envelope)
}

/// The two grid shapes an envelope may carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedGrids {
    DualMode {
        solo: MatchupMatrix,
        dual: MatchupMatrix,
    },
    LegacyMode(MatchupMatrix),
}

impl ImportedGrids {
    pub fn is_legacy(&self) -> bool {
        matches!(self, ImportedGrids::LegacyMode(_))
    }

    /// Normalize to dual-mode storage, checking every matrix is `size × size`
    pub fn into_mode_store(self, size: usize) -> Result<ModeStore, ImportError> {
        match self {
            ImportedGrids::DualMode { solo, dual } => {
                check_dimensions("gridStates.solo", &solo, size)?;
                check_dimensions("gridStates.dual", &dual, size)?;
                Ok(ModeStore::from_parts(solo, dual))
            }
            ImportedGrids::LegacyMode(solo) => {
                check_dimensions("gridState", &solo, size)?;
                Ok(ModeStore::from_parts(
                    solo,
                    MatchupMatrix::create(size, &default_rank_id()),
                ))
            }
        }
    }
}

fn check_dimensions(field: &str, matrix: &MatchupMatrix, size: usize) -> Result<(), ImportError> {
    if matrix.is_square_of(size) {
        Ok(())
    } else {
        Err(ImportError::Malformed(format!(
            "`{field}` must be a {size}x{size} grid to match the character list"
        )))
    }
}

/// Present and not `null`
fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| !v.is_null())
}

fn array_field<'a>(value: &'a Value, key: &str) -> Result<&'a Value, ImportError> {
    field(value, key)
        .filter(|v| v.is_array())
        .ok_or_else(|| ImportError::Malformed(format!("`{key}` must be an array")))
}

fn parse_matrix(field_name: &str, value: &Value) -> Result<MatchupMatrix, ImportError> {
    serde_json::from_value(value.clone())
        .map_err(|e| ImportError::Malformed(format!("`{field_name}` is not a grid of rank ids: {e}")))
}

/// Pick the grid representation, preferring the dual-mode form
fn resolve_grids(envelope: &Value) -> Result<ImportedGrids, ImportError> {
    let grid_states = field(envelope, "gridStates");
    let legacy = field(envelope, "gridState");

    if grid_states.is_none() && legacy.is_none() {
        return Err(ImportError::Malformed(
            "neither `gridStates` nor `gridState` is present".to_string(),
        ));
    }

    if let Some(states) = grid_states {
        if let (Some(solo), Some(dual)) = (field(states, "solo"), field(states, "dual")) {
            return Ok(ImportedGrids::DualMode {
                solo: parse_matrix("gridStates.solo", solo)?,
                dual: parse_matrix("gridStates.dual", dual)?,
            });
        }
        warn!("`gridStates` is missing `solo` or `dual`, falling back to legacy `gridState`");
    }

    match legacy {
        Some(grid) if grid.is_array() => Ok(ImportedGrids::LegacyMode(parse_matrix("gridState", grid)?)),
        _ => Err(ImportError::Malformed(
            "`gridStates` needs both `solo` and `dual`, or `gridState` must be an array".to_string(),
        )),
    }
}

/// Parse and validate an export envelope
///
/// Cell ids are not checked against the imported ranks; unknown ids render
/// as unranked.
pub fn import_json(text: &str) -> Result<Imported, ImportError> {
    let envelope: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;

    let characters = array_field(&envelope, "characters")?;
    let ranks = array_field(&envelope, "ranks")?;
    let grids = resolve_grids(&envelope)?;

    let roster: Vec<Character> = serde_json::from_value(characters.clone())
        .map_err(|e| ImportError::Malformed(format!("invalid character entry: {e}")))?;
    let ranks: Vec<Rank> = serde_json::from_value(ranks.clone())
        .map_err(|e| ImportError::Malformed(format!("invalid rank entry: {e}")))?;

    let legacy = grids.is_legacy();
    let grids = grids.into_mode_store(roster.len())?;
    debug!(characters = roster.len(), ranks = ranks.len(), legacy, "Parsed import envelope");

    Ok(Imported {
        roster,
        ranks,
        grids,
        legacy,
    })
}
