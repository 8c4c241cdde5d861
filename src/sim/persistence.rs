//! Map files.
//!
//! Plain text, whitespace separated: the first record is `<rows> <cols>`,
//! each following record is one obstacle `<x> <y>`. Only the obstacles'
//! placement cells are stored; mobility, sweep progress and the coverage
//! counter are not, so a loaded map always starts unexplored.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use crate::error::{Result, SweepError};
use crate::sim::entities::ObstacleRegistry;
use crate::sim::grid::{GridState, validate_dimensions};
use crate::sim::state::SimulationState;
use crate::sim::types::Position;

/// Parsed contents of a map file, before validation against the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapFile {
    pub rows: i64,
    pub cols: i64,
    pub obstacles: Vec<(i64, i64)>,
}

impl MapFile {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            rows: state.grid.rows() as i64,
            cols: state.grid.cols() as i64,
            obstacles: state
                .obstacles
                .statics()
                .iter()
                .map(|pos| (pos.x as i64, pos.y as i64))
                .collect(),
        }
    }

    /// Parse the text form. Reading stops at the first token that is not
    /// an integer; a lone trailing number is ignored.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let mut tokens = text.split_whitespace();
        let mut next_int = |name: &str| -> std::result::Result<i64, String> {
            let token = tokens.next().ok_or_else(|| format!("missing {name}"))?;
            token.parse::<i64>().map_err(|_| format!("{name} `{token}` is not an integer"))
        };
        let rows = next_int("row count")?;
        let cols = next_int("column count")?;

        let mut obstacles = Vec::new();
        let mut numbers = tokens.map_while(|token| token.parse::<i64>().ok());
        while let (Some(x), Some(y)) = (numbers.next(), numbers.next()) {
            obstacles.push((x, y));
        }

        Ok(Self { rows, cols, obstacles })
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} {}", self.rows, self.cols);
        for (x, y) in &self.obstacles {
            let _ = writeln!(out, "{} {}", x, y);
        }
        out
    }
}

/// Write the grid size and every placed obstacle to `path`.
pub fn save(state: &SimulationState, path: &Path) -> Result<()> {
    let text = MapFile::from_state(state).to_text();
    fs::write(path, text).map_err(|source| SweepError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "[Persistence] Saved {}x{} map with {} obstacle(s) to {}",
        state.grid.rows(),
        state.grid.cols(),
        state.obstacles.static_count(),
        path.display()
    );
    Ok(())
}

/// Replace the whole simulation with the map stored at `path`.
///
/// Obstacles come back fixed (never mobile). Records outside the stored
/// dimensions are skipped. On any error `state` is left untouched.
/// Returns the number of records skipped.
pub fn load(state: &mut SimulationState, path: &Path) -> Result<usize> {
    let text = fs::read_to_string(path).map_err(|source| SweepError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let map = MapFile::parse(&text).map_err(|reason| SweepError::MalformedMap {
        path: path.to_path_buf(),
        reason,
    })?;
    let (rows, cols) = validate_dimensions(map.rows, map.cols)?;

    let mut grid = GridState::new(rows, cols)?;
    let mut obstacles = ObstacleRegistry::new();
    let mut skipped = 0;
    for &(x, y) in &map.obstacles {
        let placed = usize::try_from(x)
            .ok()
            .zip(usize::try_from(y).ok())
            .map(|(x, y)| obstacles.add_fixed(&mut grid, Position::new(x, y)));
        match placed {
            Some(Ok(_)) => {}
            _ => {
                debug!("[Persistence] Skipping out-of-range obstacle ({}, {})", x, y);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        warn!("[Persistence] Skipped {} out-of-range obstacle(s) in {}", skipped, path.display());
    }

    *state = SimulationState {
        grid,
        obstacles,
        cleaned: 0,
    };
    info!(
        "[Persistence] Loaded {}x{} map with {} obstacle(s) from {}",
        rows,
        cols,
        state.obstacles.static_count(),
        path.display()
    );
    Ok(skipped)
}
