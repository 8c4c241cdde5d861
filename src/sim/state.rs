use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{Result, SweepError};
use crate::sim::entities::{ObstacleRegistry, Placement};
use crate::sim::grid::GridState;
use crate::sim::random::RandomSource;
use crate::sim::systems::traversal::SweepOutcome;
use crate::sim::types::{CellStatus, Position};

/// Percentage of non-obstacle cells cleaned.
///
/// The denominator only subtracts placed obstacles, so cells walled off from
/// the start keep the figure below 100%. `None` when every cell is an obstacle.
pub fn coverage_percent(cleaned: usize, rows: usize, cols: usize, static_count: usize) -> Option<f64> {
    let free = (rows * cols).checked_sub(static_count)?;
    if free == 0 {
        return None;
    }
    Some(cleaned as f64 * 100.0 / free as f64)
}

/// Everything one simulation owns: the grid, its obstacles and the coverage counter.
#[derive(Debug, Clone, Default)]
pub struct SimulationState {
    pub grid: GridState,
    pub obstacles: ObstacleRegistry,
    pub(crate) cleaned: usize,
}

impl SimulationState {
    /// An unconfigured simulation (no grid yet).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self> {
        let mut state = Self::new();
        state.configure(rows, cols)?;
        Ok(state)
    }

    /// Resize the grid. Obstacles that still fit are kept and moving ones go
    /// back to where they were placed. On error nothing changes.
    pub fn configure(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.grid.reset(rows, cols)?;
        self.obstacles.reapply(&mut self.grid);
        self.cleaned = 0;
        info!(
            "[Simulation] Grid set to {}x{} with {} obstacle(s)",
            rows,
            cols,
            self.obstacles.static_count()
        );
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.grid.is_configured()
    }

    pub fn add_obstacle<R: RandomSource + ?Sized>(&mut self, pos: Position, random: &mut R) -> Result<Placement> {
        self.obstacles.add_static(&mut self.grid, pos, random)
    }

    /// Place several obstacles. Out-of-range ones are dropped with a warning
    /// and the rest are still placed. Returns the rejected positions.
    pub fn add_obstacles<R: RandomSource + ?Sized>(
        &mut self,
        positions: impl IntoIterator<Item = Position>,
        random: &mut R,
    ) -> Vec<Position> {
        let mut rejected = Vec::new();
        for pos in positions {
            match self.add_obstacle(pos, random) {
                Ok(_) => {}
                Err(err) => {
                    warn!("[Simulation] {}", err);
                    rejected.push(pos);
                }
            }
        }
        rejected
    }

    /// Forget the previous sweep: zero the counter and mark cleaned cells dirty again.
    pub fn prepare_run(&mut self) {
        self.cleaned = 0;
        self.grid.clear_visited();
    }

    pub fn cleaned(&self) -> usize {
        self.cleaned
    }

    pub fn coverage_percent(&self) -> Option<f64> {
        coverage_percent(self.cleaned, self.grid.rows(), self.grid.cols(), self.obstacles.static_count())
    }

    /// Read-only summary of the grid and its obstacles as they are now.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            cleaned: self.cleaned,
            visited_cells: self.grid.count(CellStatus::is_visited),
            static_obstacles: self.obstacles.static_count(),
            mobile_obstacles: self.obstacles.mobile_count(),
            coverage_percent: self.coverage_percent(),
            obstacle_positions: self.obstacles.current_positions(),
            mobile_positions: self.obstacles.mobiles().iter().map(|m| m.pos).collect(),
        }
    }

    pub fn report(&self, outcome: &SweepOutcome) -> RunReport {
        RunReport {
            run_id: outcome.run_id,
            elapsed_secs: outcome.elapsed.as_secs_f64(),
            cancelled: outcome.cancelled,
            state: self.snapshot(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    pub cleaned: usize,
    pub visited_cells: usize,
    pub static_obstacles: usize,
    pub mobile_obstacles: usize,
    pub coverage_percent: Option<f64>,
    pub obstacle_positions: Vec<Position>,
    pub mobile_positions: Vec<Position>,
}

/// Machine-readable summary of one sweep.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub elapsed_secs: f64,
    pub cancelled: bool,
    #[serde(flatten)]
    pub state: Snapshot,
}

impl RunReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SweepError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("[Simulation] Run report written to {}", path.display());
        Ok(())
    }
}
