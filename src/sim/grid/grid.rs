//! Cell status array for the swept area.
//!
//! Coordinates are 1-indexed: row `x` in `1..=rows`, column `y` in `1..=cols`.

use log::debug;

use crate::config::sim::MAX_GRID_SIZE;
use crate::error::{Result, SweepError};
use crate::sim::types::{CellStatus, Position};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GridState {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<CellStatus>>,
}

/// Check a requested size against the accepted range before touching any state.
pub fn validate_dimensions(rows: i64, cols: i64) -> Result<(usize, usize)> {
    let max = MAX_GRID_SIZE as i64;
    if rows <= 0 || cols <= 0 || rows > max || cols > max {
        return Err(SweepError::InvalidDimension { rows, cols, max: MAX_GRID_SIZE });
    }
    Ok((rows as usize, cols as usize))
}

impl GridState {
    /// A fresh `rows x cols` grid with every cell unvisited.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let mut grid = GridState::default();
        grid.reset(rows, cols)?;
        Ok(grid)
    }

    /// Resize and wipe the grid. On error the previous grid is left as it was.
    pub fn reset(&mut self, rows: usize, cols: usize) -> Result<()> {
        let (rows, cols) = validate_dimensions(
            i64::try_from(rows).unwrap_or(i64::MAX),
            i64::try_from(cols).unwrap_or(i64::MAX),
        )?;
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![vec![CellStatus::Unvisited; cols]; rows];
        debug!("[Grid] Reset to {}x{}", rows, cols);
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True once the grid has been given a size.
    pub fn is_configured(&self) -> bool {
        self.rows > 0 && self.cols > 0
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.x <= self.rows && pos.y >= 1 && pos.y <= self.cols
    }

    pub fn status_at(&self, x: usize, y: usize) -> Result<CellStatus> {
        self.get(Position::new(x, y)).ok_or_else(|| self.out_of_bounds(x, y))
    }

    pub fn set_status(&mut self, x: usize, y: usize, value: CellStatus) -> Result<()> {
        let pos = Position::new(x, y);
        if !self.contains(pos) {
            return Err(self.out_of_bounds(x, y));
        }
        self.cells[x - 1][y - 1] = value;
        Ok(())
    }

    /// Permissive lookup: anything off the grid reads as `None`.
    pub fn get(&self, pos: Position) -> Option<CellStatus> {
        if self.contains(pos) {
            Some(self.cells[pos.x - 1][pos.y - 1])
        } else {
            None
        }
    }

    /// True only for an in-bounds cell that has never been cleaned or blocked.
    pub fn is_unvisited(&self, pos: Position) -> bool {
        self.get(pos) == Some(CellStatus::Unvisited)
    }

    /// Turn every direction tag into the plain visited marker. Idempotent.
    pub fn settle(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if cell.is_entry_tag() {
                    *cell = CellStatus::Visited;
                }
            }
        }
    }

    /// Put every cleaned cell back to unvisited, leaving obstacles in place.
    pub fn clear_visited(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                if cell.is_visited() {
                    *cell = CellStatus::Unvisited;
                }
            }
        }
    }

    /// Number of cells currently holding a status that matches `predicate`.
    pub fn count(&self, predicate: impl Fn(CellStatus) -> bool) -> usize {
        self.cells.iter().flatten().filter(|cell| predicate(**cell)).count()
    }

    /// All cells in row-major order with their 1-indexed position.
    pub fn cells(&self) -> impl Iterator<Item = (Position, CellStatus)> + '_ {
        self.cells.iter().enumerate().flat_map(|(x, row)| {
            row.iter()
                .enumerate()
                .map(move |(y, cell)| (Position::new(x + 1, y + 1), *cell))
        })
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> SweepError {
        SweepError::OutOfBounds {
            x,
            y,
            rows: self.rows,
            cols: self.cols,
        }
    }
}
