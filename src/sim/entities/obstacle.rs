//! Obstacle bookkeeping.
//!
//! Every placed obstacle is recorded in the static list. Some of them are
//! also enrolled as mobile when placed; those move during a sweep while the
//! static list keeps their creation cell.

use log::{debug, warn};

use crate::error::{Result, SweepError};
use crate::sim::grid::GridState;
use crate::sim::random::RandomSource;
use crate::sim::types::{CellStatus, MobileObstacle, Position};

/// Outcome of a placement request that was inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Placed { mobile: bool },
    /// The cell is currently marked as an obstacle.
    AlreadyBlocked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleRegistry {
    statics: Vec<Position>,
    mobiles: Vec<MobileObstacle>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an obstacle and flip the mobility coin for it.
    pub fn add_static<R: RandomSource + ?Sized>(
        &mut self,
        grid: &mut GridState,
        pos: Position,
        random: &mut R,
    ) -> Result<Placement> {
        let placement = self.place(grid, pos)?;
        if placement == Placement::AlreadyBlocked {
            return Ok(placement);
        }
        let mobile = random.promote_to_mobile();
        if mobile {
            self.mobiles.push(MobileObstacle::new(pos));
        }
        debug!("[Obstacles] Placed ({}, {}) mobile={}", pos.x, pos.y, mobile);
        Ok(Placement::Placed { mobile })
    }

    /// Place an obstacle that never moves, skipping the coin flip.
    pub fn add_fixed(&mut self, grid: &mut GridState, pos: Position) -> Result<Placement> {
        let placement = self.place(grid, pos)?;
        if placement != Placement::AlreadyBlocked {
            debug!("[Obstacles] Placed fixed ({}, {})", pos.x, pos.y);
        }
        Ok(placement)
    }

    fn place(&mut self, grid: &mut GridState, pos: Position) -> Result<Placement> {
        if !grid.contains(pos) {
            return Err(SweepError::OutOfRange {
                x: pos.x,
                y: pos.y,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        // A cell a mobile obstacle walked away from is plain floor again.
        if grid.get(pos) == Some(CellStatus::Obstacle) {
            debug!("[Obstacles] ({}, {}) already blocked, ignored", pos.x, pos.y);
            return Ok(Placement::AlreadyBlocked);
        }
        grid.set_status(pos.x, pos.y, CellStatus::Obstacle)?;
        self.statics.push(pos);
        Ok(Placement::Placed { mobile: false })
    }

    /// Number of placed obstacles, moving or not. Feeds the coverage denominator.
    pub fn static_count(&self) -> usize {
        self.statics.len()
    }

    pub fn mobile_count(&self) -> usize {
        self.mobiles.len()
    }

    /// Placement cell of every obstacle. A cell appears twice when an
    /// obstacle was placed where a mobile one had been placed and left.
    pub fn statics(&self) -> &[Position] {
        &self.statics
    }

    pub fn mobiles(&self) -> &[MobileObstacle] {
        &self.mobiles
    }

    pub(crate) fn mobiles_mut(&mut self) -> &mut [MobileObstacle] {
        &mut self.mobiles
    }

    pub fn is_mobile_at(&self, pos: Position) -> bool {
        self.mobiles.iter().any(|m| m.pos == pos)
    }

    /// Placement cells of the obstacles that never move.
    /// Each mobile obstacle claims one static entry equal to its origin.
    pub fn fixed_positions(&self) -> Vec<Position> {
        let mut unclaimed: Vec<Position> = self.mobiles.iter().map(|m| m.origin).collect();
        self.statics
            .iter()
            .copied()
            .filter(|pos| match unclaimed.iter().position(|origin| origin == pos) {
                Some(i) => {
                    unclaimed.swap_remove(i);
                    false
                }
                None => true,
            })
            .collect()
    }

    /// Where every obstacle sits right now: fixed ones at their creation
    /// cell, mobile ones wherever they last moved to.
    pub fn current_positions(&self) -> Vec<Position> {
        let mut positions = self.fixed_positions();
        positions.extend(self.mobiles.iter().map(|m| m.pos));
        positions.sort();
        positions
    }

    /// Keep only obstacles whose creation cell fits `grid` and mark every
    /// survivor on the grid. Mobile ones go back to their creation cell, or
    /// stay where they are if that cell was taken by a later obstacle.
    /// The grid is expected to have just been reset.
    pub fn reapply(&mut self, grid: &mut GridState) {
        let before = self.statics.len();
        self.statics.retain(|pos| grid.contains(*pos));
        self.mobiles.retain(|m| grid.contains(m.origin));
        if self.statics.len() < before {
            warn!(
                "[Obstacles] Dropped {} obstacle(s) outside the new {}x{} grid",
                before - self.statics.len(),
                grid.rows(),
                grid.cols()
            );
        }

        for pos in self.fixed_positions() {
            // Survivors were filtered with `contains`, so this cannot fail.
            let _ = grid.set_status(pos.x, pos.y, CellStatus::Obstacle);
        }

        let mut homed = Vec::with_capacity(self.mobiles.len());
        for mut mobile in std::mem::take(&mut self.mobiles) {
            let Some(cell) = [mobile.origin, mobile.pos]
                .into_iter()
                .find(|cell| grid.is_unvisited(*cell))
            else {
                warn!(
                    "[Obstacles] No free cell for mobile obstacle placed at ({}, {}), dropped",
                    mobile.origin.x, mobile.origin.y
                );
                if let Some(i) = self.statics.iter().position(|pos| *pos == mobile.origin) {
                    self.statics.remove(i);
                }
                continue;
            };
            let _ = grid.set_status(cell.x, cell.y, CellStatus::Obstacle);
            mobile.pos = cell;
            homed.push(mobile);
        }
        self.mobiles = homed;
    }
}
