//! Sweep rendering system (terminal).
//!
//! A `Frame` is the read-only view handed to renderers after every cleaned
//! cell. `TerminalRenderer` draws it as the live monitor screen.

use std::io::Write;
use std::time::Duration;

use log::warn;

use crate::sim::entities::ObstacleRegistry;
use crate::sim::grid::GridState;
use crate::sim::state::coverage_percent;
use crate::sim::types::{CellStatus, Position};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Snapshot of the sweep passed to a `Renderer`.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub grid: &'a GridState,
    pub obstacles: &'a ObstacleRegistry,
    /// Cell the robot is on.
    pub robot: Position,
    pub cleaned: usize,
    pub elapsed: Duration,
}

impl Frame<'_> {
    /// `None` when every cell is an obstacle.
    pub fn coverage_percent(&self) -> Option<f64> {
        coverage_percent(self.cleaned, self.grid.rows(), self.grid.cols(), self.obstacles.static_count())
    }

    /// Time left at the current pace, zero until the first cell is cleaned.
    pub fn remaining_estimate(&self) -> Duration {
        if self.cleaned == 0 {
            return Duration::ZERO;
        }
        let left = (self.grid.rows() * self.grid.cols())
            .saturating_sub(self.obstacles.static_count())
            .saturating_sub(self.cleaned);
        self.elapsed.mul_f64(left as f64 / self.cleaned as f64)
    }
}

/// Observer of a sweep. Must not mutate simulation state.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame<'_>) {}
}

/// Draws frames as text on any writer (stdout in the shell).
pub struct TerminalRenderer<W: Write> {
    out: W,
    clear_screen: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) {
        if let Err(err) = draw_frame(&mut self.out, frame, self.clear_screen) {
            warn!("[Render] Failed to draw frame: {}", err);
        }
    }
}

/// Symbol for one cell. Mobile obstacles are drawn over whatever the grid holds.
pub fn cell_symbol(status: CellStatus, mobile: bool) -> &'static str {
    if mobile {
        return "★";
    }
    match status {
        CellStatus::Obstacle => "■",
        CellStatus::Unvisited => "○",
        CellStatus::EnteredFromLeft => "→",
        CellStatus::EnteredFromAbove => "↓",
        CellStatus::EnteredFromRight => "←",
        CellStatus::EnteredFromBelow => "↑",
        CellStatus::Visited => "●",
    }
}

/// Write the monitor screen: header, statistics, legend, then the grid.
pub fn draw_frame<W: Write>(out: &mut W, frame: &Frame<'_>, clear_screen: bool) -> std::io::Result<()> {
    if clear_screen {
        write!(out, "{}", CLEAR_SCREEN)?;
    }

    writeln!(out, "====== Cleaning Robot Monitor ======")?;
    writeln!(out, "Map size: {}x{}", frame.grid.rows(), frame.grid.cols())?;
    writeln!(out, "Obstacles: {}", frame.obstacles.static_count())?;
    writeln!(out, "Elapsed: {:.1}s", frame.elapsed.as_secs_f64())?;
    writeln!(out, "Remaining (est.): {:.1}s", frame.remaining_estimate().as_secs_f64())?;
    match frame.coverage_percent() {
        Some(percent) => writeln!(out, "Coverage: {:.1}%", percent)?,
        None => writeln!(out, "Coverage: n/a")?,
    }

    writeln!(out, "Legend: ■ obstacle  ★ moving obstacle")?;
    writeln!(out, "        ○ dirty     ● cleaned")?;
    writeln!(out, "        → ↓ ← ↑ direction of travel")?;

    for x in 1..=frame.grid.rows() {
        for y in 1..=frame.grid.cols() {
            let pos = Position::new(x, y);
            let status = frame.grid.get(pos).unwrap_or(CellStatus::Unvisited);
            write!(out, " {}", cell_symbol(status, frame.obstacles.is_mobile_at(pos)))?;
        }
        writeln!(out)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;

    #[test]
    fn test_draw_frame_layout() {
        let mut grid = GridState::new(2, 3).unwrap();
        let mut obstacles = ObstacleRegistry::new();
        let mut random = ScriptedRandom::new([false, true], []);
        obstacles.add_static(&mut grid, Position::new(1, 3), &mut random).unwrap();
        obstacles.add_static(&mut grid, Position::new(2, 1), &mut random).unwrap();
        grid.set_status(1, 1, CellStatus::Visited).unwrap();
        grid.set_status(1, 2, CellStatus::EnteredFromLeft).unwrap();

        let frame = Frame {
            grid: &grid,
            obstacles: &obstacles,
            robot: Position::new(1, 2),
            cleaned: 2,
            elapsed: Duration::from_secs(1),
        };
        let mut out = Vec::new();
        draw_frame(&mut out, &frame, false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Map size: 2x3"));
        assert!(text.contains("Obstacles: 2"));
        assert!(text.contains("Coverage: 50.0%"));
        assert!(text.contains("Remaining (est.): 1.0s"));
        assert!(text.ends_with(" ● → ■\n ★ ○ ○\n"));
        assert!(!text.contains(CLEAR_SCREEN));
    }

    #[test]
    fn test_coverage_undefined_when_all_blocked() {
        let mut grid = GridState::new(1, 1).unwrap();
        let mut obstacles = ObstacleRegistry::new();
        obstacles.add_fixed(&mut grid, Position::new(1, 1)).unwrap();
        let frame = Frame {
            grid: &grid,
            obstacles: &obstacles,
            robot: Position::new(1, 1),
            cleaned: 0,
            elapsed: Duration::ZERO,
        };

        assert_eq!(frame.coverage_percent(), None);
        assert_eq!(frame.remaining_estimate(), Duration::ZERO);

        let mut out = Vec::new();
        draw_frame(&mut out, &frame, true).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(CLEAR_SCREEN));
        assert!(text.contains("Coverage: n/a"));
    }
}
