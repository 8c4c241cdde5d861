//! Coverage sweep.
//!
//! Depth-first from `(1, 1)`, trying right, down, left, then up from every
//! cleaned cell. The walk keeps its own stack instead of recursing, but
//! enters cells in exactly the order the recursive form would: a neighbour
//! is only examined once every earlier sibling branch has been fully
//! explored.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info};
use uuid::Uuid;

use crate::config::sim::TICK_DELAY_MS;
use crate::sim::random::RandomSource;
use crate::sim::schedule::Scheduler;
use crate::sim::state::SimulationState;
use crate::sim::systems::motion::step_obstacles;
use crate::sim::systems::render::{Frame, Renderer};
use crate::sim::types::{Direction, Position};

/// First cell of every sweep.
pub const START: Position = Position { x: 1, y: 1 };

/// The start cell counts as entered while moving right (from its left side).
pub const START_DIRECTION: Direction = Direction::Right;

/// Summary of a finished (or cancelled) sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepOutcome {
    pub run_id: Uuid,
    pub cleaned: usize,
    pub elapsed: Duration,
    pub cancelled: bool,
}

/// A cleaned cell whose neighbours are still being explored.
#[derive(Debug, Clone, Copy)]
struct Branch {
    pos: Position,
    next: usize,
}

pub struct CoverageTraversal<'a> {
    renderer: &'a mut dyn Renderer,
    scheduler: &'a mut dyn Scheduler,
    random: &'a mut dyn RandomSource,
    tick_delay: Duration,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> CoverageTraversal<'a> {
    pub fn new(
        renderer: &'a mut dyn Renderer,
        scheduler: &'a mut dyn Scheduler,
        random: &'a mut dyn RandomSource,
    ) -> Self {
        Self {
            renderer,
            scheduler,
            random,
            tick_delay: Duration::from_millis(TICK_DELAY_MS),
            cancel: None,
        }
    }

    /// Pause after every cleaned cell.
    pub fn with_tick_delay(mut self, tick_delay: Duration) -> Self {
        self.tick_delay = tick_delay;
        self
    }

    /// Stop entering new cells once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Sweep the grid starting at `(1, 1)`.
    ///
    /// Resets the coverage counter first. Cells already cleaned by an earlier
    /// run stay cleaned; use `SimulationState::prepare_run` to start over.
    pub fn run(&mut self, state: &mut SimulationState) -> SweepOutcome {
        let run_id = Uuid::new_v4();
        state.cleaned = 0;
        self.scheduler.restart();
        info!(
            "[Traversal] Sweep started: run_id={} grid={}x{} obstacles={} mobile={}",
            run_id,
            state.grid.rows(),
            state.grid.cols(),
            state.obstacles.static_count(),
            state.obstacles.mobile_count()
        );

        let mut stack: Vec<Branch> = Vec::new();

        if !self.enter(state, START, START_DIRECTION, &mut stack) {
            debug!("[Traversal] Start cell ({}, {}) is not sweepable", START.x, START.y);
        }

        while let Some(branch) = stack.last_mut() {
            if self.is_cancelled() {
                break;
            }

            if branch.next < Direction::ALL.len() {
                let direction = Direction::ALL[branch.next];
                branch.next += 1;
                let from = branch.pos;
                if let Some(target) = from.step(direction) {
                    self.enter(state, target, direction, &mut stack);
                }
            } else {
                let done = branch.pos;
                stack.pop();
                // Show where the branch ended before backing out of it.
                self.render(state, done);
            }
        }

        let outcome = SweepOutcome {
            run_id,
            cleaned: state.cleaned,
            elapsed: self.scheduler.elapsed(),
            cancelled: self.is_cancelled(),
        };
        info!(
            "[Traversal] Sweep {}: run_id={} cleaned={} coverage={:?} elapsed={:.1}s",
            if outcome.cancelled { "cancelled" } else { "finished" },
            run_id,
            outcome.cleaned,
            state.coverage_percent(),
            outcome.elapsed.as_secs_f64()
        );
        outcome
    }

    /// Clean `pos` if it is in bounds and unvisited, then run one tick.
    /// Anything else (off the grid, obstacle, already cleaned) is a no-op.
    fn enter(
        &mut self,
        state: &mut SimulationState,
        pos: Position,
        direction: Direction,
        stack: &mut Vec<Branch>,
    ) -> bool {
        if self.is_cancelled() || !state.grid.is_unvisited(pos) {
            return false;
        }

        // `is_unvisited` implies the cell is in bounds.
        let _ = state.grid.set_status(pos.x, pos.y, direction.entry_tag());
        state.cleaned += 1;
        debug!(
            "[Traversal] Cleaned ({}, {}) moving {:?}, total={}",
            pos.x, pos.y, direction, state.cleaned
        );

        self.render(state, pos);
        self.scheduler.wait(self.tick_delay);
        step_obstacles(&mut state.grid, &mut state.obstacles, &mut *self.random);
        state.grid.settle();

        stack.push(Branch { pos, next: 0 });
        true
    }

    fn render(&mut self, state: &SimulationState, robot: Position) {
        let frame = Frame {
            grid: &state.grid,
            obstacles: &state.obstacles,
            robot,
            cleaned: state.cleaned,
            elapsed: self.scheduler.elapsed(),
        };
        self.renderer.render(&frame);
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
