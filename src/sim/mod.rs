//! Simulation core.
//!
//! The grid and its obstacles live in `SimulationState`; `systems` holds the
//! sweep, obstacle motion and rendering; `persistence` reads and writes map files.

pub mod types;
pub mod random;
pub mod schedule;
pub mod state;
pub mod persistence;

pub mod entities;
pub mod grid;
pub mod systems;


pub use state::{RunReport, SimulationState, Snapshot};
pub use types::{CellStatus, Direction, Position};
