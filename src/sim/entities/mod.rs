//! Simulation entities module.
//!
//! Obstacles are the only entities sharing the grid with the robot.

pub mod obstacle;

pub use obstacle::*;
