//! Cleaning robot coverage simulator.
//!
//! A robot sweeps a rectangular grid depth-first from the top-left cell,
//! cleaning every reachable cell once while some obstacles wander around.

pub mod config;
pub mod error;
pub mod shell;
pub mod sim;

pub use error::{Result, SweepError};
