/// Simulation configuration constants.
///
/// This module defines the grid limits, pacing delays and map file
/// naming used by the sweep and the shell.
pub const MAX_GRID_SIZE: usize = 50; // Largest accepted row or column count.

/// Delay (in milliseconds) after every cleaned cell, so the sweep can be followed on screen.
pub const TICK_DELAY_MS: u64 = 500;

/// Delay (in milliseconds) after an invalid menu choice.
pub const INVALID_CHOICE_DELAY_MS: u64 = 1000;

/// Probability that a newly placed obstacle also moves during a sweep.
pub const MOBILE_PROBABILITY: f64 = 0.5;

/// Suffix appended by the shell to every map file name.
pub const MAP_FILE_EXTENSION: &str = "lbzsmap";
