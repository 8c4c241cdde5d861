//! Runtime settings for one simulator process.

use std::path::PathBuf;
use std::time::Duration;

use super::sim::{INVALID_CHOICE_DELAY_MS, TICK_DELAY_MS};

/// Settings chosen on the command line, with the `sim` constants as defaults.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Pause after every cleaned cell.
    pub tick_delay: Duration,
    /// Pause after an invalid menu choice.
    pub invalid_choice_delay: Duration,
    /// Fixed seed for obstacle promotion and motion. `None` draws from the OS.
    pub seed: Option<u64>,
    /// Where to write a JSON report after each sweep.
    pub report_path: Option<PathBuf>,
    /// Clear the terminal before every frame.
    pub clear_screen: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_delay: Duration::from_millis(TICK_DELAY_MS),
            invalid_choice_delay: Duration::from_millis(INVALID_CHOICE_DELAY_MS),
            seed: None,
            report_path: None,
            clear_screen: true,
        }
    }
}
