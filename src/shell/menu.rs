use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use log::{info, warn};

use crate::config::SimConfig;
use crate::config::sim::MAP_FILE_EXTENSION;
use crate::sim::entities::Placement;
use crate::sim::grid::validate_dimensions;
use crate::sim::persistence;
use crate::sim::random::RandomSource;
use crate::sim::schedule::Scheduler;
use crate::sim::state::SimulationState;
use crate::sim::systems::{CoverageTraversal, TerminalRenderer};
use crate::sim::types::Position;

const MENU: &str = "\
===== Main Menu =====
| 1. Set map size   |
| 2. Add obstacles  |
| 3. Start cleaning |
| 4. Save map       |
| 5. Load map       |
| 6. Exit           |
---------------------
 Choose an option: ";

/// Menu-driven session over one `SimulationState`.
pub struct Shell<I, O, S, R> {
    input: I,
    out: O,
    pending: VecDeque<String>,
    state: SimulationState,
    config: SimConfig,
    scheduler: S,
    random: R,
}

impl<I, O, S, R> Shell<I, O, S, R>
where
    I: BufRead,
    O: Write,
    S: Scheduler,
    R: RandomSource,
{
    pub fn new(input: I, out: O, config: SimConfig, scheduler: S, random: R) -> Self {
        Self {
            input,
            out,
            pending: VecDeque::new(),
            state: SimulationState::new(),
            config,
            scheduler,
            random,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn into_output(self) -> O {
        self.out
    }

    /// Show the menu until the user exits or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.clear()?;
            write!(self.out, "{}", MENU)?;
            self.out.flush()?;

            let Some(choice) = self.next_token()? else {
                info!("[Shell] Input closed, exiting");
                return Ok(());
            };

            match choice.parse::<u32>() {
                Ok(1) => self.set_dimensions()?,
                Ok(2) => self.add_obstacles()?,
                Ok(3) => self.start_cleaning()?,
                Ok(4) => self.save_map()?,
                Ok(5) => self.load_map()?,
                Ok(6) => return Ok(()),
                _ => {
                    warn!("[Shell] Invalid menu choice `{}`", choice);
                    self.pending.clear();
                    writeln!(self.out, "Invalid option.")?;
                    self.scheduler.wait(self.config.invalid_choice_delay);
                }
            }
        }
    }

    fn set_dimensions(&mut self) -> io::Result<()> {
        write!(self.out, "Enter map size (rows cols): ")?;
        self.out.flush()?;
        let (Some(rows), Some(cols)) = (self.next_number::<i64>()?, self.next_number::<i64>()?) else {
            writeln!(self.out, "Map size must be two whole numbers.")?;
            return self.pause();
        };

        let result = validate_dimensions(rows, cols).and_then(|(rows, cols)| self.state.configure(rows, cols));
        if let Err(err) = result {
            writeln!(self.out, "{}", err)?;
            return self.pause();
        }
        Ok(())
    }

    fn add_obstacles(&mut self) -> io::Result<()> {
        if !self.require_dimensions()? {
            return Ok(());
        }
        write!(self.out, "Number of obstacles: ")?;
        self.out.flush()?;
        let Some(count) = self.next_number::<usize>()? else {
            writeln!(self.out, "The number of obstacles must be a whole number.")?;
            return self.pause();
        };

        let (rows, cols) = (self.state.grid.rows(), self.state.grid.cols());
        for _ in 0..count {
            write!(self.out, "Coordinates (x y, range 1-{} 1-{}): ", rows, cols)?;
            self.out.flush()?;
            let (x, y) = (self.next_token()?, self.next_token()?);
            let (Some(x), Some(y)) = (x, y) else {
                break;
            };
            let parsed = x.parse::<usize>().ok().zip(y.parse::<usize>().ok());
            let Some((x, y)) = parsed else {
                writeln!(self.out, "({}, {}) is not a grid cell, skipped.", x, y)?;
                continue;
            };
            match self.state.add_obstacle(Position::new(x, y), &mut self.random) {
                Ok(Placement::Placed { .. }) => {}
                Ok(Placement::AlreadyBlocked) => {
                    writeln!(self.out, "Cell ({}, {}) is already blocked.", x, y)?;
                }
                Err(err) => writeln!(self.out, "{}, skipped.", err)?,
            }
        }
        Ok(())
    }

    fn start_cleaning(&mut self) -> io::Result<()> {
        if !self.require_dimensions()? {
            return Ok(());
        }
        self.state.prepare_run();

        let outcome = {
            let mut renderer = TerminalRenderer::new(&mut self.out, self.config.clear_screen);
            CoverageTraversal::new(&mut renderer, &mut self.scheduler, &mut self.random)
                .with_tick_delay(self.config.tick_delay)
                .run(&mut self.state)
        };
        writeln!(
            self.out,
            "\nCleaning finished! Total time: {:.1}s",
            outcome.elapsed.as_secs_f64()
        )?;

        if let Some(path) = &self.config.report_path {
            if let Err(err) = self.state.report(&outcome).write_to(path) {
                writeln!(self.out, "{}", err)?;
            }
        }

        writeln!(self.out, "Press Enter to return to the menu.")?;
        self.out.flush()?;
        self.pending.clear();
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }

    fn save_map(&mut self) -> io::Result<()> {
        if !self.require_dimensions()? {
            return Ok(());
        }
        write!(self.out, "Save as (file name): ")?;
        self.out.flush()?;
        let Some(path) = self.next_map_path()? else {
            return Ok(());
        };
        match persistence::save(&self.state, &path) {
            Ok(()) => writeln!(self.out, "Map saved to {}", path.display())?,
            Err(err) => writeln!(self.out, "{}", err)?,
        }
        Ok(())
    }

    fn load_map(&mut self) -> io::Result<()> {
        write!(self.out, "Load from (file name): ")?;
        self.out.flush()?;
        let Some(path) = self.next_map_path()? else {
            return Ok(());
        };
        match persistence::load(&mut self.state, &path) {
            Ok(_) => writeln!(self.out, "Map loaded from {}", path.display())?,
            Err(err) => writeln!(self.out, "{}", err)?,
        }
        Ok(())
    }

    /// Print a reminder and pause when no map size has been set yet.
    fn require_dimensions(&mut self) -> io::Result<bool> {
        if self.state.is_configured() {
            return Ok(true);
        }
        writeln!(self.out, "Please set the map size first!")?;
        self.pause()?;
        Ok(false)
    }

    fn pause(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.scheduler.wait(self.config.invalid_choice_delay);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.config.clear_screen {
            write!(self.out, "\x1b[2J\x1b[H")?;
        }
        Ok(())
    }

    fn next_map_path(&mut self) -> io::Result<Option<PathBuf>> {
        Ok(self
            .next_token()?
            .map(|name| PathBuf::from(format!("{}.{}", name, MAP_FILE_EXTENSION))))
    }

    /// Next answer parsed as a number. `None` when it does not parse or input ended.
    fn next_number<T: std::str::FromStr>(&mut self) -> io::Result<Option<T>> {
        Ok(self.next_token()?.and_then(|token| token.parse::<T>().ok()))
    }

    /// Next whitespace-separated token, reading more lines as needed.
    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending.extend(line.split_whitespace().map(str::to_owned));
        }
        Ok(self.pending.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;
    use crate::sim::schedule::VirtualScheduler;
    use crate::sim::types::CellStatus;
    use std::io::Cursor;
    use std::time::Duration;

    fn quiet_config() -> SimConfig {
        SimConfig {
            tick_delay: Duration::from_millis(500),
            clear_screen: false,
            ..SimConfig::default()
        }
    }

    fn run_script(script: &str) -> (String, SimulationState, usize) {
        let mut shell = Shell::new(
            Cursor::new(script.to_owned()),
            Vec::new(),
            quiet_config(),
            VirtualScheduler::new(),
            ScriptedRandom::all_static(),
        );
        shell.run().unwrap();
        let state = shell.state().clone();
        let waits = shell.scheduler().waits();
        (String::from_utf8(shell.into_output()).unwrap(), state, waits)
    }

    #[test]
    fn test_full_session() {
        let (out, state, waits) = run_script("1\n3 3\n2\n1\n2 2\n3\n\n6\n");

        assert!(out.contains("Coverage: 100.0%"));
        assert!(out.contains("Cleaning finished! Total time: 4.0s"));
        assert_eq!(state.cleaned(), 8);
        assert_eq!(state.grid.status_at(2, 2).unwrap(), CellStatus::Obstacle);
        assert_eq!(waits, 8);
    }

    #[test]
    fn test_requires_dimensions_first() {
        let (out, state, waits) = run_script("2\n3\n4\n6\n");

        assert_eq!(out.matches("Please set the map size first!").count(), 3);
        assert!(!state.is_configured());
        assert_eq!(waits, 3);
    }

    #[test]
    fn test_invalid_choice_waits() {
        let (out, _, waits) = run_script("9\nabc\n6\n");
        assert_eq!(out.matches("Invalid option.").count(), 2);
        assert_eq!(waits, 2);
    }

    #[test]
    fn test_bad_dimensions_are_reported() {
        let (out, state, _) = run_script("1\n0 5\n1\n4 60\n6\n");
        assert_eq!(out.matches("invalid grid dimension").count(), 2);
        assert!(!state.is_configured());
    }

    #[test]
    fn test_out_of_range_obstacles_skipped() {
        let (out, state, _) = run_script("1\n2 2\n2\n3\n5 5\n1 2\n-1 1\n6\n");
        assert!(out.contains("obstacle (5, 5) is outside the 2x2 grid, skipped."));
        assert!(out.contains("(-1, 1) is not a grid cell, skipped."));
        assert_eq!(state.obstacles.statics(), &[Position::new(1, 2)]);
    }

    #[test]
    fn test_save_then_load_through_menu() {
        let temp = tempfile::tempdir().expect("tempdir");
        let name = temp.path().join("kitchen");
        let name = name.display();
        let script = format!("1\n4 5\n2\n2\n1 5\n3 3\n4\n{name}\n1\n2 2\n5\n{name}\n6\n");

        let (out, state, _) = run_script(&script);

        assert!(out.contains("Map saved to"));
        assert!(out.contains("Map loaded from"));
        assert!(temp.path().join("kitchen.lbzsmap").exists());
        assert_eq!((state.grid.rows(), state.grid.cols()), (4, 5));
        assert_eq!(state.obstacles.static_count(), 2);
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_, state, _) = run_script("1\n2 2\n");
        assert!(state.is_configured());
    }

    #[test]
    fn test_blocked_cell_is_reported() {
        let (out, state, _) = run_script("1\n2 2\n2\n2\n1 2\n1 2\n6\n");
        assert!(out.contains("Cell (1, 2) is already blocked."));
        assert_eq!(state.obstacles.static_count(), 1);
    }
}
