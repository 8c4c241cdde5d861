//! Injectable source of the two random decisions the simulation makes.

use std::collections::VecDeque;

use rand::Rng;

use crate::config::sim::MOBILE_PROBABILITY;
use crate::sim::types::Direction;

pub trait RandomSource {
    /// Coin flip made once when an obstacle is placed.
    fn promote_to_mobile(&mut self) -> bool;

    /// Uniform pick among right, down, left and up.
    fn pick_direction(&mut self) -> Direction;
}

impl<R: Rng> RandomSource for R {
    fn promote_to_mobile(&mut self) -> bool {
        self.random_bool(MOBILE_PROBABILITY)
    }

    fn pick_direction(&mut self) -> Direction {
        Direction::ALL[self.random_range(0..Direction::ALL.len())]
    }
}

/// Replays fixed decisions in order.
/// Once a script runs dry it answers "stay static" and `Direction::Right`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    promotions: VecDeque<bool>,
    directions: VecDeque<Direction>,
}

impl ScriptedRandom {
    pub fn new(
        promotions: impl IntoIterator<Item = bool>,
        directions: impl IntoIterator<Item = Direction>,
    ) -> Self {
        Self {
            promotions: promotions.into_iter().collect(),
            directions: directions.into_iter().collect(),
        }
    }

    /// Never promotes, never scripted to move anywhere but right.
    pub fn all_static() -> Self {
        Self::default()
    }
}

impl RandomSource for ScriptedRandom {
    fn promote_to_mobile(&mut self) -> bool {
        self.promotions.pop_front().unwrap_or(false)
    }

    fn pick_direction(&mut self) -> Direction {
        self.directions.pop_front().unwrap_or(Direction::Right)
    }
}
