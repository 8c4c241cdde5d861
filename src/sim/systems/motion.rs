//! Mobile obstacle movement system.
//!
//! Runs once per cleaned cell. Each mobile obstacle picks a direction and
//! moves only into an in-bounds cell that is still unvisited; otherwise it
//! stays put for this tick.

use log::trace;

use crate::sim::entities::ObstacleRegistry;
use crate::sim::grid::GridState;
use crate::sim::random::RandomSource;
use crate::sim::types::CellStatus;

/// Advance every mobile obstacle by at most one cell.
/// Returns how many of them actually moved.
pub fn step_obstacles<R: RandomSource + ?Sized>(
    grid: &mut GridState,
    obstacles: &mut ObstacleRegistry,
    random: &mut R,
) -> usize {
    let mut moved = 0;

    for mobile in obstacles.mobiles_mut() {
        let direction = random.pick_direction();
        let Some(target) = mobile.pos.step(direction) else {
            continue;
        };
        if !grid.is_unvisited(target) {
            trace!("[Obstacles] ({}, {}) blocked towards {:?}", mobile.pos.x, mobile.pos.y, direction);
            continue;
        }

        // Both cells were checked in bounds above.
        let _ = grid.set_status(mobile.pos.x, mobile.pos.y, CellStatus::Unvisited);
        let _ = grid.set_status(target.x, target.y, CellStatus::Obstacle);
        trace!(
            "[Obstacles] ({}, {}) -> ({}, {})",
            mobile.pos.x, mobile.pos.y, target.x, target.y
        );
        mobile.pos = target;
        moved += 1;
    }

    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;
    use crate::sim::types::{Direction, Position};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn registry_with_mobile(grid: &mut GridState, at: Position) -> ObstacleRegistry {
        let mut obstacles = ObstacleRegistry::new();
        obstacles.add_static(grid, at, &mut ScriptedRandom::new([true], [])).unwrap();
        obstacles
    }

    #[test]
    fn test_moves_into_unvisited_cell() {
        let mut grid = GridState::new(3, 3).unwrap();
        let mut obstacles = registry_with_mobile(&mut grid, Position::new(2, 2));
        let mut random = ScriptedRandom::new([], [Direction::Down]);

        let moved = step_obstacles(&mut grid, &mut obstacles, &mut random);

        assert_eq!(moved, 1);
        assert_eq!(obstacles.mobiles()[0].pos, Position::new(3, 2));
        assert_eq!(grid.status_at(2, 2).unwrap(), CellStatus::Unvisited);
        assert_eq!(grid.status_at(3, 2).unwrap(), CellStatus::Obstacle);
    }

    #[test]
    fn test_blocked_by_boundary() {
        let mut grid = GridState::new(2, 2).unwrap();
        let mut obstacles = registry_with_mobile(&mut grid, Position::new(1, 1));
        let mut random = ScriptedRandom::new([], [Direction::Up, Direction::Left]);

        assert_eq!(step_obstacles(&mut grid, &mut obstacles, &mut random), 0);
        assert_eq!(step_obstacles(&mut grid, &mut obstacles, &mut random), 0);
        assert_eq!(obstacles.mobiles()[0].pos, Position::new(1, 1));
        assert_eq!(grid.status_at(1, 1).unwrap(), CellStatus::Obstacle);
    }

    #[test]
    fn test_blocked_by_visited_and_obstacle_cells() {
        let mut grid = GridState::new(1, 3).unwrap();
        let mut obstacles = registry_with_mobile(&mut grid, Position::new(1, 2));
        grid.set_status(1, 1, CellStatus::Visited).unwrap();
        grid.set_status(1, 3, CellStatus::EnteredFromLeft).unwrap();
        let mut random = ScriptedRandom::new([], [Direction::Left, Direction::Right]);

        assert_eq!(step_obstacles(&mut grid, &mut obstacles, &mut random), 0);
        assert_eq!(step_obstacles(&mut grid, &mut obstacles, &mut random), 0);
        assert_eq!(grid.status_at(1, 2).unwrap(), CellStatus::Obstacle);
    }

    #[test]
    fn test_mobile_cannot_enter_other_mobile() {
        let mut grid = GridState::new(1, 2).unwrap();
        let mut obstacles = ObstacleRegistry::new();
        let mut promote = ScriptedRandom::new([true, true], []);
        obstacles.add_static(&mut grid, Position::new(1, 1), &mut promote).unwrap();
        obstacles.add_static(&mut grid, Position::new(1, 2), &mut promote).unwrap();
        let mut random = ScriptedRandom::new([], [Direction::Right, Direction::Left]);

        assert_eq!(step_obstacles(&mut grid, &mut obstacles, &mut random), 0);
        assert_eq!(grid.count(|c| c == CellStatus::Obstacle), 2);
    }

    #[test]
    fn test_single_marker_per_mobile_after_many_steps() {
        let mut grid = GridState::new(6, 6).unwrap();
        let mut obstacles = ObstacleRegistry::new();
        let mut rng = StdRng::seed_from_u64(3);
        let mut promote = ScriptedRandom::new([true, false, true, true], []);
        for pos in [Position::new(1, 1), Position::new(3, 3), Position::new(5, 2), Position::new(6, 6)] {
            obstacles.add_static(&mut grid, pos, &mut promote).unwrap();
        }
        grid.set_status(4, 4, CellStatus::Visited).unwrap();

        for _ in 0..500 {
            step_obstacles(&mut grid, &mut obstacles, &mut rng);
        }

        let current = obstacles.current_positions();
        let marked: Vec<Position> = grid
            .cells()
            .filter(|(_, status)| *status == CellStatus::Obstacle)
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(marked, current);
        assert_eq!(grid.status_at(4, 4).unwrap(), CellStatus::Visited);
        assert_eq!(grid.status_at(3, 3).unwrap(), CellStatus::Obstacle);
    }
}
