use serde::Serialize;

/// A 1-indexed grid coordinate: `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring coordinate one step in `direction`.
    /// Returns `None` when the step would leave the non-negative quadrant.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

/// One of the four grid moves.
///
/// `ALL` lists them in sweep priority: right, down, left, up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    /// Row and column delta of a single step.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }

    /// Tag left on a cell reached by moving in this direction.
    /// Moving right means the cell was entered from its left side.
    pub fn entry_tag(self) -> CellStatus {
        match self {
            Direction::Right => CellStatus::EnteredFromLeft,
            Direction::Down => CellStatus::EnteredFromAbove,
            Direction::Left => CellStatus::EnteredFromRight,
            Direction::Up => CellStatus::EnteredFromBelow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStatus {
    Unvisited,
    Obstacle,
    Visited,
    EnteredFromLeft,
    EnteredFromAbove,
    EnteredFromRight,
    EnteredFromBelow,
}

impl CellStatus {
    /// Direction tags only exist for display; they count as visited.
    pub fn is_entry_tag(self) -> bool {
        matches!(
            self,
            CellStatus::EnteredFromLeft
                | CellStatus::EnteredFromAbove
                | CellStatus::EnteredFromRight
                | CellStatus::EnteredFromBelow
        )
    }

    pub fn is_visited(self) -> bool {
        self == CellStatus::Visited || self.is_entry_tag()
    }
}

/// An obstacle that relocates during a sweep.
/// `origin` is where it was placed, `pos` where it currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MobileObstacle {
    pub origin: Position,
    pub pos: Position,
}

impl MobileObstacle {
    pub fn new(pos: Position) -> Self {
        Self { origin: pos, pos }
    }
}
