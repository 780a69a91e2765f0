//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifies a host surface that drives a game loop with frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceId(pub Uuid);

impl SurfaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SurfaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D position on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Apply toroidal wrapping for given field dimensions
    pub fn wrap(&self, columns: i32, rows: i32) -> Self {
        Self {
            x: self.x.rem_euclid(columns),
            y: self.y.rem_euclid(rows),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// State of a single field cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Unmarked,
    Marked,
}

impl Cell {
    pub fn flipped(self) -> Self {
        match self {
            Cell::Unmarked => Cell::Marked,
            Cell::Marked => Cell::Unmarked,
        }
    }

    pub fn is_marked(self) -> bool {
        self == Cell::Marked
    }
}

/// Heading of the ant.
///
/// `None` is the inert sentinel an ant carries before it is started. It has no
/// movement delta and does not rotate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Rotate 90° counter-clockwise: Left, Down, Right, Up, Left.
    pub fn turned_left(&self) -> Self {
        match self {
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
            Direction::Up => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    /// Rotate 90° clockwise: Left, Up, Right, Down, Left.
    pub fn turned_right(&self) -> Self {
        match self {
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::None => Direction::None,
        }
    }

    pub fn is_cardinal(&self) -> bool {
        *self != Direction::None
    }

    pub fn cardinals() -> [Direction; 4] {
        [
            Direction::Left,
            Direction::Right,
            Direction::Up,
            Direction::Down,
        ]
    }
}

/// Position and heading of the ant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AntState {
    pub position: Position,
    pub direction: Direction,
}

impl AntState {
    pub fn new(position: Position, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }
}

/// A cell that now reads `cell`; consumed by renderers to update visuals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellChange {
    pub position: Position,
    pub cell: Cell,
}

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
    Paused,
}

impl RunState {
    /// True once started and until reset, including while paused
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running | RunState::Paused)
    }

    pub fn is_paused(&self) -> bool {
        *self == RunState::Paused
    }

    /// Whether frames should advance the simulation
    pub fn is_stepping(&self) -> bool {
        *self == RunState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_wrap() {
        let pos = Position::new(2, 3);
        assert_eq!(pos.wrap(5, 5), Position::new(2, 3));

        let pos = Position::new(-1, -1);
        assert_eq!(pos.wrap(5, 4), Position::new(4, 3));

        let pos = Position::new(5, 4);
        assert_eq!(pos.wrap(5, 4), Position::new(0, 0));

        // Start offsets may reach further than one step
        let pos = Position::new(-8, 45);
        assert_eq!(pos.wrap(4, 4), Position::new(0, 1));
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
        assert_eq!(Direction::None.delta(), (0, 0));
    }

    #[test]
    fn test_turn_tables() {
        assert_eq!(Direction::Left.turned_left(), Direction::Down);
        assert_eq!(Direction::Down.turned_left(), Direction::Right);
        assert_eq!(Direction::Right.turned_left(), Direction::Up);
        assert_eq!(Direction::Up.turned_left(), Direction::Left);

        assert_eq!(Direction::Left.turned_right(), Direction::Up);
        assert_eq!(Direction::Up.turned_right(), Direction::Right);
        assert_eq!(Direction::Right.turned_right(), Direction::Down);
        assert_eq!(Direction::Down.turned_right(), Direction::Left);
    }

    #[test]
    fn test_none_does_not_rotate() {
        assert_eq!(Direction::None.turned_left(), Direction::None);
        assert_eq!(Direction::None.turned_right(), Direction::None);
        assert!(!Direction::None.is_cardinal());
    }

    #[test]
    fn test_turns_are_cyclic() {
        for dir in Direction::cardinals() {
            let mut left = dir;
            let mut right = dir;
            for _ in 0..4 {
                left = left.turned_left();
                right = right.turned_right();
            }
            assert_eq!(left, dir);
            assert_eq!(right, dir);
            assert_eq!(dir.turned_left().turned_right(), dir);
        }
    }

    #[test]
    fn test_cell_flip() {
        assert_eq!(Cell::default(), Cell::Unmarked);
        assert_eq!(Cell::Unmarked.flipped(), Cell::Marked);
        assert_eq!(Cell::Marked.flipped(), Cell::Unmarked);
    }

    #[test]
    fn test_run_state_flags() {
        assert!(!RunState::Stopped.is_running());
        assert!(RunState::Running.is_running());
        assert!(RunState::Paused.is_running());
        assert!(RunState::Paused.is_paused());
        assert!(RunState::Running.is_stepping());
        assert!(!RunState::Paused.is_stepping());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn wrap_lands_inside_field(x in -10_000i32..10_000, y in -10_000i32..10_000, columns in 1i32..200, rows in 1i32..200) {
                let wrapped = Position::new(x, y).wrap(columns, rows);
                prop_assert!((0..columns).contains(&wrapped.x));
                prop_assert!((0..rows).contains(&wrapped.y));
                prop_assert_eq!((wrapped.x - x).rem_euclid(columns), 0);
                prop_assert_eq!((wrapped.y - y).rem_euclid(rows), 0);
            }
        }
    }
}
