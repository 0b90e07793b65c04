//! Grid coordinates and facings.
//!
//! ## Frames
//!
//! Each side sees the battlefield from its own end: the two boards are
//! the same grid rotated by 180 degrees. `Position::rotate` converts a
//! coordinate between the two frames and `Direction::backward` converts a
//! facing. Both are involutions.
//!
//! ```
//! use ace_fighter::core::{Direction, Position};
//!
//! let p = Position::new(2, 7);
//! assert_eq!(p.rotate(10, 10), Position::new(7, 2));
//! assert_eq!(p.rotate(10, 10).rotate(10, 10), p);
//! assert_eq!(Direction::Up.backward(), Direction::Down);
//! ```

use serde::{Deserialize, Serialize};

/// Integer cell coordinate. `y` grows downwards, towards the viewer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Sentinel for pieces that have not been placed on a board yet.
    pub const UNPLACED: Position = Position { x: -1, y: -1 };

    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[must_use]
    pub const fn add(self, other: Position) -> Self {
        self.add_times(other, 1)
    }

    /// `self + other * times`.
    #[must_use]
    pub const fn add_times(self, other: Position, times: i32) -> Self {
        Self::new(self.x + other.x * times, self.y + other.y * times)
    }

    /// Component-wise difference.
    #[must_use]
    pub const fn sub(self, other: Position) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Dot product, treating both positions as vectors.
    #[must_use]
    pub const fn dot(self, other: Position) -> i32 {
        self.x * other.x + self.y * other.y
    }

    /// True outside `[0, width) x [0, height)`.
    #[must_use]
    pub const fn is_out_of_bound(self, width: i32, height: i32) -> bool {
        self.x < 0 || self.x >= width || self.y < 0 || self.y >= height
    }

    /// Manhattan distance.
    #[must_use]
    pub const fn distance(self, other: Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Manhattan distance to `target`, minus a 0.1 bonus when stepping
    /// along `direction` would bring a piece standing here closer to it.
    ///
    /// The bonus is below the gap between two Manhattan distances, so it
    /// only orders candidates that are otherwise tied. Facing straight
    /// away from the target earns nothing, so AI tie-breaks differ from a
    /// rule that rewards any facing along the target's axis.
    ///
    /// ```
    /// use ace_fighter::core::{Direction, Position};
    ///
    /// let target = Position::new(5, 0);
    /// let facing = Position::new(5, 4).heading_distance(target, Direction::Up);
    /// let away = Position::new(5, 4).heading_distance(target, Direction::Down);
    /// assert!(facing < away);
    /// assert!(away < Position::new(5, 5).heading_distance(target, Direction::Up));
    /// ```
    #[must_use]
    pub fn heading_distance(self, target: Position, direction: Direction) -> f64 {
        let raw = f64::from(self.distance(target));
        if target.sub(self).dot(direction.delta()) > 0 {
            raw - HEADING_BONUS
        } else {
            raw
        }
    }

    /// Point reflection through the board centre (the 180 degree turn
    /// between the two players' frames).
    #[must_use]
    pub const fn rotate(self, width: i32, height: i32) -> Self {
        Self::new(width - self.x - 1, height - self.y - 1)
    }
}

const HEADING_BONUS: f64 = 0.1;

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal facing, relative to the viewing side's frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step for this facing.
    #[must_use]
    pub const fn delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Down => Position::new(0, 1),
            Direction::Left => Position::new(-1, 0),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Quarter turn counter-clockwise.
    #[must_use]
    pub const fn left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Down,
            Direction::Right => Direction::Up,
        }
    }

    /// Quarter turn clockwise.
    #[must_use]
    pub const fn right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Right => Direction::Down,
        }
    }

    /// Half turn. Also maps a facing into the opponent's frame.
    #[must_use]
    pub const fn backward(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Left => "←",
            Direction::Right => "→",
        };
        f.write_str(arrow)
    }
}
