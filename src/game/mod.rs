//! # Game Module
//!
//! Core game state management and the interaction engine.
//!
//! This module contains the fundamental building blocks of Oubliette:
//! - Grid and tile representation
//! - Game state management and persistence helpers
//! - The intent/event interaction engine

pub mod engine;
pub mod state;

pub use engine::*;
pub use state::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate in the game world.
///
/// `x` is the column and `y` is the row, both 0-indexed from the top-left
/// corner of the grid.
///
/// # Examples
///
/// ```
/// use oubliette::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the 4 cardinal adjacent positions in scan order
    /// (North, South, East, West).
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        Direction::cardinal()
            .into_iter()
            .map(|direction| self + direction.to_delta())
            .collect()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Directions for movement and adjacency scans.
///
/// The dungeon is strictly 4-connected; there is no diagonal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use oubliette::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns the 4 cardinal directions in scan order (N, S, E, W).
    ///
    /// This order is load-bearing: `interact` probes adjacent doors in
    /// exactly this sequence and acts on the first match.
    pub fn cardinal() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }

    /// Lowercase name for logging and narration context.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

/// The semantic type of a single grid cell.
///
/// Exactly one kind per cell. Consumable kinds (Key, Door, Monster,
/// Treasure) are replaced by `Floor` once used up; `Start` and `End` are
/// permanent landmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    Start,
    End,
    Door,
    Key,
    Monster,
    Treasure,
}

impl TileKind {
    /// Single-character wire code for this tile kind.
    pub fn to_char(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::Start => 'S',
            TileKind::End => 'E',
            TileKind::Door => 'D',
            TileKind::Key => 'K',
            TileKind::Monster => 'M',
            TileKind::Treasure => 'T',
        }
    }

    /// Parses a wire code back into a tile kind.
    ///
    /// Returns `None` for unknown characters; the layout parser handles the
    /// `@` player marker separately.
    pub fn from_char(c: char) -> Option<TileKind> {
        match c {
            '#' => Some(TileKind::Wall),
            '.' => Some(TileKind::Floor),
            'S' => Some(TileKind::Start),
            'E' => Some(TileKind::End),
            'D' => Some(TileKind::Door),
            'K' => Some(TileKind::Key),
            'M' => Some(TileKind::Monster),
            'T' => Some(TileKind::Treasure),
            _ => None,
        }
    }

    /// Whether this cell participates in the walkable connected component.
    ///
    /// Everything except solid wall counts: doors, monsters, and items all
    /// sit on carved cells and resolve to floor once consumed.
    pub fn is_passable(self) -> bool {
        self != TileKind::Wall
    }
}

/// Lifecycle state of a game.
///
/// Transitions only ever leave `Playing`; a terminal state is exited solely
/// by a full reset, which replaces the whole game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is still in progress
    Playing,
    /// Player reached the exit
    Won,
    /// Player ran out of health
    Lost,
}

impl GameStatus {
    /// Checks whether the game has ended.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }
}
