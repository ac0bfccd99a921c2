//! # Generation Module
//!
//! Procedural maze generation.
//!
//! Everything here is deterministic under a seed: the configuration carries
//! the seed, `utils::create_rng` turns it into the generator's random
//! source, and the same config always yields the same dungeon.

pub mod maze;

pub use maze::*;

use crate::{Grid, OublietteError, OublietteResult, Position, TileKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Configuration for maze generation.
///
/// Width and height must be odd and at least 5: the carver walks an
/// even-coordinate lattice with walls on the odd coordinates between cells,
/// which only tiles cleanly at odd dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Maze width in tiles (odd, >= 5)
    pub width: u32,
    /// Maze height in tiles (odd, >= 5)
    pub height: u32,
    /// One monster per this many grid cells
    pub monster_cell_divisor: u32,
    /// One treasure per this many grid cells
    pub treasure_cell_divisor: u32,
}

impl GenerationConfig {
    /// Creates a default-sized configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use oubliette::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.seed, 12345);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            width: crate::config::DEFAULT_MAZE_WIDTH,
            height: crate::config::DEFAULT_MAZE_HEIGHT,
            monster_cell_divisor: crate::config::MONSTER_CELL_DIVISOR,
            treasure_cell_divisor: crate::config::TREASURE_CELL_DIVISOR,
        }
    }

    /// Creates a configuration with explicit dimensions.
    pub fn with_dimensions(seed: u64, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::new(seed)
        }
    }

    /// Creates a configuration for testing with a small maze.
    pub fn for_testing(seed: u64) -> Self {
        Self::with_dimensions(seed, 9, 9)
    }

    /// Checks the dimension contract.
    pub fn validate(&self) -> OublietteResult<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value < 5 || value % 2 == 0 {
                return Err(OublietteError::GenerationFailed(format!(
                    "{} must be an odd integer >= 5, got {}",
                    name, value
                )));
            }
        }
        if self.monster_cell_divisor == 0 || self.treasure_cell_divisor == 0 {
            return Err(OublietteError::GenerationFailed(
                "cell divisors must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of monsters to place.
    pub fn monster_count(&self) -> usize {
        (self.width * self.height / self.monster_cell_divisor) as usize
    }

    /// Number of treasures to place.
    pub fn treasure_count(&self) -> usize {
        (self.width * self.height / self.treasure_cell_divisor) as usize
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Output of maze generation: the carved grid plus the placements the game
/// state needs to track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MazeBlueprint {
    /// The carved grid with all items placed
    pub grid: Grid,
    /// Player start position, always (1, 1)
    pub start: Position,
    /// Monster placements
    pub monsters: Vec<Position>,
    /// Treasure placements
    pub treasures: Vec<Position>,
}

/// Trait for procedural generators.
///
/// Generators are deterministic functions of the configuration and the
/// injected random source, so tests can pin exact outputs to a seed.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random source.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> OublietteResult<T>;

    /// Validates that the generated content meets its invariants.
    fn validate(&self, content: &T, config: &GenerationConfig) -> OublietteResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Flood-fills from `start` through passable cells, 4-directionally.
    ///
    /// Returns every reachable passable position including `start` itself.
    pub fn reachable_from(grid: &Grid, start: Position) -> HashSet<Position> {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        if grid.get(start).map(TileKind::is_passable).unwrap_or(false) {
            visited.insert(start);
            queue.push_back(start);
        }

        while let Some(pos) = queue.pop_front() {
            for adjacent in pos.cardinal_adjacent_positions() {
                if visited.contains(&adjacent) {
                    continue;
                }
                if let Some(tile) = grid.get(adjacent) {
                    if tile.is_passable() {
                        visited.insert(adjacent);
                        queue.push_back(adjacent);
                    }
                }
            }
        }

        visited
    }
}
