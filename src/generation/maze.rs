//! # Maze Carving
//!
//! Randomized backtracking maze generation with item placement.
//!
//! The carver produces a perfect maze (a spanning tree over the
//! even-coordinate cell lattice), so every carved cell is reachable from the
//! start before any item is placed. Items then overwrite floor cells drawn
//! without replacement, which keeps placements distinct and makes pool
//! exhaustion an immediate error instead of an infinite retry loop.

use crate::{
    generation::utils, Direction, GenerationConfig, Generator, Grid, MazeBlueprint,
    OublietteError, OublietteResult, Position, TileKind,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Maze generator using randomized backtracking.
///
/// # Examples
///
/// ```
/// use oubliette::{BacktrackingCarver, GenerationConfig, Generator};
/// use oubliette::generation::utils;
///
/// let config = GenerationConfig::for_testing(7);
/// let mut rng = utils::create_rng(&config);
/// let carver = BacktrackingCarver::new();
///
/// let blueprint = carver.generate(&config, &mut rng).unwrap();
/// assert_eq!(blueprint.grid.width, 9);
/// carver.validate(&blueprint, &config).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct BacktrackingCarver;

impl BacktrackingCarver {
    /// Creates a new carver.
    pub fn new() -> Self {
        Self
    }

    /// Whether a position lies strictly inside the outer wall ring.
    fn in_interior(grid: &Grid, pos: Position) -> bool {
        pos.x > 0
            && pos.y > 0
            && pos.x < grid.width as i32 - 1
            && pos.y < grid.height as i32 - 1
    }

    /// Carves corridors from `start` using an explicit work stack.
    ///
    /// From the cell on top of the stack, a random unvisited cell two steps
    /// away is opened along with the wall between them; when no such cell
    /// remains the stack pops, backtracking to the previous junction.
    fn carve_passages(
        &self,
        grid: &mut Grid,
        start: Position,
        rng: &mut StdRng,
    ) -> OublietteResult<()> {
        let mut stack = vec![start];

        while let Some(&current) = stack.last() {
            let mut directions = Direction::cardinal();
            directions.shuffle(rng);

            let mut advanced = false;
            for direction in directions {
                let delta = direction.to_delta();
                let target = Position::new(current.x + delta.x * 2, current.y + delta.y * 2);

                if Self::in_interior(grid, target) && grid.get(target) == Some(TileKind::Wall) {
                    grid.set(current + delta, TileKind::Floor)?;
                    grid.set(target, TileKind::Floor)?;
                    stack.push(target);
                    advanced = true;
                    break;
                }
            }

            if !advanced {
                stack.pop();
            }
        }

        Ok(())
    }

    /// Places one item on a floor cell drawn without replacement.
    fn place_item(
        grid: &mut Grid,
        pool: &mut Vec<Position>,
        kind: TileKind,
        rng: &mut StdRng,
    ) -> OublietteResult<Position> {
        if pool.is_empty() {
            return Err(OublietteError::GenerationFailed(format!(
                "no free floor cells left to place {:?}",
                kind
            )));
        }
        let index = rng.gen_range(0..pool.len());
        let pos = pool.swap_remove(index);
        grid.set(pos, kind)?;
        debug!("placed {:?} at ({}, {})", kind, pos.x, pos.y);
        Ok(pos)
    }
}

impl Generator<MazeBlueprint> for BacktrackingCarver {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> OublietteResult<MazeBlueprint> {
        config.validate()?;

        let mut grid = Grid::filled(config.width, config.height, TileKind::Wall);
        let start = Position::new(1, 1);
        grid.set(start, TileKind::Start)?;

        self.carve_passages(&mut grid, start, rng)?;

        // The start cell holds TileKind::Start, so it is never in the pool
        // and no item can land on it.
        let mut pool = grid.positions_of(TileKind::Floor);
        let floor_cells = pool.len();

        Self::place_item(&mut grid, &mut pool, TileKind::Key, rng)?;
        Self::place_item(&mut grid, &mut pool, TileKind::Door, rng)?;
        Self::place_item(&mut grid, &mut pool, TileKind::End, rng)?;

        let monsters = (0..config.monster_count())
            .map(|_| Self::place_item(&mut grid, &mut pool, TileKind::Monster, rng))
            .collect::<OublietteResult<Vec<Position>>>()?;

        let treasures = (0..config.treasure_count())
            .map(|_| Self::place_item(&mut grid, &mut pool, TileKind::Treasure, rng))
            .collect::<OublietteResult<Vec<Position>>>()?;

        info!(
            "carved {}x{} maze: {} floor cells, {} monsters, {} treasures",
            config.width,
            config.height,
            floor_cells,
            monsters.len(),
            treasures.len()
        );

        Ok(MazeBlueprint {
            grid,
            start,
            monsters,
            treasures,
        })
    }

    fn validate(
        &self,
        blueprint: &MazeBlueprint,
        config: &GenerationConfig,
    ) -> OublietteResult<()> {
        let grid = &blueprint.grid;

        if grid.width != config.width || grid.height != config.height {
            return Err(OublietteError::GenerationFailed(format!(
                "grid is {}x{}, config requested {}x{}",
                grid.width, grid.height, config.width, config.height
            )));
        }

        if grid.get(blueprint.start) != Some(TileKind::Start) {
            return Err(OublietteError::GenerationFailed(
                "start cell was overwritten".to_string(),
            ));
        }

        // Connectivity invariant: every passable cell is reachable from the
        // start through 4-directional adjacency.
        let reached = utils::reachable_from(grid, blueprint.start);
        for y in 0..grid.height as i32 {
            for x in 0..grid.width as i32 {
                let pos = Position::new(x, y);
                let passable = grid
                    .get(pos)
                    .map(TileKind::is_passable)
                    .unwrap_or(false);
                if passable && !reached.contains(&pos) {
                    return Err(OublietteError::GenerationFailed(format!(
                        "cell ({}, {}) is carved but unreachable from start",
                        x, y
                    )));
                }
            }
        }

        for (kind, expected) in [
            (TileKind::Key, 1),
            (TileKind::Door, 1),
            (TileKind::End, 1),
            (TileKind::Monster, blueprint.monsters.len()),
            (TileKind::Treasure, blueprint.treasures.len()),
        ] {
            let found = grid.positions_of(kind).len();
            if found != expected {
                return Err(OublietteError::GenerationFailed(format!(
                    "expected {} {:?} tiles, found {}",
                    expected, kind, found
                )));
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "BacktrackingCarver"
    }
}
