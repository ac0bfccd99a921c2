//! # Game State Module
//!
//! The grid and the central game state value.
//!
//! `GameState` is an explicit value owned by exactly one controller at a
//! time. The interaction engine mutates it through a narrow surface (player
//! movement, tile consumption, status changes) and a reset replaces the
//! value wholesale rather than patching it in place.

use crate::{GameStatus, MazeBlueprint, OublietteError, OublietteResult, Position, TileKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rectangular grid of tiles.
///
/// Row-major: `tiles[y][x]`. Every row has exactly `width` cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Tile rows, top to bottom
    pub tiles: Vec<Vec<TileKind>>,
}

impl Grid {
    /// Creates a grid filled with a single tile kind.
    pub fn filled(width: u32, height: u32, kind: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![vec![kind; width as usize]; height as usize],
        }
    }

    /// Checks if a position is within grid bounds.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Gets the tile kind at a position, or `None` out of bounds.
    pub fn get(&self, pos: Position) -> Option<TileKind> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Sets the tile kind at a position.
    pub fn set(&mut self, pos: Position, kind: TileKind) -> OublietteResult<()> {
        if !self.in_bounds(pos) {
            return Err(OublietteError::InvalidState(format!(
                "Position ({}, {}) is outside the {}x{} grid",
                pos.x, pos.y, self.width, self.height
            )));
        }
        self.tiles[pos.y as usize][pos.x as usize] = kind;
        Ok(())
    }

    /// Returns all positions holding the given tile kind, in row-major order.
    pub fn positions_of(&self, kind: TileKind) -> Vec<Position> {
        let mut positions = Vec::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if *tile == kind {
                    positions.push(Position::new(x as i32, y as i32));
                }
            }
        }
        positions
    }

    /// Serializes the grid as one string per row, one character per cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use oubliette::{Grid, TileKind};
    ///
    /// let grid = Grid::filled(3, 2, TileKind::Wall);
    /// assert_eq!(grid.render_rows(), vec!["###", "###"]);
    /// ```
    pub fn render_rows(&self) -> Vec<String> {
        self.tiles
            .iter()
            .map(|row| row.iter().map(|tile| tile.to_char()).collect())
            .collect()
    }

    /// Parses a textual layout into a grid.
    ///
    /// Accepts the standard tile codes plus `@` as "player standing on
    /// floor"; the player position, if marked, is returned alongside the
    /// grid. All rows must have equal length.
    pub fn parse(rows: &[&str]) -> OublietteResult<(Grid, Option<Position>)> {
        if rows.is_empty() {
            return Err(OublietteError::MalformedLayout("empty layout".to_string()));
        }

        let width = rows[0].chars().count();
        let mut tiles = Vec::with_capacity(rows.len());
        let mut player = None;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(OublietteError::MalformedLayout(format!(
                    "row {} has length {}, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }

            let mut parsed_row = Vec::with_capacity(width);
            for (x, c) in row.chars().enumerate() {
                if c == '@' {
                    player = Some(Position::new(x as i32, y as i32));
                    parsed_row.push(TileKind::Floor);
                    continue;
                }
                let kind = TileKind::from_char(c).ok_or_else(|| {
                    OublietteError::MalformedLayout(format!(
                        "unknown tile character '{}' at ({}, {})",
                        c, x, y
                    ))
                })?;
                parsed_row.push(kind);
            }
            tiles.push(parsed_row);
        }

        Ok((
            Grid {
                width: width as u32,
                height: rows.len() as u32,
                tiles,
            },
            player,
        ))
    }
}

/// Central game state containing the whole mutable world.
///
/// Created by the maze generator (or from a fixed layout) at game start and
/// on reset; mutated exclusively by the interaction engine while the status
/// is `Playing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// The dungeon grid
    pub grid: Grid,
    /// Current player position; never addresses a Wall cell
    pub player_pos: Position,
    /// Whether the key has been picked up this session
    pub has_key: bool,
    /// Remaining health
    pub health: u32,
    /// Lifecycle status
    pub status: GameStatus,
    /// Positions of monsters not yet fought
    pub monsters: HashSet<Position>,
    /// Positions of treasures not yet collected
    pub treasures: HashSet<Position>,
}

impl GameState {
    /// Creates a fresh game state from a generated maze blueprint.
    pub fn from_blueprint(blueprint: MazeBlueprint, health: u32) -> Self {
        Self {
            grid: blueprint.grid,
            player_pos: blueprint.start,
            has_key: false,
            health,
            status: GameStatus::Playing,
            monsters: blueprint.monsters.into_iter().collect(),
            treasures: blueprint.treasures.into_iter().collect(),
        }
    }

    /// Creates a game state from a textual layout.
    ///
    /// The player starts at the `@` marker if present, else on the Start
    /// tile, else at (1, 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use oubliette::{GameState, Position};
    ///
    /// let state = GameState::from_layout(&["#####", "#@.K#", "#####"], 3).unwrap();
    /// assert_eq!(state.player_pos, Position::new(1, 1));
    /// assert!(!state.has_key);
    /// ```
    pub fn from_layout(rows: &[&str], health: u32) -> OublietteResult<Self> {
        let (grid, marked_player) = Grid::parse(rows)?;

        let player_pos = marked_player
            .or_else(|| grid.positions_of(TileKind::Start).first().copied())
            .unwrap_or_else(|| Position::new(1, 1));

        match grid.get(player_pos) {
            Some(kind) if kind.is_passable() => {}
            _ => {
                return Err(OublietteError::MalformedLayout(format!(
                    "player start ({}, {}) is not a passable cell",
                    player_pos.x, player_pos.y
                )));
            }
        }

        let monsters = grid.positions_of(TileKind::Monster).into_iter().collect();
        let treasures = grid.positions_of(TileKind::Treasure).into_iter().collect();

        Ok(Self {
            grid,
            player_pos,
            has_key: false,
            health,
            status: GameStatus::Playing,
            monsters,
            treasures,
        })
    }

    /// Gets the tile kind at a position, or `None` out of bounds.
    pub fn tile_at(&self, pos: Position) -> Option<TileKind> {
        self.grid.get(pos)
    }

    /// Replaces a consumed tile (Key, Door, Monster, Treasure) with floor.
    ///
    /// This is the engine's only grid mutation.
    pub fn consume_tile(&mut self, pos: Position) -> OublietteResult<()> {
        self.grid.set(pos, TileKind::Floor)
    }

    /// Renders the grid with the player overlaid as `@`.
    pub fn render_rows(&self) -> Vec<String> {
        let mut rows = self.grid.render_rows();
        let y = self.player_pos.y as usize;
        let x = self.player_pos.x as usize;
        if let Some(row) = rows.get_mut(y) {
            row.replace_range(x..x + 1, "@");
        }
        rows
    }

    /// Checks if the game has ended.
    pub fn is_ended(&self) -> bool {
        self.status.is_terminal()
    }

    /// Saves the game state to JSON.
    pub fn save_to_json(&self) -> OublietteResult<String> {
        serde_json::to_string_pretty(self).map_err(OublietteError::from)
    }

    /// Loads game state from JSON.
    pub fn load_from_json(json: &str) -> OublietteResult<Self> {
        serde_json::from_str(json).map_err(OublietteError::from)
    }
}
