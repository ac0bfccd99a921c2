//! # Oubliette
//!
//! A narrated maze-escape game with procedural dungeon generation.
//!
//! ## Architecture Overview
//!
//! Oubliette keeps the game core small, deterministic, and free of any
//! platform dependency. The main pieces:
//!
//! - **Game State**: an explicit world value (grid, player, inventory,
//!   health, status) owned by exactly one controller at a time
//! - **Generation System**: seeded backtracking maze carver with item
//!   placement by sampling without replacement
//! - **Interaction Engine**: a pure transition table from player intents to
//!   state mutations plus narration events
//! - **Narration System**: symbolic events mapped to display text behind a
//!   trait, so hosts can swap in their own storyteller
//! - **I/O Ports**: command source and speaker traits; the core compiles and
//!   tests with both stubbed out
//!
//! ## Voice-style commands
//!
//! Commands arrive as free text ("go north", "open the door", "look
//! around") from whatever source the host wires up and are parsed into
//! intents by substring matching. The engine never sees raw text.

pub mod game;
pub mod generation;
pub mod input;
pub mod io;
pub mod narration;
pub mod session;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use io::*;
pub use narration::*;
pub use session::*;

/// Core error type for the Oubliette game engine.
#[derive(thiserror::Error, Debug)]
pub enum OublietteError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Map layout text could not be parsed
    #[error("Malformed layout: {0}")]
    MalformedLayout(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Oubliette codebase.
pub type OublietteResult<T> = Result<T, OublietteError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default maze width in tiles (must be odd)
    pub const DEFAULT_MAZE_WIDTH: u32 = 15;

    /// Default maze height in tiles (must be odd)
    pub const DEFAULT_MAZE_HEIGHT: u32 = 15;

    /// Default player starting health
    pub const DEFAULT_PLAYER_HEALTH: u32 = 3;

    /// One monster is placed per this many grid cells
    pub const MONSTER_CELL_DIVISOR: u32 = 50;

    /// One treasure is placed per this many grid cells
    pub const TREASURE_CELL_DIVISOR: u32 = 60;
}
