//! # Interaction Engine
//!
//! Resolves player intents against the game state.
//!
//! The engine holds no state of its own: each call takes the game state and
//! one intent, applies at most one transition, and reports what happened as
//! a symbolic [`GameEvent`]. Narration text lives elsewhere; the engine
//! speaks only in events.

use crate::{
    Direction, GameState, GameStatus, OublietteResult, Position, TileKind,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A normalized player action, derived from raw command text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Step one cell in a cardinal direction
    Move(Direction),
    /// Probe the four adjacent cells for an openable door
    Interact,
    /// Describe the immediate surroundings
    LookAround,
}

/// How a monster encounter ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterOutcome {
    /// The player took damage and pushed through
    Survived,
    /// The encounter reduced health to zero
    Died,
}

/// Snapshot of the four cells around a position, for look-around context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentTiles {
    pub north: Option<TileKind>,
    pub south: Option<TileKind>,
    pub east: Option<TileKind>,
    pub west: Option<TileKind>,
}

impl AdjacentTiles {
    /// Captures the tiles around `pos`; out-of-grid neighbours are `None`.
    pub fn around(state: &GameState, pos: Position) -> Self {
        let at = |direction: Direction| state.tile_at(pos + direction.to_delta());
        Self {
            north: at(Direction::North),
            south: at(Direction::South),
            east: at(Direction::East),
            west: at(Direction::West),
        }
    }

    /// Iterates the four neighbours in scan order with their direction names.
    pub fn entries(&self) -> [(&'static str, Option<TileKind>); 4] {
        [
            ("north", self.north),
            ("south", self.south),
            ("east", self.east),
            ("west", self.west),
        ]
    }
}

/// Symbolic outcome of one resolved intent.
///
/// Each variant carries whatever context its narration needs; the narrator
/// decides the literal wording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Move targeted a cell outside the grid
    Edge,
    /// Move targeted a wall
    BumpWall,
    /// Move onto open floor
    MovePath,
    /// Picked up the key
    GetKey,
    /// Opened a door with the key
    OpenDoor,
    /// Ran into a locked door without the key
    BumpDoorLocked,
    /// Collected a treasure
    GetTreasure {
        /// Treasures still left on the grid
        remaining: usize,
    },
    /// Fought a monster
    EncounterMonster {
        outcome: EncounterOutcome,
        /// Health remaining after the encounter
        health: u32,
    },
    /// Stepped onto the exit
    Win,
    /// Interact found no adjacent door
    NoDoor,
    /// Surroundings report
    LookAround { adjacent: AdjacentTiles },
    /// Command text matched no known intent
    UnknownCommand {
        /// The raw text as heard
        command: String,
    },
}

impl GameEvent {
    /// Stable snake_case key for this event, used in logs and by narrators
    /// keyed on event names.
    pub fn key(&self) -> &'static str {
        match self {
            GameEvent::Edge => "edge",
            GameEvent::BumpWall => "bump_wall",
            GameEvent::MovePath => "move_path",
            GameEvent::GetKey => "get_key",
            GameEvent::OpenDoor => "open_door",
            GameEvent::BumpDoorLocked => "bump_door_locked",
            GameEvent::GetTreasure { .. } => "get_treasure",
            GameEvent::EncounterMonster { .. } => "encounter_monster",
            GameEvent::Win => "win",
            GameEvent::NoDoor => "no_door",
            GameEvent::LookAround { .. } => "look_around",
            GameEvent::UnknownCommand { .. } => "unknown_command",
        }
    }
}

/// Resolves intents into state transitions and events.
///
/// # Examples
///
/// ```
/// use oubliette::{Direction, GameEvent, GameState, Intent, InteractionEngine};
///
/// let mut state = GameState::from_layout(&["#####", "#@..#", "#####"], 3).unwrap();
/// let engine = InteractionEngine::new();
///
/// let event = engine.apply(&mut state, Intent::Move(Direction::East)).unwrap();
/// assert_eq!(event, Some(GameEvent::MovePath));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InteractionEngine;

impl InteractionEngine {
    /// Creates a new interaction engine.
    pub fn new() -> Self {
        Self
    }

    /// Applies one intent to the game state.
    ///
    /// Returns `Ok(None)` without touching the state when the game has
    /// already ended; the session decides what, if anything, to tell the
    /// player then.
    pub fn apply(
        &self,
        state: &mut GameState,
        intent: Intent,
    ) -> OublietteResult<Option<GameEvent>> {
        if state.status.is_terminal() {
            debug!("intent {:?} ignored: game already ended", intent);
            return Ok(None);
        }

        let event = match intent {
            Intent::Move(direction) => self.resolve_move(state, direction)?,
            Intent::Interact => self.resolve_interact(state)?,
            Intent::LookAround => GameEvent::LookAround {
                adjacent: AdjacentTiles::around(state, state.player_pos),
            },
        };

        debug!(
            "event {} at ({}, {}), health {}, key {}",
            event.key(),
            state.player_pos.x,
            state.player_pos.y,
            state.health,
            state.has_key
        );

        Ok(Some(event))
    }

    /// Resolves a one-step move according to the transition table.
    fn resolve_move(
        &self,
        state: &mut GameState,
        direction: Direction,
    ) -> OublietteResult<GameEvent> {
        let target = state.player_pos + direction.to_delta();

        let Some(tile) = state.tile_at(target) else {
            return Ok(GameEvent::Edge);
        };

        let event = match tile {
            TileKind::Wall => GameEvent::BumpWall,

            TileKind::Floor | TileKind::Start => {
                state.player_pos = target;
                GameEvent::MovePath
            }

            TileKind::Key => {
                state.player_pos = target;
                state.has_key = true;
                state.consume_tile(target)?;
                GameEvent::GetKey
            }

            TileKind::Door => return self.resolve_door(state, target),

            TileKind::Treasure => {
                state.player_pos = target;
                state.consume_tile(target)?;
                state.treasures.remove(&target);
                GameEvent::GetTreasure {
                    remaining: state.treasures.len(),
                }
            }

            TileKind::Monster => {
                if state.health <= 1 {
                    state.health = 0;
                    state.status = GameStatus::Lost;
                    info!("player slain by monster at ({}, {})", target.x, target.y);
                    GameEvent::EncounterMonster {
                        outcome: EncounterOutcome::Died,
                        health: 0,
                    }
                } else {
                    state.health -= 1;
                    state.consume_tile(target)?;
                    state.monsters.remove(&target);
                    state.player_pos = target;
                    GameEvent::EncounterMonster {
                        outcome: EncounterOutcome::Survived,
                        health: state.health,
                    }
                }
            }

            TileKind::End => {
                state.player_pos = target;
                state.status = GameStatus::Won;
                info!("player escaped the dungeon");
                GameEvent::Win
            }
        };

        Ok(event)
    }

    /// Resolves stepping into a door cell: through with the key, bounced
    /// without.
    fn resolve_door(&self, state: &mut GameState, target: Position) -> OublietteResult<GameEvent> {
        if state.has_key {
            state.player_pos = target;
            state.consume_tile(target)?;
            Ok(GameEvent::OpenDoor)
        } else {
            Ok(GameEvent::BumpDoorLocked)
        }
    }

    /// Probes the four adjacent cells in scan order (N, S, E, W) and acts on
    /// the first door found. Additional adjacent doors are ignored.
    fn resolve_interact(&self, state: &mut GameState) -> OublietteResult<GameEvent> {
        for target in state.player_pos.cardinal_adjacent_positions() {
            if state.tile_at(target) == Some(TileKind::Door) {
                return self.resolve_door(state, target);
            }
        }
        Ok(GameEvent::NoDoor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> InteractionEngine {
        InteractionEngine::new()
    }

    fn state_from(rows: &[&str], health: u32) -> GameState {
        GameState::from_layout(rows, health).unwrap()
    }

    #[test]
    fn test_move_onto_floor() {
        let mut state = state_from(&["#####", "#@..#", "#####"], 3);
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(event, Some(GameEvent::MovePath));
        assert_eq!(state.player_pos, Position::new(2, 1));
    }

    #[test]
    fn test_move_into_wall_changes_nothing() {
        let mut state = state_from(&["#####", "#@..#", "#####"], 3);
        let before = state.clone();
        let event = engine().apply(&mut state, Intent::Move(Direction::North)).unwrap();
        assert_eq!(event, Some(GameEvent::BumpWall));
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_off_grid_is_edge() {
        // Player on the top-left corner of an unwalled strip
        let mut state = state_from(&["@..", "...", "..."], 3);
        let before = state.clone();
        let event = engine().apply(&mut state, Intent::Move(Direction::North)).unwrap();
        assert_eq!(event, Some(GameEvent::Edge));
        assert_eq!(state, before);
    }

    #[test]
    fn test_key_pickup_is_permanent() {
        let mut state = state_from(&["#####", "#@K.#", "#####"], 3);
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(event, Some(GameEvent::GetKey));
        assert!(state.has_key);
        assert_eq!(state.tile_at(Position::new(2, 1)), Some(TileKind::Floor));

        // Walking the same cells again is a plain move, not a second pickup
        engine().apply(&mut state, Intent::Move(Direction::West)).unwrap();
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(event, Some(GameEvent::MovePath));
        assert!(state.has_key);
    }

    #[test]
    fn test_locked_door_blocks_without_key() {
        let mut state = state_from(&["#####", "#@D.#", "#####"], 3);
        let before = state.clone();
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(event, Some(GameEvent::BumpDoorLocked));
        assert_eq!(state, before);
    }

    #[test]
    fn test_door_opens_with_key() {
        let mut state = state_from(&["######", "#@KD.#", "######"], 3);
        engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(event, Some(GameEvent::OpenDoor));
        assert_eq!(state.player_pos, Position::new(3, 1));
        assert_eq!(state.tile_at(Position::new(3, 1)), Some(TileKind::Floor));
    }

    #[test]
    fn test_treasure_pickup_shrinks_set() {
        let mut state = state_from(&["#####", "#@TT#", "#####"], 3);
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(event, Some(GameEvent::GetTreasure { remaining: 1 }));
        assert_eq!(state.treasures.len(), 1);
        assert_eq!(state.tile_at(Position::new(2, 1)), Some(TileKind::Floor));
    }

    #[test]
    fn test_monster_encounter_survived() {
        let mut state = state_from(&["#####", "#@M.#", "#####"], 3);
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(
            event,
            Some(GameEvent::EncounterMonster {
                outcome: EncounterOutcome::Survived,
                health: 2,
            })
        );
        assert_eq!(state.health, 2);
        assert_eq!(state.player_pos, Position::new(2, 1));
        assert!(state.monsters.is_empty());
        assert_eq!(state.tile_at(Position::new(2, 1)), Some(TileKind::Floor));
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn test_monster_encounter_fatal() {
        let mut state = state_from(&["#####", "#@M.#", "#####"], 1);
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(
            event,
            Some(GameEvent::EncounterMonster {
                outcome: EncounterOutcome::Died,
                health: 0,
            })
        );
        assert_eq!(state.health, 0);
        assert_eq!(state.status, GameStatus::Lost);
        // The player does not advance and the monster stands
        assert_eq!(state.player_pos, Position::new(1, 1));
        assert_eq!(state.tile_at(Position::new(2, 1)), Some(TileKind::Monster));
        assert_eq!(state.monsters.len(), 1);
    }

    #[test]
    fn test_reaching_end_wins() {
        let mut state = state_from(&["#####", "#@E.#", "#####"], 3);
        let event = engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert_eq!(event, Some(GameEvent::Win));
        assert_eq!(state.status, GameStatus::Won);
        assert_eq!(state.player_pos, Position::new(2, 1));
    }

    #[test]
    fn test_terminal_state_freezes_everything() {
        let mut state = state_from(&["#####", "#@E.#", "#####"], 3);
        engine().apply(&mut state, Intent::Move(Direction::East)).unwrap();
        assert!(state.is_ended());

        let frozen = state.save_to_json().unwrap();
        for intent in [
            Intent::Move(Direction::West),
            Intent::Move(Direction::East),
            Intent::Interact,
            Intent::LookAround,
        ] {
            let event = engine().apply(&mut state, intent).unwrap();
            assert_eq!(event, None);
        }
        assert_eq!(state.save_to_json().unwrap(), frozen);
    }

    #[test]
    fn test_interact_opens_first_door_in_scan_order() {
        // Doors north and east of the player; north wins the scan
        let mut state = state_from(&["#D###", "#@D.#", "#####"], 3);
        state.has_key = true;
        let event = engine().apply(&mut state, Intent::Interact).unwrap();
        assert_eq!(event, Some(GameEvent::OpenDoor));
        assert_eq!(state.player_pos, Position::new(1, 0));
        // The east door is untouched
        assert_eq!(state.tile_at(Position::new(2, 1)), Some(TileKind::Door));
    }

    #[test]
    fn test_interact_locked_door_reports_without_moving() {
        let mut state = state_from(&["#####", "#@D.#", "#####"], 3);
        let before = state.clone();
        let event = engine().apply(&mut state, Intent::Interact).unwrap();
        assert_eq!(event, Some(GameEvent::BumpDoorLocked));
        assert_eq!(state, before);
    }

    #[test]
    fn test_interact_without_door() {
        let mut state = state_from(&["#####", "#@..#", "#####"], 3);
        let event = engine().apply(&mut state, Intent::Interact).unwrap();
        assert_eq!(event, Some(GameEvent::NoDoor));
    }

    #[test]
    fn test_look_around_reports_neighbours() {
        let mut state = state_from(&["#D###", "#@..#", "#####"], 3);
        let event = engine().apply(&mut state, Intent::LookAround).unwrap();
        let Some(GameEvent::LookAround { adjacent }) = event else {
            panic!("expected look_around event, got {:?}", event);
        };
        assert_eq!(adjacent.north, Some(TileKind::Door));
        assert_eq!(adjacent.south, Some(TileKind::Wall));
        assert_eq!(adjacent.east, Some(TileKind::Floor));
        assert_eq!(adjacent.west, Some(TileKind::Wall));
    }

    #[test]
    fn test_event_keys() {
        assert_eq!(GameEvent::Edge.key(), "edge");
        assert_eq!(GameEvent::BumpWall.key(), "bump_wall");
        assert_eq!(GameEvent::GetTreasure { remaining: 0 }.key(), "get_treasure");
        assert_eq!(
            GameEvent::EncounterMonster {
                outcome: EncounterOutcome::Died,
                health: 0
            }
            .key(),
            "encounter_monster"
        );
        assert_eq!(
            GameEvent::UnknownCommand {
                command: "dance".to_string()
            }
            .key(),
            "unknown_command"
        );
    }
}
