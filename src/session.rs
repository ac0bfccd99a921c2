//! # Game Session
//!
//! The controller that owns a game and feeds it commands.
//!
//! A session holds the only live [`GameState`], so command handling is
//! naturally serialized: each command is parsed, resolved, and narrated to
//! completion before the next is looked at. Commands arriving after the game
//! has ended are dropped whole by the status guard, never mid-transition.

use crate::{
    BacktrackingCarver, CommandParser, CommandSource, GameEvent, GameState, GenerationConfig,
    Generator, InteractionEngine, Narrator, OublietteResult, Speaker,
};
use log::{debug, info};

/// Where a session's game states come from; reset replays this origin.
enum SessionOrigin {
    Generated { config: GenerationConfig },
    Layout { rows: Vec<String> },
}

/// A running game: state, engine, parser, and narrator under one owner.
///
/// # Examples
///
/// ```
/// use oubliette::{GameSession, GenerationConfig, StockNarrator};
///
/// let config = GenerationConfig::for_testing(7);
/// let mut session = GameSession::generate(config, 3, StockNarrator::seeded(7)).unwrap();
/// let narration = session.handle_command("look around").unwrap();
/// assert!(narration.is_some());
/// ```
pub struct GameSession<N: Narrator> {
    state: GameState,
    engine: InteractionEngine,
    parser: CommandParser,
    narrator: N,
    origin: SessionOrigin,
    initial_health: u32,
}

impl<N: Narrator> GameSession<N> {
    /// Starts a session on a freshly generated maze.
    pub fn generate(
        config: GenerationConfig,
        health: u32,
        narrator: N,
    ) -> OublietteResult<Self> {
        let carver = BacktrackingCarver::new();
        let mut rng = crate::generation::utils::create_rng(&config);
        let blueprint = carver.generate(&config, &mut rng)?;
        carver.validate(&blueprint, &config)?;

        info!(
            "session started: {}x{} maze, seed {}, health {}",
            config.width, config.height, config.seed, health
        );

        Ok(Self {
            state: GameState::from_blueprint(blueprint, health),
            engine: InteractionEngine::new(),
            parser: CommandParser::new(),
            narrator,
            origin: SessionOrigin::Generated { config },
            initial_health: health,
        })
    }

    /// Starts a session on a fixed textual layout.
    pub fn from_layout(rows: &[&str], health: u32, narrator: N) -> OublietteResult<Self> {
        let state = GameState::from_layout(rows, health)?;
        Ok(Self {
            state,
            engine: InteractionEngine::new(),
            parser: CommandParser::new(),
            narrator,
            origin: SessionOrigin::Layout {
                rows: rows.iter().map(|row| row.to_string()).collect(),
            },
            initial_health: health,
        })
    }

    /// The current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Opening narration for a fresh game.
    pub fn opening(&mut self) -> String {
        self.narrator.opening()
    }

    /// Handles one raw command to completion.
    ///
    /// Returns the narration to show, or `None` when the command was dropped
    /// by the terminal-state guard.
    pub fn handle_command(&mut self, raw: &str) -> OublietteResult<Option<String>> {
        if self.state.status.is_terminal() {
            debug!("command {:?} ignored: game already ended", raw);
            return Ok(None);
        }

        let event = match self.parser.parse(raw) {
            Some(intent) => self.engine.apply(&mut self.state, intent)?,
            None => Some(GameEvent::UnknownCommand {
                command: raw.trim().to_string(),
            }),
        };

        Ok(event.map(|event| self.narrator.narrate(&event)))
    }

    /// Discards the current game and starts over from the session origin.
    ///
    /// A generated session replays its seed (same maze); a layout session
    /// reloads the layout. Returns the fresh opening narration.
    pub fn reset(&mut self) -> OublietteResult<String> {
        self.state = match &self.origin {
            SessionOrigin::Generated { config } => {
                let carver = BacktrackingCarver::new();
                let mut rng = crate::generation::utils::create_rng(config);
                let blueprint = carver.generate(config, &mut rng)?;
                GameState::from_blueprint(blueprint, self.initial_health)
            }
            SessionOrigin::Layout { rows } => {
                let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
                GameState::from_layout(&rows, self.initial_health)?
            }
        };
        info!("game reset");
        Ok(self.narrator.opening())
    }

    /// Drives the session from a command source until the source runs dry or
    /// the game ends, speaking every narration.
    pub fn run<S: CommandSource, P: Speaker>(
        &mut self,
        source: &mut S,
        speaker: &mut P,
    ) -> OublietteResult<()> {
        let opening = self.opening();
        speaker.speak(&opening);

        while let Some(command) = source.next_command() {
            if let Some(narration) = self.handle_command(&command)? {
                speaker.speak(&narration);
            }
            if self.state.is_ended() {
                break;
            }
        }

        Ok(())
    }
}
