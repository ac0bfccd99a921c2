//! # Input Module
//!
//! Command parsing for player interactions.
//!
//! Commands are free text from whatever source the host wires up, most
//! naturally a speech recognizer. Parsing is forgiving: lowercase substring
//! matching, so "please go north" and "NORTH!" both work.

use crate::{Direction, Intent};

/// Keyword synonyms per direction, checked in this order.
const DIRECTION_KEYWORDS: [(&[&str], Direction); 4] = [
    (&["north", "up"], Direction::North),
    (&["south", "down"], Direction::South),
    (&["east", "right"], Direction::East),
    (&["west", "left"], Direction::West),
];

/// Keywords that trigger a generic interact.
const INTERACT_KEYWORDS: [&str; 2] = ["open", "use"];

/// Keywords that ask for a description of the surroundings.
const LOOK_KEYWORDS: [&str; 2] = ["look", "describe"];

/// Parses free-text commands into player intents.
///
/// Directions take precedence over interaction words, so "open the north
/// door" moves north rather than probing for any adjacent door.
///
/// # Examples
///
/// ```
/// use oubliette::{CommandParser, Direction, Intent};
///
/// let parser = CommandParser::new();
/// assert_eq!(parser.parse("go north"), Some(Intent::Move(Direction::North)));
/// assert_eq!(parser.parse("OPEN the door"), Some(Intent::Interact));
/// assert_eq!(parser.parse("sing a song"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommandParser;

impl CommandParser {
    /// Creates a new command parser.
    pub fn new() -> Self {
        Self
    }

    /// Maps command text to an intent, or `None` for unrecognized input.
    pub fn parse(&self, raw: &str) -> Option<Intent> {
        let command = raw.trim().to_lowercase();
        if command.is_empty() {
            return None;
        }

        for (keywords, direction) in DIRECTION_KEYWORDS {
            if Self::contains_any(&command, keywords) {
                return Some(Intent::Move(direction));
            }
        }

        if Self::contains_any(&command, &INTERACT_KEYWORDS) {
            return Some(Intent::Interact);
        }

        if Self::contains_any(&command, &LOOK_KEYWORDS) {
            return Some(Intent::LookAround);
        }

        None
    }

    fn contains_any(command: &str, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| command.contains(keyword))
    }
}
