//! # I/O Ports
//!
//! Boundary traits for command capture and narration playback.
//!
//! Speech recognition and speech synthesis are platform services, so the
//! core only ever sees these two traits. Commands are pulled one at a time
//! and fully resolved before the next is fetched; speaking is fire-and-forget
//! and a failed speaker never affects game state.

use log::warn;
use std::collections::VecDeque;
use std::io::{BufRead, Write};

/// Produces a lazy, unbounded sequence of free-text commands.
///
/// Returning `None` means the source is exhausted (microphone stopped,
/// stdin closed, script finished) and the session loop should end.
pub trait CommandSource {
    /// Fetches the next command, blocking as the source requires.
    fn next_command(&mut self) -> Option<String>;
}

/// Consumes narration text, best-effort.
pub trait Speaker {
    /// Delivers one line of narration. Must not fail loudly; implementations
    /// swallow and log their own errors.
    fn speak(&mut self, text: &str);
}

/// Command source reading lines from any buffered reader.
///
/// Blank lines are skipped; read errors end the stream.
pub struct LineCommandSource<R: BufRead> {
    reader: R,
}

impl<R: BufRead> LineCommandSource<R> {
    /// Wraps a buffered reader as a command source.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> CommandSource for LineCommandSource<R> {
    fn next_command(&mut self) -> Option<String> {
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                }
                Err(e) => {
                    warn!("command source read failed: {}", e);
                    return None;
                }
            }
        }
    }
}

/// Pre-scripted command source for tests and demos.
pub struct ScriptedSource {
    commands: VecDeque<String>,
}

impl ScriptedSource {
    /// Creates a source that replays the given commands in order.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(commands: I) -> Self {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }
}

impl CommandSource for ScriptedSource {
    fn next_command(&mut self) -> Option<String> {
        self.commands.pop_front()
    }
}

/// Speaker that prints narration to stdout.
#[derive(Debug, Clone, Default)]
pub struct ConsoleSpeaker;

impl ConsoleSpeaker {
    /// Creates a console speaker.
    pub fn new() -> Self {
        Self
    }
}

impl Speaker for ConsoleSpeaker {
    fn speak(&mut self, text: &str) {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        if let Err(e) = writeln!(handle, "{}", text) {
            warn!("speaker write failed: {}", e);
        }
    }
}

/// Speaker that discards everything.
#[derive(Debug, Clone, Default)]
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&mut self, _text: &str) {}
}

/// Speaker that records narration for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeaker {
    /// Everything spoken so far, in order.
    pub transcript: Vec<String>,
}

impl RecordingSpeaker {
    /// Creates an empty recording speaker.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }
}
