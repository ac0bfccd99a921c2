//! # Oubliette Main Entry Point
//!
//! Terminal host for the game core: stdin lines play the role of the speech
//! recognizer and stdout plays the narrator's voice. Host-level words
//! (quit, reset) are handled here and never reach the engine.

use clap::Parser;
use log::info;
use oubliette::{
    CommandSource, ConsoleSpeaker, GameSession, GameStatus, GenerationConfig, LineCommandSource,
    OublietteResult, Speaker, StockNarrator,
};

/// Command line arguments for Oubliette.
#[derive(Parser, Debug)]
#[command(name = "oubliette")]
#[command(about = "A narrated maze-escape game with voice-style commands")]
#[command(version)]
struct Args {
    /// Random seed for maze generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maze width in tiles (odd, >= 5)
    #[arg(long, default_value_t = oubliette::config::DEFAULT_MAZE_WIDTH)]
    width: u32,

    /// Maze height in tiles (odd, >= 5)
    #[arg(long, default_value_t = oubliette::config::DEFAULT_MAZE_HEIGHT)]
    height: u32,

    /// Starting health
    #[arg(long, default_value_t = oubliette::config::DEFAULT_PLAYER_HEALTH)]
    health: u32,

    /// Don't print the map after each command
    #[arg(long)]
    hide_map: bool,
}

fn main() -> OublietteResult<()> {
    env_logger::init();
    let args = Args::parse();

    info!("Starting Oubliette v{}", oubliette::VERSION);

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = GenerationConfig::with_dimensions(seed, args.width, args.height);

    info!("Generating maze with seed: {}", seed);
    let mut session = GameSession::generate(config, args.health, StockNarrator::new())?;

    let stdin = std::io::stdin();
    let mut source = LineCommandSource::new(stdin.lock());
    let mut speaker = ConsoleSpeaker::new();

    println!("OUBLIETTE — escape the maze (seed {})", seed);
    println!("Commands: go north/south/east/west, open door, look around, reset, quit");
    println!();

    let opening = session.opening();
    speaker.speak(&opening);
    show_world(&session, &args);

    while let Some(command) = source.next_command() {
        let lowered = command.to_lowercase();

        if lowered == "quit" || lowered == "exit" {
            info!("player quit");
            break;
        }

        if lowered.contains("reset") || lowered.contains("play again") {
            let opening = session.reset()?;
            speaker.speak(&opening);
            show_world(&session, &args);
            continue;
        }

        match session.handle_command(&command)? {
            Some(narration) => speaker.speak(&narration),
            None => {
                // Terminal-state guard swallowed the command; remind the
                // player how to leave the end screen.
                speaker.speak("The game is over. Say \"reset\" to play again or \"quit\" to leave.");
                continue;
            }
        }

        show_world(&session, &args);
    }

    Ok(())
}

/// Prints the map and the status line.
fn show_world(session: &GameSession<StockNarrator>, args: &Args) {
    if args.hide_map {
        return;
    }

    let state = session.state();
    println!();
    for row in state.render_rows() {
        println!("{}", row);
    }

    let status = match state.status {
        GameStatus::Playing => "exploring",
        GameStatus::Won => "ESCAPED!",
        GameStatus::Lost => "DEAD",
    };
    println!(
        "health: {}  key: {}  status: {}",
        state.health,
        if state.has_key { "yes" } else { "no" },
        status
    );
    println!();
}
