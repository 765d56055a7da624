use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use sumo_cli::{parse_line, Command, FrameOutcome, GameRunner, TextRenderer};
use sumo_engine::assets::skin::load_or_warn;
use sumo_engine::{FileLoader, SimulationError, SumoConfig, SumoMatch};
use thiserror::Error;

const USAGE: &str = "usage: sumo [P1_SKIN] [P2_SKIN]

Two ragdolls share one torso. Knock the other one's head (or foot) onto the ground.
Reads commands from stdin, one per line:
  +KEY / -KEY   press / release w a s d (left player) or up down left right (right player)
  N             run N frames (50 per second) and print the arena
  quit          exit (also esc, or end of input)

Set SUMO_CONFIG to a JSON file to override tuning constants.";

const TEXT_COLS: usize = 60;
const TEXT_ROWS: usize = 30;

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

fn skin_args(args: &[String]) -> Result<[Option<&str>; 2], CliError> {
    if let Some(flag) = args.iter().find(|a| a.starts_with('-')) {
        return Err(CliError::Usage(format!("unexpected option {}", flag)));
    }
    if args.len() > 2 {
        return Err(CliError::Usage(format!(
            "expected at most 2 skins, got {}",
            args.len()
        )));
    }
    Ok([args.first().map(String::as_str), args.get(1).map(String::as_str)])
}

fn run(args: &[String]) -> Result<(), CliError> {
    let skins = skin_args(args)?;
    let config_path = std::env::var_os("SUMO_CONFIG").map(PathBuf::from);
    let config = SumoConfig::load_or_default(config_path.as_deref());

    let loader = FileLoader::new();
    let game = SumoMatch::new(config.clone()).with_skins(skins.map(|s| load_or_warn(&loader, s)));
    let mut runner = GameRunner::new(game);
    runner.init();

    let engine = &config.engine;
    let mut screen = TextRenderer::new(TEXT_COLS, TEXT_ROWS, engine.world_width, engine.world_height);
    let stdout = io::stdout();

    for line in io::stdin().lock().lines() {
        let frames = match parse_line(&line?) {
            Ok(Command::Input(event)) => {
                runner.push_input(event);
                continue;
            }
            Ok(Command::Advance(frames)) => frames,
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => continue,
            Err(err) => {
                log::warn!("{}", err);
                continue;
            }
        };

        for _ in 0..frames {
            screen.clear();
            if runner.frame(&mut screen)? == FrameOutcome::Quit {
                return Ok(());
            }
        }
        for event in runner.drain_events() {
            log::debug!("event: {:?}", event);
        }
        let mut out = stdout.lock();
        out.write_all(screen.to_text().as_bytes())?;
        out.flush()?;
    }
    log::info!("bye after {} frames", runner.frames());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => {}
        Err(CliError::Usage(msg)) => {
            eprintln!("sumo: {}\n\n{}", msg, USAGE);
            std::process::exit(2);
        }
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    }
}
