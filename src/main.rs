//! Reel Rush headless runner
//!
//! Plays one full game at a fixed frame rate, optionally with the demo
//! autopilot at the controls, and prints the final score.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use reel_rush::consts::*;
use reel_rush::format_clock;
use reel_rush::sim::{FrameClock, GameEvent, GamePhase, GameState, TickInput};
use reel_rush::tuning::Tuning;

#[derive(Debug, Parser)]
#[command(name = "reel-rush", about = "Headless Reel Rush simulation")]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// JSON file overriding balance values
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Let the demo AI play
    #[arg(long)]
    autopilot: bool,
    /// Host frame length in milliseconds
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f32,
    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
    /// Print the default tuning as JSON and exit
    #[arg(long)]
    dump_tuning: bool,
}

fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading tuning file {}", path.display()))?;
    let tuning = Tuning::from_json(&json)
        .with_context(|| format!("loading tuning file {}", path.display()))?;
    log::info!("Loaded tuning from {}", path.display());
    Ok(tuning)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.dump_tuning {
        println!("{}", Tuning::default().to_json());
        return Ok(());
    }

    let tuning = load_tuning(args.tuning.as_ref())?;
    log::info!("Reel Rush (headless) starting, seed {}", args.seed);

    let mut state = GameState::with_tuning(args.seed, tuning);
    let mut clock = FrameClock::new();
    let mut input = TickInput {
        start: true,
        autopilot: args.autopilot,
        ..Default::default()
    };

    let frame_dt = (args.frame_ms / 1000.0).max(SIM_DT / 4.0);
    let mut last_timer = None;
    loop {
        clock.update(&mut state, &mut input, frame_dt);

        for event in state.drain_events() {
            match event {
                GameEvent::FishCaught { species, value, .. } => {
                    println!(
                        "[{}] caught a {} (+${value})",
                        format_clock(state.session.timer),
                        species.as_str()
                    );
                }
                GameEvent::FishEscaped { species, .. } => {
                    println!(
                        "[{}] the {} got away",
                        format_clock(state.session.timer),
                        species.as_str()
                    );
                }
                _ => {}
            }
        }

        if last_timer != Some(state.session.timer) && state.session.timer % 30 == 0 {
            log::info!(
                "{} left, ${} banked",
                format_clock(state.session.timer),
                state.session.money
            );
        }
        last_timer = Some(state.session.timer);

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "Final score: ${} ({} fish caught)",
        state.session.money, state.session.fish_caught
    );
    if args.json {
        println!("{}", state.snapshot().to_json()?);
    }
    Ok(())
}
