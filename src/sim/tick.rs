//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Player intents
//! are applied first, then fish, bite feedback, the challenge marker, the
//! line, deferred tasks and the countdown, all under one `&mut` borrow so no
//! observer ever sees a half-applied tick.

use serde::{Deserialize, Serialize};

use super::bite::{BiteEvent, resolve_bite};
use super::challenge::{ChallengeOutcome, TimingChallenge};
use super::dice::Dice;
use super::fish::advance_population;
use super::line::LineMode;
use super::schedule::Deferred;
use super::state::{CaughtFish, GameEvent, GameState};
use crate::consts::*;
use crate::secs_to_ticks;

/// Boat movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDirection {
    Left,
    Right,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start or restart the game
    pub start: bool,
    /// Nudge the boat
    pub move_dir: Option<MoveDirection>,
    /// Cast / stop the line (space)
    pub toggle_line: bool,
    /// Click during the timing challenge
    pub attempt_catch: bool,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick<D: Dice>(state: &mut GameState<D>, input: &TickInput, dt: f32) {
    if input.start {
        state.start_game();
    }

    // Don't tick unless a game is running
    if !state.is_playing() {
        return;
    }

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    if let Some(dir) = input.move_dir {
        move_player(state, dir);
    }
    if input.toggle_line {
        toggle_line(state);
    }
    if input.attempt_catch {
        attempt_catch(state);
    }

    state.time_ticks += 1;
    let frames = dt / SIM_DT;

    advance_population(&mut state.fish, dt);

    if let Some(bite) = state.bite.as_mut() {
        bite.update();
    }

    if let Some(challenge) = state.challenge.as_mut() {
        challenge.advance(state.tuning.progress_step * frames);
    }

    let line_step_ticks = secs_to_ticks(state.tuning.line_step_secs);
    if state.time_ticks.is_multiple_of(line_step_ticks) {
        let was_idle = state.line.is_idle();
        state.line.step(
            state.tuning.line_extend_step,
            state.tuning.line_retract_step,
            state.tuning.line_max_length,
        );
        if !was_idle && state.line.is_idle() {
            state.events.push(GameEvent::LineReeledIn);
        }
    }

    for action in state.scheduler.take_due(state.time_ticks, state.generation) {
        run_deferred(state, action);
    }

    if state.time_ticks.is_multiple_of(TICKS_PER_SECOND) {
        state.session.timer = state.session.timer.saturating_sub(1);
        if state.session.timer == 0 {
            state.end_game();
            return;
        }
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

fn run_deferred<D: Dice>(state: &mut GameState<D>, action: Deferred) {
    match action {
        Deferred::BeginReel => state.line.begin_reel(),
        Deferred::OpenChallenge => {
            if let Some(bite) = state.bite.take() {
                let challenge = TimingChallenge::open(bite.fish, &mut state.dice);
                log::trace!(
                    "challenge for fish {}: window [{:.1}, {:.1}]",
                    challenge.fish.id,
                    challenge.window.start,
                    challenge.window.end
                );
                state.events.push(GameEvent::ChallengeStarted {
                    fish_id: challenge.fish.id,
                    window: challenge.window,
                });
                state.challenge = Some(challenge);
            }
        }
        Deferred::ClearCaught => {
            state.caught = None;
            if state.challenge.as_ref().is_some_and(|c| !c.active) {
                state.challenge = None;
            }
        }
    }
}

/// Move the boat one step. Rejected when not playing, during a timing
/// challenge, or when the boat already sits at the edge of its range.
pub fn move_player<D: Dice>(state: &mut GameState<D>, dir: MoveDirection) -> bool {
    if !state.is_playing() || state.challenge.is_some() {
        log::debug!("move {dir:?} ignored");
        return false;
    }

    let step = state.tuning.boat_step;
    match dir {
        MoveDirection::Left if state.boat_x > BOAT_MIN_X => {
            state.boat_x = (state.boat_x - step).max(BOAT_MIN_X);
            true
        }
        MoveDirection::Right if state.boat_x < BOAT_MAX_X => {
            state.boat_x = (state.boat_x + step).min(BOAT_MAX_X);
            true
        }
        _ => false,
    }
}

/// Cast the line, or stop a cast in progress and check for a bite.
///
/// No-op while a bite or challenge is pending, or while the line is still
/// coming back up.
pub fn toggle_line<D: Dice>(state: &mut GameState<D>) -> bool {
    if !state.is_playing() || state.is_engaged() {
        log::debug!("line toggle ignored");
        return false;
    }

    match state.line.mode {
        LineMode::Idle => {
            state
                .line
                .cast(state.tuning.line_extend_step, state.tuning.line_max_length);
            state.events.push(GameEvent::CastStarted);
            true
        }
        LineMode::Extending => {
            let Some(depth) = state.line.stop() else {
                return false;
            };
            let hook = state.line.hook(state.boat_x);
            state.events.push(GameEvent::CastStopped { depth });

            let now = state.time_ticks;
            match resolve_bite(
                &mut state.fish,
                hook,
                state.tuning.bite_radius,
                &mut state.dice,
            ) {
                Some(fish) => {
                    log::debug!("fish {} ({}) bit at depth {depth}", fish.id, fish.species.as_str());
                    state.events.push(GameEvent::FishHooked {
                        fish_id: fish.id,
                        species: fish.species,
                    });
                    state.bite = Some(BiteEvent::new(fish));
                    state.scheduler.schedule(
                        now + secs_to_ticks(state.tuning.bite_delay_secs),
                        state.generation,
                        Deferred::OpenChallenge,
                    );
                }
                None => state.events.push(GameEvent::NoBite),
            }

            state.scheduler.schedule(
                now + secs_to_ticks(state.tuning.retract_hold_secs),
                state.generation,
                Deferred::BeginReel,
            );
            true
        }
        LineMode::Retracting { .. } => false,
    }
}

/// Click during the timing challenge. Returns true if a challenge was
/// resolved (caught or not).
///
/// A caught fish leaves the challenge resolved (inactive, `Caught`) for the
/// catch display; it still locks the line and the boat until
/// `Deferred::ClearCaught` clears both. A miss clears the challenge at once.
pub fn attempt_catch<D: Dice>(state: &mut GameState<D>) -> bool {
    if !state.is_playing() {
        return false;
    }
    let Some(outcome) = state.challenge.as_mut().and_then(|c| c.attempt()) else {
        log::debug!("catch attempt with no open challenge");
        return false;
    };
    let Some(challenge) = state.challenge.take() else {
        return false;
    };

    match outcome {
        ChallengeOutcome::Caught => {
            let fish = challenge.fish.clone();
            state.session.money = state.session.money.saturating_add(fish.value);
            state.session.fish_caught = state.session.fish_caught.saturating_add(1);
            log::info!(
                "caught {} (+{}) at {:.0} in [{:.1}, {:.1}]: money={}",
                fish.species.as_str(),
                fish.value,
                challenge.progress,
                challenge.window.start,
                challenge.window.end,
                state.session.money
            );
            state.events.push(GameEvent::FishCaught {
                fish_id: fish.id,
                species: fish.species,
                value: fish.value,
            });

            state.scheduler.cancel(Deferred::ClearCaught);
            state.scheduler.schedule(
                state.time_ticks + secs_to_ticks(state.tuning.caught_display_secs),
                state.generation,
                Deferred::ClearCaught,
            );
            state.caught = Some(CaughtFish {
                fish,
                shown_at_tick: state.time_ticks,
            });
            state.challenge = Some(challenge);
        }
        ChallengeOutcome::Escaped => {
            let fish = &challenge.fish;
            log::debug!(
                "{} escaped at {:.0} (window [{:.1}, {:.1}])",
                fish.species.as_str(),
                challenge.progress,
                challenge.window.start,
                challenge.window.end
            );
            state.events.push(GameEvent::FishEscaped {
                fish_id: fish.id,
                species: fish.species,
            });
        }
    }
    true
}

/// Demo player: lines up with the nearest fish, casts down to its depth,
/// and clicks once the marker is inside the window.
fn autopilot<D: Dice>(state: &GameState<D>, input: &mut TickInput) {
    if let Some(challenge) = &state.challenge {
        if !challenge.active {
            return;
        }
        let window = challenge.window;
        let progress = challenge.progress;
        let mid = (window.start + window.end) * 0.5;
        let last_chance = progress + state.tuning.progress_step > window.end;
        input.attempt_catch = window.contains(progress) && (progress >= mid || last_chance);
        return;
    }
    if state.bite.is_some() {
        return;
    }

    let radius = state.tuning.bite_radius;
    let target = state.fish.iter().min_by(|a, b| {
        (a.pos.x - state.boat_x)
            .abs()
            .partial_cmp(&(b.pos.x - state.boat_x).abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let Some(target) = target else {
        return;
    };
    let dx = target.pos.x - state.boat_x;

    match state.line.mode {
        LineMode::Idle => {
            if dx.abs() < radius * 0.5 {
                input.toggle_line = true;
            } else if dx.abs() > state.tuning.boat_step {
                input.move_dir = Some(if dx < 0.0 {
                    MoveDirection::Left
                } else {
                    MoveDirection::Right
                });
            }
        }
        LineMode::Extending => {
            let hook = state.line.hook(state.boat_x);
            let in_range = state.fish.iter().any(|f| f.is_near(hook, radius * 0.6));
            if in_range || state.line.length >= state.tuning.line_max_length {
                input.toggle_line = true;
            }
        }
        LineMode::Retracting { .. } => {}
    }
}
