//! Game state and core simulation types
//!
//! One `GameState` is one game: the session economy, the boat, the live
//! fish, the line, the pending bite or timing challenge, and the deferred
//! task queue. The presentation layer reads it between ticks (or takes a
//! [`Snapshot`]) and never writes to it directly.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bite::BiteEvent;
use super::challenge::{TargetWindow, TimingChallenge};
use super::dice::{Dice, seeded};
use super::fish::{Fish, spawn_population};
use super::line::FishingLine;
use super::schedule::Scheduler;
use super::species::Species;
use crate::consts::*;
use crate::tuning::Tuning;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Constructed, waiting for the first start
    Ready,
    /// Countdown running
    Playing,
    /// Countdown hit zero; money and catches are the final score
    GameOver,
}

/// Money and clock for the current game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub money: u32,
    /// Seconds left on the countdown
    pub timer: u32,
    pub is_playing: bool,
    pub fish_caught: u32,
}

impl Session {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            money: tuning.starting_money,
            timer: tuning.time_budget_secs,
            is_playing: false,
            fish_caught: 0,
        }
    }
}

/// The last landed fish, shown briefly after a catch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaughtFish {
    pub fish: Fish,
    pub shown_at_tick: u64,
}

/// Something the presenter may want to react to (sounds, toasts, effects)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted { generation: u32 },
    CastStarted,
    CastStopped { depth: f32 },
    FishHooked { fish_id: u32, species: Species },
    NoBite,
    ChallengeStarted { fish_id: u32, window: TargetWindow },
    FishCaught { fish_id: u32, species: Species, value: u32 },
    FishEscaped { fish_id: u32, species: Species },
    LineReeledIn,
    GameOver { money: u32, fish_caught: u32 },
}

/// Complete game state. `D` is the random source (seeded PCG in play).
#[derive(Debug, Clone)]
pub struct GameState<D = Pcg32> {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance parameters
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub session: Session,
    /// Bumped by every start; deferred tasks from older games are dropped
    pub generation: u32,
    /// Ticks since the current game started
    pub time_ticks: u64,
    /// Horizontal position of the boat (and the line)
    pub boat_x: f32,
    /// Live fish (sorted by id)
    pub fish: Vec<Fish>,
    pub line: FishingLine,
    /// Fish on the hook, waiting for the challenge to open
    pub bite: Option<BiteEvent>,
    pub challenge: Option<TimingChallenge>,
    pub caught: Option<CaughtFish>,
    /// Events emitted since the presenter last drained them
    pub events: Vec<GameEvent>,
    pub(crate) scheduler: Scheduler,
    pub(crate) dice: D,
    next_id: u32,
}

impl GameState<Pcg32> {
    /// New game state with reference balancing
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::with_dice(seed, tuning, seeded(seed))
    }
}

impl<D: Dice> GameState<D> {
    /// New game state drawing from a caller-provided random source
    pub fn with_dice(seed: u64, tuning: Tuning, dice: D) -> Self {
        Self {
            seed,
            session: Session::new(&tuning),
            tuning,
            phase: GamePhase::Ready,
            generation: 0,
            time_ticks: 0,
            boat_x: BOAT_START_X,
            fish: Vec::new(),
            line: FishingLine::default(),
            bite: None,
            challenge: None,
            caught: None,
            events: Vec::new(),
            scheduler: Scheduler::default(),
            dice,
            next_id: 1,
        }
    }

    /// Start (or restart) a game: fresh economy, fresh fish, nothing pending
    pub fn start_game(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.scheduler.clear();

        self.session = Session::new(&self.tuning);
        self.session.is_playing = true;
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.boat_x = BOAT_START_X;
        self.line.reset();
        self.bite = None;
        self.challenge = None;
        self.caught = None;
        self.events.clear();

        let first_id = self.next_id;
        self.fish = spawn_population(self.tuning.population, first_id, &mut self.dice);
        self.next_id = first_id + self.fish.len() as u32;

        log::info!(
            "game {} started: money={} timer={}s fish={}",
            self.generation,
            self.session.money,
            self.session.timer,
            self.fish.len()
        );
        self.events.push(GameEvent::GameStarted {
            generation: self.generation,
        });
    }

    /// Stop the countdown. Pending work is cancelled; the score stays.
    pub fn end_game(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.session.is_playing = false;
        self.scheduler.clear();
        self.line.reset();
        self.caught = None;

        if let Some(bite) = self.bite.take() {
            log::debug!("fish {} got away at the buzzer", bite.fish.id);
        }
        if let Some(challenge) = self.challenge.take() {
            log::debug!("challenge for fish {} cancelled at the buzzer", challenge.fish.id);
        }

        log::info!(
            "game {} over: money={} fish_caught={}",
            self.generation,
            self.session.money,
            self.session.fish_caught
        );
        self.events.push(GameEvent::GameOver {
            money: self.session.money,
            fish_caught: self.session.fish_caught,
        });
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// A bite, an open challenge, or a resolved one still on display
    pub fn is_engaged(&self) -> bool {
        self.bite.is_some() || self.challenge.is_some()
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only copy for the presenter
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            generation: self.generation,
            time_ticks: self.time_ticks,
            phase: self.phase,
            session: self.session.clone(),
            boat_x: self.boat_x,
            fish: self.fish.clone(),
            line: self.line.clone(),
            bite: self.bite.clone(),
            challenge: self.challenge.clone(),
            caught: self.caught.clone(),
        }
    }

    /// Ensure fish are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.fish.sort_by_key(|f| f.id);
    }
}

/// Everything the presenter draws in one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub generation: u32,
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub session: Session,
    pub boat_x: f32,
    pub fish: Vec<Fish>,
    pub line: FishingLine,
    pub bite: Option<BiteEvent>,
    pub challenge: Option<TimingChallenge>,
    pub caught: Option<CaughtFish>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
