//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seedable randomness only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod bite;
pub mod challenge;
pub mod clock;
pub mod dice;
pub mod fish;
pub mod line;
pub mod schedule;
pub mod species;
pub mod state;
pub mod tick;

pub use bite::{BiteEvent, candidates_near, pick_striker, resolve_bite};
pub use challenge::{ChallengeOutcome, TargetWindow, TimingChallenge};
pub use clock::FrameClock;
pub use dice::{Dice, ScriptedDice};
pub use fish::{Fish, advance_population, spawn_population};
pub use line::{FishingLine, LineMode};
pub use schedule::{Deferred, Scheduler};
pub use species::{Species, SpeciesTraits};
pub use state::{CaughtFish, GameEvent, GamePhase, GameState, Session, Snapshot};
pub use tick::{MoveDirection, TickInput, attempt_catch, move_player, tick, toggle_line};
