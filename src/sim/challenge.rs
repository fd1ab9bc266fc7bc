//! Timing challenge (the catch minigame)
//!
//! A marker sweeps 0 -> 100 and jumps back to 0; the player has to click
//! while it sits inside the target window.

use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::fish::Fish;
use crate::consts::PROGRESS_MAX;

/// Window bounds are drawn as `base + U(0, spread)`
const WINDOW_START_BASE: f32 = 50.0;
const WINDOW_END_BASE: f32 = 70.0;
const WINDOW_SPREAD: f32 = 20.0;
/// Narrowest window we allow after sorting the two draws
pub const MIN_WINDOW_WIDTH: f32 = 2.0;

/// Inclusive target window on the progress bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetWindow {
    pub start: f32,
    pub end: f32,
}

impl TargetWindow {
    /// Build a window from two raw bounds. Inverted bounds are swapped and
    /// a too-narrow window is widened to `MIN_WINDOW_WIDTH`, so the result
    /// always satisfies `0 <= start < end <= 100`.
    pub fn normalized(a: f32, b: f32) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let mut start = lo.clamp(0.0, PROGRESS_MAX - MIN_WINDOW_WIDTH);
        let mut end = hi.clamp(0.0, PROGRESS_MAX);
        if end - start < MIN_WINDOW_WIDTH {
            end = (start + MIN_WINDOW_WIDTH).min(PROGRESS_MAX);
            start = end - MIN_WINDOW_WIDTH;
        }
        Self { start, end }
    }

    /// Roll a fresh window: start draw first, then end draw
    pub fn roll(dice: &mut impl Dice) -> Self {
        let start = WINDOW_START_BASE + dice.range(0.0, WINDOW_SPREAD);
        let end = WINDOW_END_BASE + dice.range(0.0, WINDOW_SPREAD);
        Self::normalized(start, end)
    }

    #[inline]
    pub fn contains(&self, progress: f32) -> bool {
        self.start <= progress && progress <= self.end
    }

    pub fn width(&self) -> f32 {
        self.end - self.start
    }
}

/// How a challenge ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChallengeOutcome {
    Caught,
    Escaped,
}

/// The contested fish and the sweeping marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingChallenge {
    pub active: bool,
    /// Detached copy of the hooked fish
    pub fish: Fish,
    pub progress: f32,
    pub window: TargetWindow,
    pub outcome: Option<ChallengeOutcome>,
}

impl TimingChallenge {
    pub fn new(fish: Fish, window: TargetWindow) -> Self {
        Self {
            active: true,
            fish,
            progress: 0.0,
            window,
            outcome: None,
        }
    }

    /// Open a challenge with a freshly rolled window
    pub fn open(fish: Fish, dice: &mut impl Dice) -> Self {
        Self::new(fish, TargetWindow::roll(dice))
    }

    /// Advance the marker; reaching the end of the bar wraps to 0
    pub fn advance(&mut self, step: f32) {
        if !self.active {
            return;
        }
        let next = self.progress + step;
        self.progress = if next >= PROGRESS_MAX { 0.0 } else { next };
    }

    /// Resolve on a click. The challenge is inactive afterwards either way.
    pub fn attempt(&mut self) -> Option<ChallengeOutcome> {
        if !self.active {
            return None;
        }
        let outcome = if self.window.contains(self.progress) {
            ChallengeOutcome::Caught
        } else {
            ChallengeOutcome::Escaped
        };
        self.active = false;
        self.outcome = Some(outcome);
        Some(outcome)
    }
}
