//! Fishing line controller
//!
//! `Idle -> Extending -> Retracting -> Idle`. The line only moves on line
//! steps (a slower cadence than the frame tick). A cast is stopped by a
//! second press; the line never stops extending on its own, it just rests at
//! full length until the player reels in. Retraction never lengthens the
//! line: it holds during the post-stop pause, then shrinks every step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WATER_SURFACE_Y;

/// What the line is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineMode {
    #[default]
    Idle,
    Extending,
    /// Coming back up. With `reeling == false` the line holds still (the
    /// short pause after the cast is stopped); length only drops once
    /// `reeling` is set.
    Retracting { reeling: bool },
}

/// The hook line hanging from the boat
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FishingLine {
    /// Depth of the hook below the surface. Zero exactly when idle.
    pub length: f32,
    pub mode: LineMode,
}

impl FishingLine {
    pub fn is_idle(&self) -> bool {
        self.mode == LineMode::Idle
    }

    pub fn is_extending(&self) -> bool {
        self.mode == LineMode::Extending
    }

    pub fn is_retracting(&self) -> bool {
        matches!(self.mode, LineMode::Retracting { .. })
    }

    /// Hook position for a boat at `boat_x`
    pub fn hook(&self, boat_x: f32) -> Vec2 {
        Vec2::new(boat_x, WATER_SURFACE_Y + self.length)
    }

    /// Start a cast. The first step is taken immediately so a non-idle line
    /// is never at zero length.
    pub fn cast(&mut self, extend_step: f32, max_length: f32) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.mode = LineMode::Extending;
        self.length = extend_step.min(max_length);
        true
    }

    /// Stop extending. Returns the length at the moment of the stop.
    pub fn stop(&mut self) -> Option<f32> {
        if !self.is_extending() {
            return None;
        }
        self.mode = LineMode::Retracting { reeling: false };
        Some(self.length)
    }

    /// End the hold after a stopped cast
    pub fn begin_reel(&mut self) {
        if let LineMode::Retracting { reeling } = &mut self.mode {
            *reeling = true;
        }
    }

    /// One line step. Extending grows up to `max_length`; reeling shrinks to
    /// zero and then goes idle.
    pub fn step(&mut self, extend_step: f32, retract_step: f32, max_length: f32) {
        match self.mode {
            LineMode::Idle => {}
            LineMode::Extending => {
                self.length = (self.length + extend_step).min(max_length);
            }
            LineMode::Retracting { reeling: false } => {}
            LineMode::Retracting { reeling: true } => {
                self.length = (self.length - retract_step).max(0.0);
                if self.length <= 0.0 {
                    self.reset();
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.length = 0.0;
        self.mode = LineMode::Idle;
    }
}
