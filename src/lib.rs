//! Reel Rush - An arcade fishing game against the clock
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fish, line, bites, catch minigame, session)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one animation frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Simulation ticks per second of game time
    pub const TICKS_PER_SECOND: u64 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field (pixels). Fish live in the water band below the surface.
    pub const FIELD_WIDTH: f32 = 750.0;
    pub const WATER_TOP: f32 = 280.0;
    pub const WATER_BOTTOM: f32 = 580.0;
    /// Spawn band height (fish start in [WATER_TOP, WATER_TOP + SPAWN_DEPTH))
    pub const SPAWN_DEPTH: f32 = 280.0;
    /// Where the line leaves the boat
    pub const WATER_SURFACE_Y: f32 = 220.0;

    /// Boat travel limits: a move is accepted only while strictly inside these
    pub const BOAT_MIN_X: f32 = 80.0;
    pub const BOAT_MAX_X: f32 = 720.0;
    pub const BOAT_START_X: f32 = 400.0;

    /// Phase added to every fish's swim angle per frame
    pub const SWIM_PHASE_STEP: f32 = 0.02;

    /// Timing challenge progress domain
    pub const PROGRESS_MAX: f32 = 100.0;
}

/// Convert a duration in seconds to whole simulation ticks (at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    ((secs * consts::TICKS_PER_SECOND as f32).round() as u64).max(1)
}

/// Format a countdown as `m:ss`
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_to_ticks() {
        assert_eq!(secs_to_ticks(0.5), 30);
        assert_eq!(secs_to_ticks(1.0), 60);
        assert_eq!(secs_to_ticks(0.05), 3);
        assert_eq!(secs_to_ticks(0.0), 1);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(137), "2:17");
        assert_eq!(format_clock(5), "0:05");
        assert_eq!(format_clock(0), "0:00");
    }
}
