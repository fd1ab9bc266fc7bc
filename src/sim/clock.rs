//! Fixed timestep driver
//!
//! Hosts hand over whatever wall-clock time a frame took; the clock turns it
//! into a whole number of `SIM_DT` ticks and carries the remainder.

use super::dice::Dice;
use super::state::GameState;
use super::tick::{TickInput, tick};
use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame we accept before clamping (tab in background, debugger...)
const MAX_FRAME_DT: f32 = 0.25;

/// Accumulates frame time and runs simulation substeps
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run as many fixed ticks as `frame_dt` covers. One-shot inputs
    /// (start, toggle, catch, move) apply to the first substep only.
    /// Returns the number of ticks run.
    pub fn update<D: Dice>(
        &mut self,
        state: &mut GameState<D>,
        input: &mut TickInput,
        frame_dt: f32,
    ) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.start = false;
            input.toggle_line = false;
            input.attempt_catch = false;
            input.move_dir = None;
        }
        substeps
    }

    /// Leftover time not yet simulated
    pub fn pending(&self) -> f32 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substeps_and_remainder() {
        let mut state = GameState::new(1);
        state.start_game();
        let mut clock = FrameClock::new();
        let mut input = TickInput::default();

        let steps = clock.update(&mut state, &mut input, SIM_DT * 2.5);
        assert_eq!(steps, 2);
        assert!(clock.pending() > 0.0 && clock.pending() < SIM_DT);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut state = GameState::new(1);
        state.start_game();
        let mut clock = FrameClock::new();
        let mut input = TickInput::default();

        let steps = clock.update(&mut state, &mut input, 5.0);
        assert_eq!(steps, MAX_SUBSTEPS);
    }

    #[test]
    fn test_one_shot_inputs_cleared() {
        let mut state = GameState::new(1);
        let mut clock = FrameClock::new();
        let mut input = TickInput {
            start: true,
            toggle_line: true,
            ..Default::default()
        };
        clock.update(&mut state, &mut input, SIM_DT * 1.5);
        assert!(state.is_playing());
        assert!(state.line.is_extending());
        assert!(!input.start);
        assert!(!input.toggle_line);
    }
}
