//! Game balance
//!
//! Every number a designer might want to tweak without touching code.
//! `Tuning::default()` is the reference balancing; a JSON file can override
//! any subset of fields.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Data-driven balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Money the player starts every game with
    pub starting_money: u32,
    /// Countdown length (seconds)
    pub time_budget_secs: u32,
    /// Fish spawned at game start
    pub population: usize,

    // === Boat ===
    /// Horizontal distance covered by one move intent
    pub boat_step: f32,

    // === Line ===
    /// Deepest the hook can go below the surface
    pub line_max_length: f32,
    /// Length gained per line step while extending
    pub line_extend_step: f32,
    /// Length lost per line step while retracting
    pub line_retract_step: f32,
    /// Seconds between line steps
    pub line_step_secs: f32,
    /// Pause between stopping the cast and reeling in
    pub retract_hold_secs: f32,
    /// Half-extent of the square around the hook in which fish can bite
    pub bite_radius: f32,

    // === Bite / catch ===
    /// Time a bite shakes the line before the timing challenge opens
    pub bite_delay_secs: f32,
    /// Progress gained per frame during the timing challenge
    pub progress_step: f32,
    /// How long the caught fish stays on display
    pub caught_display_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_money: 120,
            time_budget_secs: 137,
            population: 15,

            boat_step: 15.0,

            line_max_length: 350.0,
            line_extend_step: 8.0,
            line_retract_step: 12.0,
            line_step_secs: 0.05,
            retract_hold_secs: 0.5,
            bite_radius: 50.0,

            bite_delay_secs: 0.75,
            progress_step: 2.0,
            caught_display_secs: 1.0,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy for dumping the defaults)
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.time_budget_secs == 0 {
            return invalid("time_budget_secs", "must be at least one second");
        }
        if !(self.line_max_length > 0.0) {
            return invalid("line_max_length", "must be positive");
        }
        if !(self.line_extend_step > 0.0) {
            return invalid("line_extend_step", "must be positive");
        }
        if !(self.line_retract_step > 0.0) {
            return invalid("line_retract_step", "must be positive");
        }
        if !(self.line_step_secs > 0.0) {
            return invalid("line_step_secs", "must be positive");
        }
        if !(self.progress_step > 0.0 && self.progress_step < crate::consts::PROGRESS_MAX) {
            return invalid("progress_step", "must be in (0, 100)");
        }
        if !(self.bite_radius > 0.0) {
            return invalid("bite_radius", "must be positive");
        }
        if !(self.boat_step > 0.0) {
            return invalid("boat_step", "must be positive");
        }
        for (field, value) in [
            ("retract_hold_secs", self.retract_hold_secs),
            ("bite_delay_secs", self.bite_delay_secs),
            ("caught_display_secs", self.caught_display_secs),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return invalid(field, "must be a finite, non-negative duration");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reference_balancing() {
        let t = Tuning::default();
        assert_eq!(t.starting_money, 120);
        assert_eq!(t.time_budget_secs, 137);
        assert_eq!(t.population, 15);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "starting_money": 500, "population": 4 }"#).unwrap();
        assert_eq!(t.starting_money, 500);
        assert_eq!(t.population, 4);
        assert_eq!(t.time_budget_secs, 137);
        assert_eq!(t.line_max_length, 350.0);
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Tuning::from_json(r#"{ "progress_step": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "progress_step",
                ..
            }
        ));

        let err = Tuning::from_json(r#"{ "time_budget_secs": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "time_budget_secs",
                ..
            }
        ));
    }

    #[test]
    fn test_json_roundtrip_of_defaults() {
        let json = Tuning::default().to_json();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }
}
