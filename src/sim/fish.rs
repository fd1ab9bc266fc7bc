//! Fish population: spawning and swimming
//!
//! Fish swim horizontally at constant speed and bob vertically along a sine
//! of their swim phase. Hitting an edge of the water flips that axis and pins
//! the fish to the edge in the same step, so nothing ever leaves the field.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::species::Species;
use crate::consts::*;

/// Extra horizontal speed a fish may roll at spawn
pub const SPEED_JITTER_X: f32 = 0.5;
/// Extra vertical speed a fish may roll at spawn
pub const SPEED_JITTER_Y: f32 = 0.3;

/// A live fish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fish {
    pub id: u32,
    pub species: Species,
    pub pos: Vec2,
    /// Per-axis speed magnitude (pixels per frame)
    pub speed: Vec2,
    /// Per-axis direction sign, each component is -1 or +1
    pub dir: Vec2,
    /// Phase driving the vertical bob
    pub swim_angle: f32,
    pub value: u32,
    pub size: f32,
}

impl Fish {
    /// Roll a new fish. Draw order: species, x, y, speed x, speed y, dir x,
    /// dir y, phase.
    pub fn spawn(id: u32, dice: &mut impl Dice) -> Self {
        let species = Species::draw(dice);
        let traits = species.traits();

        let x = dice.range(0.0, FIELD_WIDTH);
        let y = dice.range(WATER_TOP, WATER_TOP + SPAWN_DEPTH);
        let speed_x = traits.base_speed_x + dice.range(0.0, SPEED_JITTER_X);
        let speed_y = traits.base_speed_y + dice.range(0.0, SPEED_JITTER_Y);
        let dir_x = dice.sign();
        let dir_y = dice.sign();
        let swim_angle = dice.range(0.0, std::f32::consts::TAU);

        Self {
            id,
            species,
            pos: Vec2::new(x, y),
            speed: Vec2::new(speed_x, speed_y),
            dir: Vec2::new(dir_x, dir_y),
            swim_angle,
            value: traits.value,
            size: traits.size,
        }
    }

    /// Advance by `frames` reference frames (1.0 at `SIM_DT`)
    pub fn swim(&mut self, frames: f32) {
        let mut x = self.pos.x + self.speed.x * self.dir.x * frames;
        let mut y = self.pos.y + self.speed.y * self.dir.y * self.swim_angle.sin() * frames;
        self.swim_angle += SWIM_PHASE_STEP * frames;

        if x <= 0.0 || x >= FIELD_WIDTH {
            self.dir.x = -self.dir.x;
            x = x.clamp(0.0, FIELD_WIDTH);
        }
        if y <= WATER_TOP || y >= WATER_BOTTOM {
            self.dir.y = -self.dir.y;
            y = y.clamp(WATER_TOP, WATER_BOTTOM);
        }

        self.pos = Vec2::new(x, y);
    }

    /// Whether the fish is inside the square of half-extent `radius` around `hook`
    #[inline]
    pub fn is_near(&self, hook: Vec2, radius: f32) -> bool {
        (self.pos.x - hook.x).abs() < radius && (self.pos.y - hook.y).abs() < radius
    }
}

/// Spawn `count` fish with ids starting at `first_id`
pub fn spawn_population(count: usize, first_id: u32, dice: &mut impl Dice) -> Vec<Fish> {
    (0..count)
        .map(|i| Fish::spawn(first_id + i as u32, dice))
        .collect()
}

/// Move every fish one step
pub fn advance_population(fish: &mut [Fish], dt: f32) {
    let frames = dt / SIM_DT;
    for f in fish.iter_mut() {
        f.swim(frames);
    }
}

/// Take a fish out of the population by id
pub fn remove_fish(fish: &mut Vec<Fish>, id: u32) -> Option<Fish> {
    let idx = fish.iter().position(|f| f.id == id)?;
    Some(fish.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dice::{ScriptedDice, seeded};
    use proptest::prelude::*;

    fn fish_at(x: f32, y: f32, dir: Vec2) -> Fish {
        Fish {
            id: 1,
            species: Species::Small,
            pos: Vec2::new(x, y),
            speed: Vec2::new(2.0, 1.0),
            dir,
            swim_angle: std::f32::consts::FRAC_PI_2,
            value: 10,
            size: 20.0,
        }
    }

    #[test]
    fn test_spawn_uses_table_and_jitter() {
        // species, x, y, jx, jy, dir x, dir y, phase
        let mut dice = ScriptedDice::new([0.95, 0.5, 0.5, 0.5, 0.5, 0.9, 0.1, 0.0]);
        let fish = Fish::spawn(7, &mut dice);
        assert_eq!(fish.id, 7);
        assert_eq!(fish.species, Species::Shark);
        assert_eq!(fish.value, 100);
        assert_eq!(fish.size, 60.0);
        assert_eq!(fish.pos, Vec2::new(375.0, 420.0));
        assert!((fish.speed.x - 1.05).abs() < 1e-5);
        assert!((fish.speed.y - 0.55).abs() < 1e-5);
        assert_eq!(fish.dir, Vec2::new(1.0, -1.0));
        assert_eq!(fish.swim_angle, 0.0);
    }

    #[test]
    fn test_population_size_and_ids() {
        let mut rng = seeded(1);
        let fish = spawn_population(15, 1, &mut rng);
        assert_eq!(fish.len(), 15);
        for (i, f) in fish.iter().enumerate() {
            assert_eq!(f.id, i as u32 + 1);
            assert!(f.pos.x >= 0.0 && f.pos.x <= FIELD_WIDTH);
            assert!(f.pos.y >= WATER_TOP && f.pos.y <= WATER_BOTTOM);
        }
    }

    #[test]
    fn test_right_wall_reflects_without_overshoot() {
        let mut f = fish_at(749.0, 400.0, Vec2::new(1.0, 1.0));
        f.swim(1.0);
        assert_eq!(f.pos.x, FIELD_WIDTH);
        assert_eq!(f.dir.x, -1.0);

        f.swim(1.0);
        assert!(f.pos.x < FIELD_WIDTH);
    }

    #[test]
    fn test_left_wall_reflects() {
        let mut f = fish_at(1.0, 400.0, Vec2::new(-1.0, 1.0));
        f.swim(1.0);
        assert_eq!(f.pos.x, 0.0);
        assert_eq!(f.dir.x, 1.0);
    }

    #[test]
    fn test_water_bounds_reflect() {
        // sin(pi/2) = 1, so the full vertical speed applies
        let mut f = fish_at(300.0, 579.5, Vec2::new(1.0, 1.0));
        f.swim(1.0);
        assert_eq!(f.pos.y, WATER_BOTTOM);
        assert_eq!(f.dir.y, -1.0);

        let mut f = fish_at(300.0, 280.5, Vec2::new(1.0, -1.0));
        f.swim(1.0);
        assert_eq!(f.pos.y, WATER_TOP);
        assert_eq!(f.dir.y, 1.0);
    }

    #[test]
    fn test_phase_advances_each_frame() {
        let mut f = fish_at(300.0, 400.0, Vec2::new(1.0, 1.0));
        let before = f.swim_angle;
        f.swim(1.0);
        assert!((f.swim_angle - before - SWIM_PHASE_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_remove_fish() {
        let mut rng = seeded(3);
        let mut fish = spawn_population(3, 10, &mut rng);
        let taken = remove_fish(&mut fish, 11).unwrap();
        assert_eq!(taken.id, 11);
        assert_eq!(fish.len(), 2);
        assert!(remove_fish(&mut fish, 11).is_none());
    }

    proptest! {
        #[test]
        fn prop_population_stays_in_bounds(seed in any::<u64>(), ticks in 1usize..2000) {
            let mut rng = seeded(seed);
            let mut fish = spawn_population(15, 1, &mut rng);
            for _ in 0..ticks {
                let before: Vec<Vec2> = fish.iter().map(|f| f.dir).collect();
                advance_population(&mut fish, SIM_DT);
                for (f, old_dir) in fish.iter().zip(before) {
                    prop_assert!(f.pos.x >= 0.0 && f.pos.x <= FIELD_WIDTH);
                    prop_assert!(f.pos.y >= WATER_TOP && f.pos.y <= WATER_BOTTOM);
                    // A flipped axis means the fish is pinned to that edge
                    if f.dir.x != old_dir.x {
                        prop_assert!(f.pos.x == 0.0 || f.pos.x == FIELD_WIDTH);
                    }
                    if f.dir.y != old_dir.y {
                        prop_assert!(f.pos.y == WATER_TOP || f.pos.y == WATER_BOTTOM);
                    }
                }
            }
        }
    }
}
