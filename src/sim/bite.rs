//! Bite resolution
//!
//! When a cast is stopped, every fish close enough to the hook gets one
//! chance to strike, weighted by species. At most one fish bites per cast.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::fish::{Fish, remove_fish};

/// Frequency of the shaking line while a fish is on (radians per tick)
const INTENSITY_FREQ: f32 = 0.35;

/// A fish tugging at the hook, waiting to become a timing challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiteEvent {
    /// Detached copy; the fish is no longer in the population
    pub fish: Fish,
    /// 0..1 shake strength, for feedback only
    pub intensity: f32,
    pub active: bool,
    /// Ticks since the strike
    pub age_ticks: u32,
}

impl BiteEvent {
    pub fn new(fish: Fish) -> Self {
        Self {
            fish,
            intensity: 1.0,
            active: true,
            age_ticks: 0,
        }
    }

    /// Advance the feedback signal by one tick
    pub fn update(&mut self) {
        self.age_ticks += 1;
        self.intensity = (self.age_ticks as f32 * INTENSITY_FREQ).cos().abs();
    }
}

/// Ids of fish inside the bite square around `hook`, in population order
pub fn candidates_near(fish: &[Fish], hook: Vec2, radius: f32) -> Vec<u32> {
    fish.iter()
        .filter(|f| f.is_near(hook, radius))
        .map(|f| f.id)
        .collect()
}

/// Roll each candidate's bite chance and pick one striker among the takers.
///
/// One draw per candidate, in order, then one more draw to choose among the
/// successes (skipped when nobody bit).
pub fn pick_striker(fish: &[Fish], candidates: &[u32], dice: &mut impl Dice) -> Option<u32> {
    let takers: Vec<u32> = candidates
        .iter()
        .filter_map(|id| fish.iter().find(|f| f.id == *id))
        .filter(|f| dice.chance(f.species.bite_chance()))
        .map(|f| f.id)
        .collect();

    if takers.is_empty() {
        return None;
    }
    Some(takers[dice.pick(takers.len())])
}

/// Full bite check for a stopped cast. The striking fish is removed from
/// `fish` before this returns.
pub fn resolve_bite(
    fish: &mut Vec<Fish>,
    hook: Vec2,
    radius: f32,
    dice: &mut impl Dice,
) -> Option<Fish> {
    let candidates = candidates_near(fish, hook, radius);
    log::trace!("bite check at {hook:?}: {} candidate(s)", candidates.len());
    let id = pick_striker(fish, &candidates, dice)?;
    remove_fish(fish, id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dice::{ScriptedDice, seeded};
    use crate::sim::species::Species;

    fn fish(id: u32, species: Species, x: f32, y: f32) -> Fish {
        Fish {
            id,
            species,
            pos: Vec2::new(x, y),
            speed: Vec2::new(1.0, 1.0),
            dir: Vec2::new(1.0, 1.0),
            swim_angle: 0.0,
            value: species.value(),
            size: species.traits().size,
        }
    }

    #[test]
    fn test_candidates_use_open_square() {
        let pop = vec![
            fish(1, Species::Small, 400.0, 300.0),
            fish(2, Species::Small, 449.0, 349.0),
            fish(3, Species::Small, 450.0, 300.0),
            fish(4, Species::Small, 400.0, 350.0),
        ];
        let ids = candidates_near(&pop, Vec2::new(400.0, 300.0), 50.0);
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_nobody_bites() {
        let mut pop = vec![fish(1, Species::Small, 400.0, 300.0)];
        // 0.9 >= 0.8: the small fish declines
        let mut dice = ScriptedDice::new([0.9]);
        assert!(resolve_bite(&mut pop, Vec2::new(400.0, 300.0), 50.0, &mut dice).is_none());
        assert_eq!(pop.len(), 1);
        assert_eq!(dice.remaining(), 0);
    }

    #[test]
    fn test_uniform_choice_among_takers() {
        let mut pop = vec![
            fish(1, Species::Small, 400.0, 300.0),
            fish(2, Species::Shark, 410.0, 310.0),
            fish(3, Species::Medium, 390.0, 290.0),
        ];
        // small bites, shark declines, medium bites, then pick the second taker
        let mut dice = ScriptedDice::new([0.1, 0.5, 0.1, 0.75]);
        let struck = resolve_bite(&mut pop, Vec2::new(400.0, 300.0), 50.0, &mut dice).unwrap();
        assert_eq!(struck.id, 3);
        assert_eq!(pop.len(), 2);
        assert!(pop.iter().all(|f| f.id != 3));
    }

    #[test]
    fn test_out_of_range_fish_never_bite() {
        let mut pop = vec![fish(1, Species::Small, 100.0, 500.0)];
        let mut dice = ScriptedDice::new([0.0]);
        assert!(resolve_bite(&mut pop, Vec2::new(400.0, 300.0), 50.0, &mut dice).is_none());
        // No draw was consumed
        assert_eq!(dice.remaining(), 1);
    }

    #[test]
    fn test_at_most_one_strike_and_struck_fish_removed() {
        for seed in 0..200 {
            let mut rng = seeded(seed);
            let mut pop: Vec<Fish> = (0..8)
                .map(|i| fish(i, Species::ALL[i as usize % 4], 400.0 + i as f32, 300.0))
                .collect();
            let before = pop.len();
            let struck = resolve_bite(&mut pop, Vec2::new(400.0, 300.0), 50.0, &mut rng);
            match struck {
                Some(f) => {
                    assert_eq!(pop.len(), before - 1);
                    assert!(pop.iter().all(|p| p.id != f.id));
                }
                None => assert_eq!(pop.len(), before),
            }
        }
    }

    #[test]
    fn test_intensity_stays_in_unit_range() {
        let mut bite = BiteEvent::new(fish(1, Species::Small, 0.0, 300.0));
        for _ in 0..120 {
            bite.update();
            assert!((0.0..=1.0).contains(&bite.intensity));
        }
        assert_eq!(bite.age_ticks, 120);
    }
}
