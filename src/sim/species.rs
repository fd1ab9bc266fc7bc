//! Fish species and their balance table

use serde::{Deserialize, Serialize};

use super::dice::Dice;

/// Fish species, ordered by increasing size, value and rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Small,
    Medium,
    Large,
    Shark,
}

/// Per-species constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeciesTraits {
    /// Money credited on a successful catch
    pub value: u32,
    /// Rendered size (pixels)
    pub size: f32,
    /// Horizontal speed before spawn jitter
    pub base_speed_x: f32,
    /// Vertical swim amplitude before spawn jitter
    pub base_speed_y: f32,
    /// Chance of striking a hook in range. Bigger fish are warier.
    pub bite_chance: f32,
    /// Share of the spawn table (all weights sum to 1)
    pub spawn_weight: f32,
}

/// Table order is the cumulative draw order
const TRAITS: [(Species, SpeciesTraits); 4] = [
    (
        Species::Small,
        SpeciesTraits {
            value: 10,
            size: 20.0,
            base_speed_x: 2.0,
            base_speed_y: 1.0,
            bite_chance: 0.8,
            spawn_weight: 0.4,
        },
    ),
    (
        Species::Medium,
        SpeciesTraits {
            value: 25,
            size: 30.0,
            base_speed_x: 1.5,
            base_speed_y: 0.8,
            bite_chance: 0.6,
            spawn_weight: 0.3,
        },
    ),
    (
        Species::Large,
        SpeciesTraits {
            value: 50,
            size: 40.0,
            base_speed_x: 1.0,
            base_speed_y: 0.6,
            bite_chance: 0.4,
            spawn_weight: 0.2,
        },
    ),
    (
        Species::Shark,
        SpeciesTraits {
            value: 100,
            size: 60.0,
            base_speed_x: 0.8,
            base_speed_y: 0.4,
            bite_chance: 0.2,
            spawn_weight: 0.1,
        },
    ),
];

impl Species {
    pub const ALL: [Species; 4] = [Species::Small, Species::Medium, Species::Large, Species::Shark];

    #[inline]
    pub fn traits(self) -> &'static SpeciesTraits {
        &TRAITS[self as usize].1
    }

    pub fn value(self) -> u32 {
        self.traits().value
    }

    pub fn bite_chance(self) -> f32 {
        self.traits().bite_chance
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Small => "small",
            Species::Medium => "medium",
            Species::Large => "large",
            Species::Shark => "shark",
        }
    }

    /// Map a uniform draw onto the cumulative spawn table
    pub fn from_roll(roll: f32) -> Self {
        let mut acc = 0.0;
        for (species, traits) in &TRAITS {
            acc += traits.spawn_weight;
            if roll < acc {
                return *species;
            }
        }
        // Float slop at the top of the table lands on the rarest species
        Species::Shark
    }

    /// Weighted random species
    pub fn draw(dice: &mut impl Dice) -> Self {
        Self::from_roll(dice.unit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::dice::seeded;

    #[test]
    fn test_table_matches_enum_order() {
        for (i, (species, _)) in TRAITS.iter().enumerate() {
            assert_eq!(*species as usize, i);
        }
        let total: f32 = TRAITS.iter().map(|(_, t)| t.spawn_weight).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cumulative_boundaries() {
        assert_eq!(Species::from_roll(0.0), Species::Small);
        assert_eq!(Species::from_roll(0.39), Species::Small);
        assert_eq!(Species::from_roll(0.41), Species::Medium);
        assert_eq!(Species::from_roll(0.69), Species::Medium);
        assert_eq!(Species::from_roll(0.71), Species::Large);
        assert_eq!(Species::from_roll(0.89), Species::Large);
        assert_eq!(Species::from_roll(0.91), Species::Shark);
        assert_eq!(Species::from_roll(0.9999), Species::Shark);
    }

    #[test]
    fn test_value_and_bite_chance_are_inversely_ordered() {
        for pair in Species::ALL.windows(2) {
            assert!(pair[0].value() < pair[1].value());
            assert!(pair[0].bite_chance() > pair[1].bite_chance());
        }
    }

    #[test]
    fn test_draw_distribution_is_roughly_weighted() {
        let mut rng = seeded(2024);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            counts[Species::draw(&mut rng) as usize] += 1;
        }
        // 40 / 30 / 20 / 10 with generous slack
        assert!((3600..4400).contains(&counts[0]), "{counts:?}");
        assert!((2600..3400).contains(&counts[1]), "{counts:?}");
        assert!((1600..2400).contains(&counts[2]), "{counts:?}");
        assert!((700..1300).contains(&counts[3]), "{counts:?}");
    }
}
