use rand::Rng;
use thiserror::Error;

/// Errors reported when a [`Config`] is rejected before the simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("split_count must be at least 3, got {0}")]
    SplitCountTooSmall(usize),

    #[error("initial_frame_count must be at least 2, got {0}")]
    FrameCountTooSmall(usize),

    #[error("{name} range is inverted: min {min} > max {max}")]
    InvertedRange {
        name: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },

    #[error("growth_velocity must be positive, got {0}")]
    NonPositiveVelocity(f32),
}

/// A closed interval sampled uniformly, used for per-segment variation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RandomRange {
    pub min: f32,
    pub max: f32,
}

impl RandomRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draws a value uniformly from `[min, max]`.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.random_range(self.min..=self.max)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Radial resolution of every ring. At least 3.
    pub split_count: usize,
    /// Number of rings (= segments) the simulation starts with. At least 2.
    pub initial_frame_count: usize,
    /// Sampled maximum extrusion length per segment.
    pub length: RandomRange,
    /// Sampled ring radius per segment.
    pub radius: RandomRange,
    /// Growth value assigned to the initial segments, in [0, 1].
    pub initial_growth: f32,
    /// Growth added per second of simulated time.
    pub growth_velocity: f32,
    /// Growth level at which a terminal segment spawns a child, in [0, 1].
    pub spawn_threshold: f32,
    /// Seed for the simulation's random generator. Same seed, same cactus.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            split_count: 8,
            initial_frame_count: 2,
            length: RandomRange::new(1.0, 2.0),
            radius: RandomRange::new(0.4, 0.6),
            initial_growth: 0.0,
            growth_velocity: 0.2,
            spawn_threshold: 0.5,
            seed: 0,
        }
    }
}

impl Config {
    /// Checks every field, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.split_count < 3 {
            return Err(ConfigError::SplitCountTooSmall(self.split_count));
        }
        if self.initial_frame_count < 2 {
            return Err(ConfigError::FrameCountTooSmall(self.initial_frame_count));
        }
        self.length.validate("length")?;
        self.radius.validate("radius")?;
        for (name, value) in [
            ("initial_growth", self.initial_growth),
            ("spawn_threshold", self.spawn_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfUnitRange { name, value });
            }
        }
        if self.growth_velocity <= 0.0 {
            return Err(ConfigError::NonPositiveVelocity(self.growth_velocity));
        }
        Ok(())
    }
}
