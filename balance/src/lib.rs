use serde::{Deserialize, Serialize};

pub trait GrowthStrategy {
    /// Calculate the raw (unfloored) value for a given level. Level 0 is the base.
    fn calculate(&self, level: u32) -> f64;

    /// Calculate the value floored to a whole number, the form every
    /// player-facing cost and output uses.
    fn calculate_floored(&self, level: u32) -> f64 {
        self.calculate(level).floor()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LinearGrowth {
    /// The starting value (at level 0)
    pub base: f64,
    /// The amount added per level
    pub increment: f64,
}

impl GrowthStrategy for LinearGrowth {
    fn calculate(&self, level: u32) -> f64 {
        self.base + (self.increment * level as f64)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExponentialGrowth {
    /// The starting value (at level 0)
    pub base: f64,
    /// The multiplier per level (e.g., 2.0 for doubling)
    pub factor: f64,
}

impl GrowthStrategy for ExponentialGrowth {
    fn calculate(&self, level: u32) -> f64 {
        self.base * self.factor.powi(level as i32)
    }
}

// The game's balance curves. Growth factors are deliberately staggered
// (1.15 up to 3.0) so the different sinks pace each other over a session.
pub const CLICK_OUTPUT: ExponentialGrowth = ExponentialGrowth { base: 1.0, factor: 1.5 };
pub const GENERATOR_OUTPUT: ExponentialGrowth = ExponentialGrowth { base: 1.0, factor: 1.8 };
pub const CLICK_UPGRADE_COST: ExponentialGrowth = ExponentialGrowth { base: 15.0, factor: 2.0 };
pub const GENERATOR_UPGRADE_COST: ExponentialGrowth = ExponentialGrowth { base: 100.0, factor: 3.0 };
pub const STRUCTURE_COST_FACTOR: f64 = 1.15;
pub const TERRAFORMER_COST: ExponentialGrowth = ExponentialGrowth { base: 500.0, factor: 1.6 };
pub const TERRAFORMER_OUTPUT: ExponentialGrowth = ExponentialGrowth { base: 2.0, factor: 1.3 };
pub const BIOMATTER_CONVERSION: LinearGrowth = LinearGrowth { base: 0.0, increment: 100.0 };

/// Energy gained per tap at the given amplifier level.
pub fn click_output(level: u32) -> f64 {
    CLICK_OUTPUT.calculate_floored(level)
}

/// Passive energy per second from the auto-generator. Level 0 means the
/// generator has not been activated yet and produces nothing.
pub fn generator_output(level: u32) -> f64 {
    if level == 0 {
        return 0.0;
    }
    GENERATOR_OUTPUT.calculate_floored(level)
}

pub fn click_upgrade_cost(level: u32) -> f64 {
    CLICK_UPGRADE_COST.calculate_floored(level)
}

pub fn generator_upgrade_cost(level: u32) -> f64 {
    GENERATOR_UPGRADE_COST.calculate_floored(level)
}

/// Cost of the next catalog structure given its base cost and how many are
/// already owned.
pub fn structure_cost(base_cost: f64, owned: u32) -> f64 {
    (base_cost * STRUCTURE_COST_FACTOR.powi(owned as i32)).floor()
}

/// Energy cost to synthesize `amount` units of BioMatter.
pub fn biomatter_conversion_cost(amount: f64) -> f64 {
    (BIOMATTER_CONVERSION.increment * amount).floor()
}

/// Energy cost of the next globally owned terraformer.
pub fn terraformer_cost(count: u32) -> f64 {
    TERRAFORMER_COST.calculate_floored(count)
}

/// BioMatter per second from the terraformer fleet. Zero while none are built.
pub fn terraformer_output(count: u32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    TERRAFORMER_OUTPUT.calculate_floored(count)
}
