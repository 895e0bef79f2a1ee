use {
    balance::{ExponentialGrowth, GrowthStrategy},
    bevy::prelude::*,
    std::collections::BTreeMap,
    territory_components::{TerrainKind, Tile},
    wallet::ResourceKind,
};

pub const GRID_SIZE: i32 = 20;
/// Manhattan radius around the center that starts unlocked.
pub const STARTING_RADIUS: i32 = 2;

const CENTER: i32 = GRID_SIZE / 2;

/// Axial hex neighborhood.
const HEX_DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Cumulative BioMatter milestones and the unlock radius each grants.
/// The last milestone opens the whole map.
const BIOMATTER_UNLOCK_RADII: [(f64, i32); 5] = [
    (100.0, 3),
    (500.0, 4),
    (1_000.0, 5),
    (2_000.0, 6),
    (5_000.0, GRID_SIZE),
];

/// Number of unlocked tiles per expansion cost tier.
const EXPANSION_TILES_PER_TIER: u32 = 25;

const EXPANSION_ENERGY_COST: ExponentialGrowth = ExponentialGrowth { base: 500.0, factor: 1.5 };
const EXPANSION_BIOMATTER_COST: ExponentialGrowth = ExponentialGrowth { base: 100.0, factor: 1.3 };
const EXPANSION_MINERAL_COST: ExponentialGrowth = ExponentialGrowth { base: 50.0, factor: 1.4 };

/// The tile grid. A BTreeMap keyed by (q, r) keeps iteration order fixed so
/// production sums and save output are reproducible run to run.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource, Default)]
pub struct TerritoryMap {
    pub tiles: BTreeMap<(i32, i32), Tile>,
}

impl Default for TerritoryMap {
    fn default() -> Self {
        Self::generate()
    }
}

/// Terrain is a pure function of the coordinate, so regenerating the map
/// always reproduces the same world.
fn terrain_for(q: i32, r: i32) -> TerrainKind {
    if distance_from_center(q, r) <= STARTING_RADIUS {
        return TerrainKind::Barren;
    }
    let roll = (q * 7 + r * 13).abs() % 100;
    match roll {
        0..12 => TerrainKind::Water,
        12..22 => TerrainKind::Mountain,
        22..32 => TerrainKind::Crater,
        32..37 => TerrainKind::Volcano,
        37..42 => TerrainKind::CrystalFields,
        42..52 => TerrainKind::DesertPlains,
        52..60 => TerrainKind::Green,
        60..68 => TerrainKind::Forest,
        _ => TerrainKind::Barren,
    }
}

pub(crate) fn distance_from_center(q: i32, r: i32) -> i32 {
    (q - CENTER).abs() + (r - CENTER).abs()
}

impl TerritoryMap {
    pub fn generate() -> Self {
        let mut tiles = BTreeMap::new();
        for q in 0..GRID_SIZE {
            for r in 0..GRID_SIZE {
                let unlocked = distance_from_center(q, r) <= STARTING_RADIUS;
                tiles.insert(
                    (q, r),
                    Tile {
                        q,
                        r,
                        terrain: terrain_for(q, r),
                        structure: None,
                        unlocked,
                        adjacency_bonus: 1.0,
                    },
                );
            }
        }
        Self { tiles }
    }

    pub fn tile(&self, q: i32, r: i32) -> Option<&Tile> {
        self.tiles.get(&(q, r))
    }

    pub fn adjacent(&self, q: i32, r: i32) -> Vec<&Tile> {
        HEX_DIRECTIONS
            .iter()
            .filter_map(|&(dq, dr)| self.tiles.get(&(q + dq, r + dr)))
            .collect()
    }

    pub fn unlocked_count(&self) -> u32 {
        self.tiles.values().filter(|t| t.unlocked).count() as u32
    }

    fn max_unlocked_distance(&self) -> i32 {
        self.tiles
            .values()
            .filter(|t| t.unlocked)
            .map(|t| distance_from_center(t.q, t.r))
            .max()
            .unwrap_or(0)
    }

    /// Unlocks every locked tile within `radius` of the center. Returns how
    /// many tiles newly opened.
    pub fn unlock_within(&mut self, radius: i32) -> u32 {
        let mut opened = 0;
        for tile in self.tiles.values_mut() {
            if !tile.unlocked && distance_from_center(tile.q, tile.r) <= radius {
                tile.unlocked = true;
                opened += 1;
            }
        }
        opened
    }

    /// Applies the cumulative BioMatter milestones. Unlocking is monotonic:
    /// milestones already passed never re-lock anything.
    pub fn unlock_for_biomatter(&mut self, bio_matter: f64) -> u32 {
        let mut radius = STARTING_RADIUS;
        for &(threshold, milestone_radius) in &BIOMATTER_UNLOCK_RADII {
            if bio_matter >= threshold {
                radius = milestone_radius;
            }
        }
        if radius <= STARTING_RADIUS {
            return 0;
        }
        self.unlock_within(radius)
    }

    /// True if a paid expansion would open at least one tile.
    pub fn can_expand(&self) -> bool {
        let next = self.max_unlocked_distance() + 1;
        self.tiles
            .values()
            .any(|t| !t.unlocked && distance_from_center(t.q, t.r) == next)
    }

    /// Opens exactly the next Manhattan ring beyond the unlocked boundary.
    /// Payment is the caller's concern; this only flips tiles.
    pub fn expand_ring(&mut self) -> bool {
        let next = self.max_unlocked_distance() + 1;
        let mut opened = false;
        for tile in self.tiles.values_mut() {
            if !tile.unlocked && distance_from_center(tile.q, tile.r) == next {
                tile.unlocked = true;
                opened = true;
            }
        }
        opened
    }

    /// Cost of the next paid expansion. Scales geometrically every 25
    /// unlocked tiles.
    pub fn expansion_cost(&self) -> [(ResourceKind, f64); 3] {
        let tier = self.unlocked_count() / EXPANSION_TILES_PER_TIER;
        [
            (ResourceKind::Energy, EXPANSION_ENERGY_COST.calculate_floored(tier)),
            (ResourceKind::BioMatter, EXPANSION_BIOMATTER_COST.calculate_floored(tier)),
            (ResourceKind::Minerals, EXPANSION_MINERAL_COST.calculate_floored(tier)),
        ]
    }

    /// Re-opens rings outward until at least `count` tiles are unlocked.
    /// Used when restoring a save that only records the unlocked total.
    pub fn restore_unlocked(&mut self, count: u32) {
        while self.unlocked_count() < count {
            if !self.expand_ring() {
                break;
            }
        }
    }
}
