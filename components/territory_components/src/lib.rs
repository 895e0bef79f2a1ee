use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

/// Terrain assigned once at map generation and never changed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum TerrainKind {
    Barren,
    Water,
    Mountain,
    Crater,
    Green,
    Forest,
    Volcano,
    CrystalFields,
    DesertPlains,
}

/// Structures that can be placed on a map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum StructureKind {
    Terraformer,
    BioFactory,
    Extractor,
    ResearchHub,
}

impl StructureKind {
    pub const ALL: [StructureKind; 4] = [
        StructureKind::Terraformer,
        StructureKind::BioFactory,
        StructureKind::Extractor,
        StructureKind::ResearchHub,
    ];
}

/// One cell of the map grid. Axial (q, r) addressing; `unlocked` only ever
/// flips false -> true and a structure is set at most once.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Tile {
    pub q: i32,
    pub r: i32,
    pub terrain: TerrainKind,
    pub structure: Option<StructureKind>,
    pub unlocked: bool,
    /// Multiplier (>= 1.0) captured at placement time from neighboring terrain.
    pub adjacency_bonus: f64,
}

/// Per-second production rates, one lane per resource pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct ResourceYield {
    pub energy: f64,
    pub bio_matter: f64,
    pub minerals: f64,
    pub rare_crystals: f64,
}

impl ResourceYield {
    pub fn add(&mut self, other: ResourceYield) {
        self.energy += other.energy;
        self.bio_matter += other.bio_matter;
        self.minerals += other.minerals;
        self.rare_crystals += other.rare_crystals;
    }

    pub fn scale(&mut self, factor: f64) {
        self.energy *= factor;
        self.bio_matter *= factor;
        self.minerals *= factor;
        self.rare_crystals *= factor;
    }
}
