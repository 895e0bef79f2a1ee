use {
    crate::map::TerritoryMap,
    bevy::prelude::*,
    territory_components::{ResourceYield, StructureKind, TerrainKind, Tile},
    wallet::{ResourceKind, Wallet},
};

/// Static definition of a placeable structure: what it costs and what one
/// placed unit produces per second before bonuses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureSpec {
    pub name: &'static str,
    pub energy_cost: f64,
    pub bio_matter_cost: f64,
    pub production: ResourceYield,
}

pub fn spec(kind: StructureKind) -> StructureSpec {
    match kind {
        StructureKind::Terraformer => StructureSpec {
            name: "Terraformer",
            energy_cost: 50.0,
            bio_matter_cost: 10.0,
            production: ResourceYield { bio_matter: 1.0, ..Default::default() },
        },
        StructureKind::BioFactory => StructureSpec {
            name: "Bio Factory",
            energy_cost: 200.0,
            bio_matter_cost: 50.0,
            production: ResourceYield { bio_matter: 5.0, ..Default::default() },
        },
        StructureKind::Extractor => StructureSpec {
            name: "Energy Extractor",
            energy_cost: 100.0,
            bio_matter_cost: 25.0,
            production: ResourceYield { energy: 10.0, ..Default::default() },
        },
        StructureKind::ResearchHub => StructureSpec {
            name: "Research Hub",
            energy_cost: 500.0,
            bio_matter_cost: 100.0,
            production: ResourceYield { energy: 2.0, bio_matter: 2.0, ..Default::default() },
        },
    }
}

/// Terrain/adjacency rule for placing `kind` on `tile`. The tile being
/// unlocked and empty is checked by the caller.
pub fn placement_allowed(map: &TerritoryMap, tile: &Tile, kind: StructureKind) -> bool {
    match kind {
        StructureKind::Terraformer => tile.terrain == TerrainKind::Barren,
        StructureKind::BioFactory => map
            .adjacent(tile.q, tile.r)
            .iter()
            .any(|t| t.terrain == TerrainKind::Water),
        StructureKind::Extractor => {
            tile.terrain == TerrainKind::Mountain || tile.terrain == TerrainKind::Crater
        }
        StructureKind::ResearchHub => true,
    }
}

/// Multiplier captured once at placement time from the tile and its
/// neighborhood. Always >= 1.0.
pub fn adjacency_bonus(map: &TerritoryMap, tile: &Tile, kind: StructureKind) -> f64 {
    let adjacent = map.adjacent(tile.q, tile.r);
    let near = |terrain: TerrainKind| adjacent.iter().any(|t| t.terrain == terrain);
    let mut bonus = 1.0;

    match kind {
        StructureKind::Extractor => {
            if near(TerrainKind::Volcano) {
                bonus += 0.5;
            }
            if tile.terrain == TerrainKind::DesertPlains {
                bonus += 0.2;
            }
        }
        StructureKind::BioFactory => {
            if near(TerrainKind::Forest) && near(TerrainKind::Water) {
                bonus += 0.6;
            } else if near(TerrainKind::Water) {
                bonus += 0.3;
            }
        }
        StructureKind::ResearchHub => {
            if near(TerrainKind::CrystalFields) {
                bonus += 0.4;
            }
        }
        StructureKind::Terraformer => {
            if tile.terrain == TerrainKind::Green {
                bonus += 0.3;
            }
        }
    }

    bonus
}

/// Bonus production a structure earns from the terrain it sits on, before
/// the adjacency multiplier.
fn terrain_yield(kind: StructureKind, terrain: TerrainKind) -> ResourceYield {
    match (kind, terrain) {
        (StructureKind::Extractor, TerrainKind::Volcano) => {
            ResourceYield { minerals: 2.0, ..Default::default() }
        }
        (StructureKind::Extractor, TerrainKind::Mountain) => {
            ResourceYield { minerals: 1.0, ..Default::default() }
        }
        (StructureKind::ResearchHub, TerrainKind::CrystalFields) => {
            ResourceYield { rare_crystals: 1.0, ..Default::default() }
        }
        _ => ResourceYield::default(),
    }
}

impl TerritoryMap {
    /// Places `kind` on (q, r). Fails without side effects if the tile is
    /// missing, locked, occupied, fails the placement rule, or the wallet
    /// cannot cover both costs. Costs are consumed as one transaction.
    pub fn place_structure(
        &mut self,
        q: i32,
        r: i32,
        kind: StructureKind,
        wallet: &mut Wallet,
    ) -> bool {
        let Some(tile) = self.tile(q, r) else {
            return false;
        };
        if !tile.unlocked || tile.structure.is_some() {
            return false;
        }
        if !placement_allowed(self, tile, kind) {
            return false;
        }

        let bonus = adjacency_bonus(self, tile, kind);
        let structure = spec(kind);
        let costs = [
            (ResourceKind::Energy, structure.energy_cost),
            (ResourceKind::BioMatter, structure.bio_matter_cost),
        ];
        if !wallet.debit_all(&costs) {
            return false;
        }

        if let Some(tile) = self.tiles.get_mut(&(q, r)) {
            tile.structure = Some(kind);
            tile.adjacency_bonus = bonus;
        }
        debug!(?kind, q, r, bonus, "Structure placed");
        true
    }

    /// Replays a placement from a save snapshot: same validation as
    /// `place_structure` but no cost, and the adjacency bonus is recomputed
    /// from terrain rather than trusted from the save.
    pub fn restore_structure(&mut self, q: i32, r: i32, kind: StructureKind) -> bool {
        let Some(tile) = self.tile(q, r) else {
            return false;
        };
        if !tile.unlocked || tile.structure.is_some() || !placement_allowed(self, tile, kind) {
            return false;
        }
        let bonus = adjacency_bonus(self, tile, kind);
        if let Some(tile) = self.tiles.get_mut(&(q, r)) {
            tile.structure = Some(kind);
            tile.adjacency_bonus = bonus;
        }
        true
    }

    /// Sums production over every placed structure: base rate times the
    /// stored adjacency bonus, plus terrain-specific bonus yields.
    pub fn total_production(&self) -> ResourceYield {
        let mut total = ResourceYield::default();
        for tile in self.tiles.values() {
            let Some(kind) = tile.structure else {
                continue;
            };
            let mut lane = spec(kind).production;
            lane.add(terrain_yield(kind, tile.terrain));
            lane.scale(tile.adjacency_bonus.max(1.0));
            total.add(lane);
        }
        total
    }

    /// Every placed structure, for the save snapshot.
    pub fn placed_structures(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values().filter(|t| t.structure.is_some())
    }

    /// Clears placements and re-locks everything outside the starting
    /// region. Terrain is untouched; it is a pure function of coordinates.
    pub fn reset(&mut self) {
        *self = Self::generate();
    }
}
