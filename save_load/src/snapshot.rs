use {
    achievements::AchievementState,
    phases::{DiscoveryLogState, PhaseTrack},
    prestige::PrestigeState,
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
    structures::StructureCatalog,
    territory::TerritoryMap,
    territory_components::StructureKind,
    upgrades::UpgradeLevels,
    wallet::Wallet,
};

/// A structure placed on the map, by coordinate. The adjacency bonus is not
/// stored; it is recomputed from terrain on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedStructure {
    pub q: i32,
    pub r: i32,
    pub kind: StructureKind,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrestigeSave {
    pub level: u32,
    pub points: u32,
    pub total_rebirths: u32,
    pub energy_multiplier: f64,
    pub click_multiplier: f64,
    pub production_multiplier: f64,
}

fn default_phase() -> String {
    "void".to_string()
}

/// The serializable projection of the whole game, the sole persistence
/// boundary. The three core numeric fields are mandatory; everything else
/// defaults so saves from older versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveData {
    pub energy: f64,
    pub click_upgrade_level: u32,
    pub generator_upgrade_level: u32,
    /// Milliseconds since the Unix epoch at write time.
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub bio_matter: f64,
    #[serde(default)]
    pub terraformer_count: u32,
    #[serde(default)]
    pub discovered_logs: Vec<String>,
    #[serde(default)]
    pub minerals: f64,
    #[serde(default)]
    pub rare_crystals: f64,
    #[serde(default)]
    pub unlocked_tiles: u32,
    #[serde(default = "default_phase")]
    pub current_phase: String,
    #[serde(default)]
    pub structures_owned: BTreeMap<String, u32>,
    #[serde(default)]
    pub placed_structures: Vec<PlacedStructure>,
    #[serde(default)]
    pub prestige: PrestigeSave,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            energy: 0.0,
            click_upgrade_level: 0,
            generator_upgrade_level: 0,
            timestamp: 0,
            achievements: Vec::new(),
            bio_matter: 0.0,
            terraformer_count: 0,
            discovered_logs: Vec::new(),
            minerals: 0.0,
            rare_crystals: 0.0,
            unlocked_tiles: 0,
            current_phase: default_phase(),
            structures_owned: BTreeMap::new(),
            placed_structures: Vec::new(),
            prestige: PrestigeSave::default(),
        }
    }
}

impl SaveData {
    /// The three mandatory fields must be finite and non-negative; anything
    /// else means the snapshot is corrupt and must not be applied.
    pub fn is_valid(&self) -> bool {
        self.energy.is_finite() && self.energy >= 0.0
    }

    /// Projects the current game state into a snapshot.
    pub fn collect(
        timestamp: i64,
        wallet: &Wallet,
        levels: &UpgradeLevels,
        catalog: &StructureCatalog,
        map: &TerritoryMap,
        achievements: &AchievementState,
        prestige: &PrestigeState,
        phases: &PhaseTrack,
        logs: &DiscoveryLogState,
    ) -> Self {
        Self {
            energy: wallet.energy,
            click_upgrade_level: levels.click_level,
            generator_upgrade_level: levels.generator_level,
            timestamp,
            achievements: achievements.unlocked.clone(),
            bio_matter: wallet.bio_matter,
            terraformer_count: levels.terraformer_count,
            discovered_logs: logs.discovered_ids(),
            minerals: wallet.minerals,
            rare_crystals: wallet.rare_crystals,
            unlocked_tiles: map.unlocked_count(),
            current_phase: phases.current.clone(),
            structures_owned: catalog
                .entries
                .iter()
                .filter(|e| e.owned > 0)
                .map(|e| (e.id.clone(), e.owned))
                .collect(),
            placed_structures: map
                .placed_structures()
                .filter_map(|t| t.structure.map(|kind| PlacedStructure { q: t.q, r: t.r, kind }))
                .collect(),
            prestige: PrestigeSave {
                level: prestige.level,
                points: prestige.points,
                total_rebirths: prestige.total_rebirths,
                energy_multiplier: prestige.energy_multiplier,
                click_multiplier: prestige.click_multiplier,
                production_multiplier: prestige.production_multiplier,
            },
        }
    }

    /// Applies a snapshot onto fresh-default resources. Numeric fields are
    /// clamped rather than trusted; the map is regenerated deterministically
    /// and placements are replayed with bonuses recomputed from terrain.
    pub fn apply(
        &self,
        wallet: &mut Wallet,
        levels: &mut UpgradeLevels,
        catalog: &mut StructureCatalog,
        map: &mut TerritoryMap,
        achievements: &mut AchievementState,
        prestige: &mut PrestigeState,
        phases: &mut PhaseTrack,
        logs: &mut DiscoveryLogState,
    ) {
        let sanitize = |value: f64| if value.is_finite() && value > 0.0 { value } else { 0.0 };
        wallet.energy = sanitize(self.energy);
        wallet.bio_matter = sanitize(self.bio_matter);
        wallet.minerals = sanitize(self.minerals);
        wallet.rare_crystals = sanitize(self.rare_crystals);

        levels.click_level = self.click_upgrade_level;
        levels.generator_level = self.generator_upgrade_level;
        levels.terraformer_count = self.terraformer_count;

        for entry in &mut catalog.entries {
            entry.owned = self.structures_owned.get(&entry.id).copied().unwrap_or(0);
        }

        *map = TerritoryMap::generate();
        map.unlock_for_biomatter(wallet.bio_matter);
        map.restore_unlocked(self.unlocked_tiles);
        for placed in &self.placed_structures {
            // Replay without cost; the save already paid for these. A
            // tampered entry that fails its placement rule is dropped.
            if !map.restore_structure(placed.q, placed.r, placed.kind) {
                bevy::log::warn!(
                    q = placed.q,
                    r = placed.r,
                    kind = ?placed.kind,
                    "Dropping invalid placed structure from save"
                );
            }
        }

        achievements.unlocked = self.achievements.clone();
        achievements.multiplier = AchievementState::rebuild_multiplier(&achievements.unlocked);

        let clamp_multiplier = |value: f64| if value.is_finite() && value >= 1.0 { value } else { 1.0 };
        prestige.level = self.prestige.level;
        prestige.points = self.prestige.points;
        prestige.total_rebirths = self.prestige.total_rebirths;
        prestige.energy_multiplier = clamp_multiplier(self.prestige.energy_multiplier);
        prestige.click_multiplier = clamp_multiplier(self.prestige.click_multiplier);
        prestige.production_multiplier = clamp_multiplier(self.prestige.production_multiplier);

        phases.restore(&self.current_phase);
        logs.restore(&self.discovered_logs);
    }
}
