//! Persistence for the whole game: a single JSON snapshot on disk,
//! autosaved on a timer, loaded (or initialized fresh) on boot, with
//! catch-up earnings for time spent away and a base64 export token for
//! manual backups.

mod offline;
mod snapshot;
mod token;

pub use {
    offline::{MAX_OFFLINE_HOURS, MIN_OFFLINE_SECONDS, calculate_offline_earnings},
    snapshot::{PlacedStructure, PrestigeSave, SaveData},
    token::{export_save, import_save},
};

use {
    achievements::AchievementState,
    bevy::prelude::*,
    chrono::Utc,
    phases::{DiscoveryLogState, PhaseTrack},
    prestige::PrestigeState,
    progress_events::{ClaimOfflineEarnings, OfflineEarningsReady},
    states::GameState,
    std::{
        fs,
        io::ErrorKind,
        path::{Path, PathBuf},
    },
    structures::StructureCatalog,
    system_schedule::GameSchedule,
    territory::TerritoryMap,
    upgrades::UpgradeLevels,
    wallet::{ResourceKind, Wallet},
};

/// Default snapshot location, relative to the working directory.
pub const SAVE_FILE: &str = "saves/genesis_factory_save.json";

/// Timer resource for automatic saves.
#[derive(Resource)]
pub struct AutosaveTimer(Timer);

impl Default for AutosaveTimer {
    fn default() -> Self {
        // 5 second autosave interval
        Self(Timer::from_seconds(5.0, TimerMode::Repeating))
    }
}

/// Where the snapshot is read from and written to. Tests point this at a
/// temporary directory.
#[derive(Resource, Debug, Clone)]
pub struct SavePath(pub PathBuf);

impl Default for SavePath {
    fn default() -> Self {
        Self(PathBuf::from(SAVE_FILE))
    }
}

/// Catch-up earnings computed at load time. Inserted only when there is
/// something to claim; removed once the player claims it.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct PendingOfflineEarnings {
    pub energy: f64,
    pub hours: f64,
}

pub struct SaveLoadPlugin;

impl Plugin for SaveLoadPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AutosaveTimer>()
            .init_resource::<SavePath>()
            .add_systems(OnEnter(GameState::Loading), load_or_init)
            .add_systems(
                Update,
                (claim_offline_earnings, execute_save).in_set(GameSchedule::Persistence),
            );
    }
}

/// Serializes and writes a snapshot, creating the saves directory on the
/// first write.
pub fn write_save(path: &Path, save: &SaveData) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(save).map_err(std::io::Error::other)?;
    fs::write(path, json)
}

/// Reads and validates a snapshot. `None` means no usable save exists and
/// the caller starts fresh; a corrupt file is never partially applied.
pub fn read_save(path: &Path) -> Option<SaveData> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Failed to read save file, starting fresh: {e}");
            return None;
        }
    };
    match serde_json::from_slice::<SaveData>(&bytes) {
        Ok(save) if save.is_valid() => Some(save),
        Ok(_) => {
            warn!("Save file has core fields out of range, starting fresh");
            None
        }
        Err(e) => {
            warn!("Save file is malformed, starting fresh: {e}");
            None
        }
    }
}

/// Boot system: applies the on-disk snapshot onto fresh resources (or
/// leaves the defaults if there is none), queues offline earnings, then
/// hands control to the running game.
#[allow(clippy::too_many_arguments)]
fn load_or_init(
    path: Res<SavePath>,
    mut wallet: ResMut<Wallet>,
    mut levels: ResMut<UpgradeLevels>,
    mut catalog: ResMut<StructureCatalog>,
    mut map: ResMut<TerritoryMap>,
    mut achievements: ResMut<AchievementState>,
    mut prestige: ResMut<PrestigeState>,
    mut phases: ResMut<PhaseTrack>,
    mut logs: ResMut<DiscoveryLogState>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Some(save) = read_save(&path.0) {
        save.apply(
            &mut wallet,
            &mut levels,
            &mut catalog,
            &mut map,
            &mut achievements,
            &mut prestige,
            &mut phases,
            &mut logs,
        );
        info!(
            energy = wallet.energy,
            phase = %phases.current,
            "Save loaded"
        );

        let elapsed = (Utc::now().timestamp_millis() - save.timestamp) as f64 / 1000.0;
        if levels.generator_level > 0 && elapsed > MIN_OFFLINE_SECONDS {
            let rate = balance::generator_output(levels.generator_level);
            let energy = calculate_offline_earnings(rate, elapsed, MAX_OFFLINE_HOURS);
            if energy > 0.0 {
                let hours = (elapsed / 3600.0).min(MAX_OFFLINE_HOURS);
                info!(energy, hours, "Offline earnings waiting for claim");
                commands.insert_resource(PendingOfflineEarnings { energy, hours });
                commands.trigger(OfflineEarningsReady { energy, hours });
            }
        }
    } else {
        info!("No save found, starting a new game");
    }
    next_state.set(GameState::Running);
}

/// Credits the pending offline earnings once the player dismisses the
/// presentation. Claims with nothing pending are ignored.
fn claim_offline_earnings(
    mut claims: MessageReader<ClaimOfflineEarnings>,
    pending: Option<Res<PendingOfflineEarnings>>,
    mut wallet: ResMut<Wallet>,
    mut commands: Commands,
) {
    if claims.read().next().is_none() {
        return;
    }
    let Some(pending) = pending else {
        return;
    };
    info!(energy = pending.energy, "Offline earnings claimed");
    wallet.credit(ResourceKind::Energy, pending.energy);
    commands.remove_resource::<PendingOfflineEarnings>();
}

/// Autosave. A failed write is logged and retried on the next interval
/// rather than aborting the game.
#[allow(clippy::too_many_arguments)]
fn execute_save(
    time: Res<Time>,
    mut timer: ResMut<AutosaveTimer>,
    path: Res<SavePath>,
    wallet: Res<Wallet>,
    levels: Res<UpgradeLevels>,
    catalog: Res<StructureCatalog>,
    map: Res<TerritoryMap>,
    achievements: Res<AchievementState>,
    prestige: Res<PrestigeState>,
    phases: Res<PhaseTrack>,
    logs: Res<DiscoveryLogState>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }
    let save = SaveData::collect(
        Utc::now().timestamp_millis(),
        &wallet,
        &levels,
        &catalog,
        &map,
        &achievements,
        &prestige,
        &phases,
        &logs,
    );
    match write_save(&path.0, &save) {
        Ok(()) => trace!(path = %path.0.display(), "Autosaved"),
        Err(e) => error!("Failed to write save file: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_world() -> (Wallet, UpgradeLevels, StructureCatalog, TerritoryMap) {
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::Energy, 5_000.0);
        wallet.credit(ResourceKind::BioMatter, 150.0);
        let levels = UpgradeLevels { click_level: 4, generator_level: 3, terraformer_count: 1 };
        let mut catalog = StructureCatalog::default();
        catalog.entries[0].owned = 2;
        let map = TerritoryMap::generate();
        (wallet, levels, catalog, map)
    }

    #[test]
    fn test_save_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");

        let (wallet, levels, catalog, map) = populated_world();
        let achievements = AchievementState::default();
        let prestige = PrestigeState::default();
        let phases = PhaseTrack::default();
        let logs = DiscoveryLogState::default();

        let save = SaveData::collect(
            1_700_000_000_000,
            &wallet,
            &levels,
            &catalog,
            &map,
            &achievements,
            &prestige,
            &phases,
            &logs,
        );
        write_save(&path, &save).unwrap();

        let restored = read_save(&path).unwrap();
        assert_eq!(restored, save);
        assert_eq!(restored.energy, 5_000.0);
        assert_eq!(restored.structures_owned.get("basic_generator"), Some(&2));
    }

    #[test]
    fn test_missing_save_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_save(&dir.path().join("nope.json")).is_none());
    }

    #[test]
    fn test_corrupt_save_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{ this is not json").unwrap();
        assert!(read_save(&path).is_none());

        fs::write(&path, r#"{"energy":-50,"clickUpgradeLevel":1,"generatorUpgradeLevel":0}"#)
            .unwrap();
        assert!(read_save(&path).is_none());
    }

    #[test]
    fn test_apply_restores_state_and_placements() {
        let (wallet, levels, catalog, mut map) = populated_world();
        let mut source_wallet = wallet;
        // Put a terraformer on a starting tile; every starting tile is barren.
        assert!(map.place_structure(10, 10, territory_components::StructureKind::Terraformer, &mut source_wallet));

        let save = SaveData::collect(
            0,
            &source_wallet,
            &levels,
            &catalog,
            &map,
            &AchievementState::default(),
            &PrestigeState::default(),
            &PhaseTrack::default(),
            &DiscoveryLogState::default(),
        );

        let mut wallet = Wallet::default();
        let mut levels = UpgradeLevels::default();
        let mut catalog = StructureCatalog::default();
        let mut map = TerritoryMap::default();
        let mut achievements = AchievementState::default();
        let mut prestige = PrestigeState::default();
        let mut phases = PhaseTrack::default();
        let mut logs = DiscoveryLogState::default();
        save.apply(
            &mut wallet,
            &mut levels,
            &mut catalog,
            &mut map,
            &mut achievements,
            &mut prestige,
            &mut phases,
            &mut logs,
        );

        assert_eq!(wallet.energy, source_wallet.energy);
        assert_eq!(levels.click_level, 4);
        assert_eq!(catalog.entries[0].owned, 2);
        let tile = map.tile(10, 10).unwrap();
        assert_eq!(tile.structure, Some(territory_components::StructureKind::Terraformer));
    }

    #[test]
    fn test_claim_credits_once() {
        let mut app = App::new();
        app.add_message::<ClaimOfflineEarnings>()
            .init_resource::<Wallet>()
            .insert_resource(PendingOfflineEarnings { energy: 250.0, hours: 2.0 })
            .add_systems(Update, claim_offline_earnings);

        app.world_mut().write_message(ClaimOfflineEarnings);
        app.update();
        assert_eq!(app.world().resource::<Wallet>().energy, 250.0);
        assert!(app.world().get_resource::<PendingOfflineEarnings>().is_none());

        // A second claim with nothing pending credits nothing.
        app.world_mut().write_message(ClaimOfflineEarnings);
        app.update();
        assert_eq!(app.world().resource::<Wallet>().energy, 250.0);
    }
}
