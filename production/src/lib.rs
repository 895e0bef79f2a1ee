//! The per-second aggregation tick: one credit per resource combining the
//! auto-generator, the global catalog, terraformers and the territory map,
//! scaled by the permanent and achievement multipliers.

use {
    achievements::AchievementState,
    bevy::prelude::*,
    prestige::PrestigeState,
    progress_events::TapRequest,
    structures::StructureCatalog,
    system_schedule::GameSchedule,
    territory::TerritoryMap,
    territory_components::ResourceYield,
    upgrades::UpgradeLevels,
    wallet::{ResourceKind, Wallet},
};

/// Drives the 1-second accrual loop.
#[derive(Resource)]
pub struct ProductionTimer(pub Timer);

impl Default for ProductionTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

/// The post-multiplier per-second rates, also what the UI displays.
///
/// Energy carries the achievement multiplier and the permanent energy
/// multiplier on top of the production multiplier; the other resources only
/// scale with the production multiplier.
pub fn current_rates(
    levels: &UpgradeLevels,
    catalog: &StructureCatalog,
    map: &TerritoryMap,
    prestige: &PrestigeState,
    achievements: &AchievementState,
) -> ResourceYield {
    let territory = map.total_production();

    let energy_base = balance::generator_output(levels.generator_level)
        + catalog.total_production()
        + territory.energy;
    let bio_matter_base = balance::terraformer_output(levels.terraformer_count) + territory.bio_matter;

    ResourceYield {
        energy: energy_base
            * achievements.multiplier
            * prestige.energy_multiplier
            * prestige.production_multiplier,
        bio_matter: bio_matter_base * prestige.production_multiplier,
        minerals: territory.minerals * prestige.production_multiplier,
        rare_crystals: territory.rare_crystals * prestige.production_multiplier,
    }
}

/// Energy gained by one tap at the current levels and multipliers.
pub fn tap_output(
    levels: &UpgradeLevels,
    prestige: &PrestigeState,
    achievements: &AchievementState,
) -> f64 {
    balance::click_output(levels.click_level)
        * achievements.multiplier
        * prestige.click_multiplier
        * prestige.energy_multiplier
}

pub struct ProductionPlugin;

impl Plugin for ProductionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ProductionTimer>()
            .add_systems(Update, handle_taps.in_set(GameSchedule::PlayerActions))
            .add_systems(Update, accrue_production.in_set(GameSchedule::Production));
    }
}

pub fn handle_taps(
    mut requests: MessageReader<TapRequest>,
    mut wallet: ResMut<Wallet>,
    levels: Res<UpgradeLevels>,
    prestige: Res<PrestigeState>,
    achievements: Res<AchievementState>,
) {
    for _ in requests.read() {
        let gain = tap_output(&levels, &prestige, &achievements);
        wallet.credit(ResourceKind::Energy, gain);
        trace!(gain, "Tap");
    }
}

/// Credits one tick's worth of production per completed timer interval.
/// Zero-rate lanes are skipped so an idle map causes no wallet churn.
pub fn accrue_production(
    time: Res<Time>,
    mut timer: ResMut<ProductionTimer>,
    mut wallet: ResMut<Wallet>,
    levels: Res<UpgradeLevels>,
    catalog: Res<StructureCatalog>,
    map: Res<TerritoryMap>,
    prestige: Res<PrestigeState>,
    achievements: Res<AchievementState>,
) {
    timer.0.tick(time.delta());
    let ticks = timer.0.times_finished_this_tick();
    if ticks == 0 {
        return;
    }

    let rates = current_rates(&levels, &catalog, &map, &prestige, &achievements);
    let elapsed = ticks as f64;
    let credits = [
        (ResourceKind::Energy, rates.energy),
        (ResourceKind::BioMatter, rates.bio_matter),
        (ResourceKind::Minerals, rates.minerals),
        (ResourceKind::RareCrystals, rates.rare_crystals),
    ];
    for (kind, rate) in credits {
        if rate > 0.0 {
            wallet.credit(kind, rate * elapsed);
        }
    }
    trace!(?rates, ticks, "Production tick");
}
