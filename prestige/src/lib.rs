use {
    bevy::prelude::*,
    progress_events::{BuyPrestigeUpgradeRequest, PrestigeUpgradeKind, RebirthRequest},
    structures::StructureCatalog,
    system_schedule::GameSchedule,
    territory::TerritoryMap,
    upgrades::UpgradeLevels,
    wallet::Wallet,
};

/// Energy required before the first rebirth grants anything.
pub const PRESTIGE_THRESHOLD: f64 = 1_000_000.0;

/// Prestige points granted for rebirthing at the given energy. Zero below
/// the threshold, then grows with the square root of the overshoot.
pub fn rebirth_gain(energy: f64) -> u32 {
    if energy < PRESTIGE_THRESHOLD {
        return 0;
    }
    (energy / PRESTIGE_THRESHOLD).sqrt().floor() as u32
}

pub fn can_rebirth(energy: f64) -> bool {
    rebirth_gain(energy) > 0
}

/// Permanent progression. Multipliers only ever increase and survive every
/// rebirth; `points` is the spendable currency.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource, Default)]
pub struct PrestigeState {
    pub level: u32,
    pub points: u32,
    pub total_rebirths: u32,
    pub energy_multiplier: f64,
    pub click_multiplier: f64,
    pub production_multiplier: f64,
}

impl Default for PrestigeState {
    fn default() -> Self {
        Self {
            level: 0,
            points: 0,
            total_rebirths: 0,
            energy_multiplier: 1.0,
            click_multiplier: 1.0,
            production_multiplier: 1.0,
        }
    }
}

/// Each purchase adds a flat +0.1 to one multiplier.
const UPGRADE_STEP: f64 = 0.1;

impl PrestigeState {
    pub fn multiplier(&self, kind: PrestigeUpgradeKind) -> f64 {
        match kind {
            PrestigeUpgradeKind::Energy => self.energy_multiplier,
            PrestigeUpgradeKind::Click => self.click_multiplier,
            PrestigeUpgradeKind::Production => self.production_multiplier,
        }
    }

    fn multiplier_mut(&mut self, kind: PrestigeUpgradeKind) -> &mut f64 {
        match kind {
            PrestigeUpgradeKind::Energy => &mut self.energy_multiplier,
            PrestigeUpgradeKind::Click => &mut self.click_multiplier,
            PrestigeUpgradeKind::Production => &mut self.production_multiplier,
        }
    }

    /// Point cost of the next step on this track. The curve rises with the
    /// fractional part of the multiplier, so the first five steps cost one
    /// point each and the sixth is the first to cost two.
    pub fn upgrade_cost(&self, kind: PrestigeUpgradeKind) -> u32 {
        (1.0 + (self.multiplier(kind) - 1.0) * 2.0).floor() as u32
    }

    /// Spends points on one +0.1 step. No-op when points are short.
    pub fn buy_upgrade(&mut self, kind: PrestigeUpgradeKind) -> bool {
        let cost = self.upgrade_cost(kind);
        if self.points < cost {
            return false;
        }
        self.points -= cost;
        *self.multiplier_mut(kind) += UPGRADE_STEP;
        true
    }
}

pub struct PrestigePlugin;

impl Plugin for PrestigePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PrestigeState>()
            .init_resource::<PrestigeState>()
            .add_systems(
                Update,
                (handle_rebirth_requests, handle_upgrade_requests)
                    .in_set(GameSchedule::PlayerActions),
            );
    }
}

/// Rebirth as one atomic operation: the gain is applied and every
/// short-term ledger is reset in the same system invocation, so a player
/// can never end up with the gain but not the reset or vice versa.
/// Achievements, discovery logs and phases are permanent and survive.
fn handle_rebirth_requests(
    mut requests: MessageReader<RebirthRequest>,
    mut prestige: ResMut<PrestigeState>,
    mut wallet: ResMut<Wallet>,
    mut levels: ResMut<UpgradeLevels>,
    mut catalog: ResMut<StructureCatalog>,
    mut map: ResMut<TerritoryMap>,
) {
    for _ in requests.read() {
        let gain = rebirth_gain(wallet.energy);
        if gain == 0 {
            debug!(energy = wallet.energy, "Rebirth rejected below threshold");
            continue;
        }

        prestige.points += gain;
        prestige.level += 1;
        prestige.total_rebirths += 1;

        *wallet = Wallet::default();
        *levels = UpgradeLevels::default();
        catalog.reset_owned();
        map.reset();

        info!(gain, level = prestige.level, "Rebirth complete");
    }
}

fn handle_upgrade_requests(
    mut requests: MessageReader<BuyPrestigeUpgradeRequest>,
    mut prestige: ResMut<PrestigeState>,
) {
    for request in requests.read() {
        let cost = prestige.upgrade_cost(request.kind);
        if prestige.buy_upgrade(request.kind) {
            info!(kind = ?request.kind, cost, "Prestige upgrade purchased");
        } else {
            debug!(kind = ?request.kind, cost, points = prestige.points, "Prestige upgrade unaffordable");
        }
    }
}
