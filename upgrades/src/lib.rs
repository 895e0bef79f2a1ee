use {
    bevy::prelude::*,
    progress_events::{BuyTerraformerRequest, ConvertBioMatterRequest, UpgradeKind, UpgradeRequest},
    system_schedule::GameSchedule,
    wallet::{PurchaseOutcome, ResourceKind, Wallet},
};

/// Discrete upgrade levels. Monotonically non-decreasing except on rebirth,
/// which resets the whole resource to default.
#[derive(Resource, Reflect, Default, Debug, Clone, PartialEq, Eq)]
#[reflect(Resource, Default)]
pub struct UpgradeLevels {
    pub click_level: u32,
    pub generator_level: u32,
    pub terraformer_count: u32,
}

/// Cost of the next level for the given upgrade track.
pub fn upgrade_cost(kind: UpgradeKind, levels: &UpgradeLevels) -> f64 {
    match kind {
        UpgradeKind::Click => balance::click_upgrade_cost(levels.click_level),
        UpgradeKind::Generator => balance::generator_upgrade_cost(levels.generator_level),
    }
}

/// Buys one level if the wallet covers the cost. Calling with insufficient
/// funds is a no-op any number of times and always reports the same cost.
pub fn purchase(kind: UpgradeKind, wallet: &mut Wallet, levels: &mut UpgradeLevels) -> PurchaseOutcome {
    let cost = upgrade_cost(kind, levels);
    if !wallet.debit(ResourceKind::Energy, cost) {
        return PurchaseOutcome { success: false, cost };
    }
    match kind {
        UpgradeKind::Click => levels.click_level += 1,
        UpgradeKind::Generator => levels.generator_level += 1,
    }
    PurchaseOutcome { success: true, cost }
}

pub struct UpgradesPlugin;

impl Plugin for UpgradesPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<UpgradeLevels>()
            .init_resource::<UpgradeLevels>()
            .add_systems(
                Update,
                (handle_upgrade_requests, handle_biomatter_conversion, handle_terraformer_purchase)
                    .in_set(GameSchedule::PlayerActions),
            );
    }
}

fn handle_upgrade_requests(
    mut requests: MessageReader<UpgradeRequest>,
    mut wallet: ResMut<Wallet>,
    mut levels: ResMut<UpgradeLevels>,
) {
    for request in requests.read() {
        let outcome = purchase(request.kind, &mut wallet, &mut levels);
        if outcome.success {
            info!(kind = ?request.kind, cost = outcome.cost, "Upgrade purchased");
        } else {
            debug!(kind = ?request.kind, cost = outcome.cost, "Upgrade unaffordable");
        }
    }
}

/// Burns energy to synthesize BioMatter at a flat per-unit rate.
fn handle_biomatter_conversion(
    mut requests: MessageReader<ConvertBioMatterRequest>,
    mut wallet: ResMut<Wallet>,
) {
    for request in requests.read() {
        if !(request.amount > 0.0) || !request.amount.is_finite() {
            continue;
        }
        let cost = balance::biomatter_conversion_cost(request.amount);
        if wallet.debit(ResourceKind::Energy, cost) {
            wallet.credit(ResourceKind::BioMatter, request.amount);
            info!(amount = request.amount, cost, "Synthesized BioMatter");
        } else {
            debug!(amount = request.amount, cost, "BioMatter conversion unaffordable");
        }
    }
}

fn handle_terraformer_purchase(
    mut requests: MessageReader<BuyTerraformerRequest>,
    mut wallet: ResMut<Wallet>,
    mut levels: ResMut<UpgradeLevels>,
) {
    for _ in requests.read() {
        let cost = balance::terraformer_cost(levels.terraformer_count);
        if wallet.debit(ResourceKind::Energy, cost) {
            levels.terraformer_count += 1;
            info!(count = levels.terraformer_count, cost, "Terraformer built");
        } else {
            debug!(cost, "Terraformer unaffordable");
        }
    }
}
