use {
    bevy::prelude::*,
    progress_events::AchievementUnlocked,
    system_schedule::GameSchedule,
    upgrades::UpgradeLevels,
    wallet::{ResourceKind, Wallet},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    EnergyTotal(f64),
    ClickLevel(u32),
    GeneratorLevel(u32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reward {
    /// Multiplies the cumulative achievement multiplier.
    Multiplier(f64),
    /// Credits energy directly, once.
    BonusEnergy(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub condition: Condition,
    pub reward: Reward,
}

/// The static rule set. Declaration order is the evaluation order, which
/// keeps unlock sequences reproducible for identical state histories.
pub const DEFINITIONS: [AchievementDef; 8] = [
    AchievementDef {
        id: "genesis_awakening",
        name: "Genesis Awakening",
        condition: Condition::EnergyTotal(1.0),
        reward: Reward::BonusEnergy(10.0),
    },
    AchievementDef {
        id: "power_surge",
        name: "Power Surge",
        condition: Condition::EnergyTotal(100.0),
        reward: Reward::Multiplier(1.1),
    },
    AchievementDef {
        id: "first_upgrade",
        name: "Enhanced Systems",
        condition: Condition::ClickLevel(1),
        reward: Reward::BonusEnergy(50.0),
    },
    AchievementDef {
        id: "automation",
        name: "Self-Sustaining",
        condition: Condition::GeneratorLevel(1),
        reward: Reward::Multiplier(1.2),
    },
    AchievementDef {
        id: "energy_hoarder",
        name: "Energy Hoarder",
        condition: Condition::EnergyTotal(10_000.0),
        reward: Reward::Multiplier(1.5),
    },
    AchievementDef {
        id: "click_master",
        name: "Click Master",
        condition: Condition::ClickLevel(10),
        reward: Reward::Multiplier(1.3),
    },
    AchievementDef {
        id: "automation_expert",
        name: "Automation Expert",
        condition: Condition::GeneratorLevel(10),
        reward: Reward::Multiplier(1.4),
    },
    AchievementDef {
        id: "energy_tycoon",
        name: "Energy Tycoon",
        condition: Condition::EnergyTotal(1_000_000.0),
        reward: Reward::Multiplier(2.0),
    },
];

/// Read-only view of the state the rules are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    pub energy: f64,
    pub click_level: u32,
    pub generator_level: u32,
}

/// The unlocked-id set is the persisted truth; the cumulative multiplier is
/// always derivable from it by replaying rewards.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource, Default)]
pub struct AchievementState {
    pub unlocked: Vec<String>,
    pub multiplier: f64,
}

impl Default for AchievementState {
    fn default() -> Self {
        Self { unlocked: Vec::new(), multiplier: 1.0 }
    }
}

impl AchievementState {
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }

    /// Replays multiplier rewards for a persisted unlocked set. Bonus-energy
    /// rewards are not replayed; the saved energy total already contains
    /// them.
    pub fn rebuild_multiplier(unlocked: &[String]) -> f64 {
        DEFINITIONS
            .iter()
            .filter(|def| unlocked.iter().any(|u| u == def.id))
            .fold(1.0, |acc, def| match def.reward {
                Reward::Multiplier(value) => acc * value,
                Reward::BonusEnergy(_) => acc,
            })
    }
}

fn condition_met(condition: Condition, snapshot: Snapshot) -> bool {
    match condition {
        Condition::EnergyTotal(value) => snapshot.energy >= value,
        Condition::ClickLevel(value) => snapshot.click_level >= value,
        Condition::GeneratorLevel(value) => snapshot.generator_level >= value,
    }
}

/// Evaluates every rule not yet unlocked against the snapshot, applying
/// rewards and recording unlocks. Set membership is checked before any
/// reward is applied, so replaying the same snapshot is a no-op.
pub fn evaluate(
    state: &mut AchievementState,
    wallet: &mut Wallet,
    snapshot: Snapshot,
) -> Vec<&'static AchievementDef> {
    let mut newly_unlocked = Vec::new();
    for def in DEFINITIONS.iter() {
        if state.is_unlocked(def.id) || !condition_met(def.condition, snapshot) {
            continue;
        }
        state.unlocked.push(def.id.to_string());
        match def.reward {
            Reward::Multiplier(value) => state.multiplier *= value,
            Reward::BonusEnergy(value) => wallet.credit(ResourceKind::Energy, value),
        }
        newly_unlocked.push(def);
    }
    newly_unlocked
}

pub struct AchievementsPlugin;

impl Plugin for AchievementsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AchievementState>()
            .init_resource::<AchievementState>()
            .add_systems(Update, check_achievements.in_set(GameSchedule::Evaluation));
    }
}

/// Runs after every state-changing frame section; the membership check makes
/// redundant invocations free.
fn check_achievements(
    mut state: ResMut<AchievementState>,
    mut wallet: ResMut<Wallet>,
    levels: Res<UpgradeLevels>,
    mut commands: Commands,
) {
    let snapshot = Snapshot {
        energy: wallet.energy,
        click_level: levels.click_level,
        generator_level: levels.generator_level,
    };
    for def in evaluate(&mut state, &mut wallet, snapshot) {
        info!(id = def.id, "Achievement unlocked");
        commands.trigger(AchievementUnlocked {
            id: def.id.to_string(),
            name: def.name.to_string(),
        });
    }
}
