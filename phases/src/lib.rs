use {
    bevy::prelude::*,
    progress_events::{LogDiscovered, PhaseAdvanced},
    system_schedule::GameSchedule,
    wallet::Wallet,
};

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Phase {
    pub id: String,
    pub name: String,
    pub required_energy: f64,
    pub unlocked: bool,
}

impl Phase {
    fn new(id: &str, name: &str, required_energy: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            required_energy,
            unlocked: false,
        }
    }
}

/// The ordered civilization progression. Strictly sequential: a phase can
/// only unlock once every phase before it has, and unlocking never reverts.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource, Default)]
pub struct PhaseTrack {
    pub phases: Vec<Phase>,
    pub current: String,
}

impl Default for PhaseTrack {
    fn default() -> Self {
        let mut phases = vec![
            Phase::new("void", "The Void", 0.0),
            Phase::new("awakening", "Awakening", 100.0),
            Phase::new("foundation", "Foundation", 1_000.0),
            Phase::new("reconstruction", "Reconstruction", 10_000.0),
            Phase::new("renaissance", "Renaissance", 100_000.0),
            Phase::new("ascension", "Ascension", 1_000_000.0),
        ];
        phases[0].unlocked = true;
        Self { phases, current: "void".to_string() }
    }
}

impl PhaseTrack {
    fn current_index(&self) -> usize {
        self.phases
            .iter()
            .position(|p| p.id == self.current)
            .unwrap_or(0)
    }

    /// Advances at most one phase per call: the first locked phase after the
    /// current one whose threshold is met. Any further eligible phases wait
    /// for the next check.
    pub fn check_advance(&mut self, energy: f64) -> Option<&Phase> {
        let start = self.current_index() + 1;
        for i in start..self.phases.len() {
            if !self.phases[i].unlocked && energy >= self.phases[i].required_energy {
                self.phases[i].unlocked = true;
                self.current = self.phases[i].id.clone();
                return Some(&self.phases[i]);
            }
        }
        None
    }

    /// Restores a persisted position: marks every phase up to and including
    /// `current` as unlocked.
    pub fn restore(&mut self, current: &str) {
        let Some(index) = self.phases.iter().position(|p| p.id == current) else {
            return;
        };
        for phase in &mut self.phases[..=index] {
            phase.unlocked = true;
        }
        self.current = current.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct DiscoveryLog {
    pub id: String,
    pub title: String,
    pub bio_matter_threshold: f64,
    pub discovered: bool,
}

impl DiscoveryLog {
    fn new(id: &str, title: &str, bio_matter_threshold: f64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            bio_matter_threshold,
            discovered: false,
        }
    }
}

/// Narrative fragments gated by cumulative BioMatter.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource, Default)]
pub struct DiscoveryLogState {
    pub logs: Vec<DiscoveryLog>,
}

impl Default for DiscoveryLogState {
    fn default() -> Self {
        Self {
            logs: vec![
                DiscoveryLog::new("log_006", "The Signal", 0.0),
                DiscoveryLog::new("log_007", "Breath Returns", 1_000.0),
                DiscoveryLog::new("log_008", "First Growth", 1_000.0),
                DiscoveryLog::new("log_009", "The Living Silence", 10_000.0),
                DiscoveryLog::new("log_010", "Emergence", 50_000.0),
            ],
        }
    }
}

impl DiscoveryLogState {
    /// Marks every undiscovered log at or below `bio_matter` and returns the
    /// newly discovered entries in declaration order.
    pub fn check_discoveries(&mut self, bio_matter: f64) -> Vec<DiscoveryLog> {
        let mut newly = Vec::new();
        for log in &mut self.logs {
            if !log.discovered && bio_matter >= log.bio_matter_threshold {
                log.discovered = true;
                newly.push(log.clone());
            }
        }
        newly
    }

    pub fn discovered_ids(&self) -> Vec<String> {
        self.logs
            .iter()
            .filter(|l| l.discovered)
            .map(|l| l.id.clone())
            .collect()
    }

    pub fn restore(&mut self, discovered: &[String]) {
        for log in &mut self.logs {
            if discovered.iter().any(|id| *id == log.id) {
                log.discovered = true;
            }
        }
    }
}

pub struct PhasesPlugin;

impl Plugin for PhasesPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PhaseTrack>()
            .register_type::<DiscoveryLogState>()
            .init_resource::<PhaseTrack>()
            .init_resource::<DiscoveryLogState>()
            .add_systems(
                Update,
                (check_phase_unlock, check_discovery_logs).in_set(GameSchedule::Evaluation),
            );
    }
}

fn check_phase_unlock(mut track: ResMut<PhaseTrack>, wallet: Res<Wallet>, mut commands: Commands) {
    if !wallet.is_changed() {
        return;
    }
    if let Some(phase) = track.check_advance(wallet.energy) {
        info!(phase = %phase.id, "Civilization phase advanced");
        commands.trigger(PhaseAdvanced {
            phase_id: phase.id.clone(),
            name: phase.name.clone(),
        });
    }
}

fn check_discovery_logs(
    mut logs: ResMut<DiscoveryLogState>,
    wallet: Res<Wallet>,
    mut commands: Commands,
) {
    if !wallet.is_changed() {
        return;
    }
    for log in logs.check_discoveries(wallet.bio_matter) {
        info!(log = %log.id, "Discovery log unlocked");
        commands.trigger(LogDiscovered { log_id: log.id, title: log.title });
    }
}
