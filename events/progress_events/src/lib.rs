//! Player-action messages consumed by the engine and notification events
//! the engine raises for the presentation layer.

use {bevy::prelude::*, territory_components::StructureKind};

pub struct ProgressEventsPlugin;

impl Plugin for ProgressEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TapRequest>()
            .add_message::<UpgradeRequest>()
            .add_message::<BuyStructureRequest>()
            .add_message::<PlaceStructureRequest>()
            .add_message::<ExpandTerritoryRequest>()
            .add_message::<ConvertBioMatterRequest>()
            .add_message::<BuyTerraformerRequest>()
            .add_message::<RebirthRequest>()
            .add_message::<BuyPrestigeUpgradeRequest>()
            .add_message::<ClaimOfflineEarnings>();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    Click,
    Generator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrestigeUpgradeKind {
    Energy,
    Click,
    Production,
}

// --- Requests (buffered messages written by the UI layer) ---

/// A single tap on the energy orb.
#[derive(Message, Debug, Clone)]
pub struct TapRequest;

#[derive(Message, Debug, Clone)]
pub struct UpgradeRequest {
    pub kind: UpgradeKind,
}

/// Purchase one unit of a catalog structure by id.
#[derive(Message, Debug, Clone)]
pub struct BuyStructureRequest {
    pub id: String,
}

#[derive(Message, Debug, Clone)]
pub struct PlaceStructureRequest {
    pub q: i32,
    pub r: i32,
    pub kind: StructureKind,
}

#[derive(Message, Debug, Clone)]
pub struct ExpandTerritoryRequest;

/// Convert energy into `amount` units of BioMatter.
#[derive(Message, Debug, Clone)]
pub struct ConvertBioMatterRequest {
    pub amount: f64,
}

#[derive(Message, Debug, Clone)]
pub struct BuyTerraformerRequest;

#[derive(Message, Debug, Clone)]
pub struct RebirthRequest;

#[derive(Message, Debug, Clone)]
pub struct BuyPrestigeUpgradeRequest {
    pub kind: PrestigeUpgradeKind,
}

/// The player dismissed the offline-earnings presentation; credit now.
#[derive(Message, Debug, Clone)]
pub struct ClaimOfflineEarnings;

// --- Notifications (triggered events consumed by observers) ---

#[derive(Event, Debug, Clone)]
pub struct AchievementUnlocked {
    pub id: String,
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct PhaseAdvanced {
    pub phase_id: String,
    pub name: String,
}

#[derive(Event, Debug, Clone)]
pub struct LogDiscovered {
    pub log_id: String,
    pub title: String,
}

/// Raised once on load when catch-up earnings are waiting for the player.
#[derive(Event, Debug, Clone)]
pub struct OfflineEarningsReady {
    pub energy: f64,
    pub hours: f64,
}
