//! Composes every gameplay plugin and pins the frame order: player
//! actions, then production, then threshold evaluation, then persistence.

use {
    achievements::AchievementsPlugin,
    bevy::prelude::*,
    phases::PhasesPlugin,
    prestige::PrestigePlugin,
    production::ProductionPlugin,
    progress_events::ProgressEventsPlugin,
    save_load::SaveLoadPlugin,
    states::GameState,
    structures::StructuresPlugin,
    system_schedule::GameSchedule,
    territory::TerritoryPlugin,
    upgrades::UpgradesPlugin,
    wallet::WalletPlugin,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .configure_sets(
                Update,
                (
                    GameSchedule::PlayerActions,
                    GameSchedule::Production,
                    GameSchedule::Evaluation,
                    GameSchedule::Persistence,
                )
                    .chain()
                    .run_if(in_state(GameState::Running)),
            )
            .add_plugins((
                ProgressEventsPlugin,
                WalletPlugin,
                UpgradesPlugin,
                StructuresPlugin,
                TerritoryPlugin,
                ProductionPlugin,
                AchievementsPlugin,
                PhasesPlugin,
                PrestigePlugin,
                SaveLoadPlugin,
            ));
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        bevy::state::app::StatesPlugin,
        progress_events::TapRequest,
        save_load::SavePath,
        wallet::Wallet,
    };

    fn test_app() -> App {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, CorePlugin));
        app.insert_resource(SavePath(dir.path().join("save.json")));
        // First update runs load_or_init, second applies the Running state.
        app.update();
        app.update();
        app
    }

    #[test]
    fn test_boots_into_running_state() {
        let app = test_app();
        assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::Running);
    }

    #[test]
    fn test_tap_flows_through_the_full_app() {
        let mut app = test_app();
        app.world_mut().write_message(TapRequest);
        app.update();
        // 1 energy from the tap, then the first achievement pays 10 more.
        let wallet = app.world().resource::<Wallet>();
        assert_eq!(wallet.energy, 11.0);
        let unlocked = &app.world().resource::<achievements::AchievementState>().unlocked;
        assert_eq!(unlocked, &vec!["genesis_awakening".to_string()]);
    }
}
