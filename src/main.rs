use {
    bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*, state::app::StatesPlugin},
    core::CorePlugin,
    std::time::Duration,
};

fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins
                .set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(1.0 / 60.0))),
            LogPlugin {
                filter: "error,\
                    achievements=info,\
                    phases=info,\
                    prestige=info,\
                    production=debug,\
                    save_load=trace,\
                    structures=debug,\
                    territory=debug,\
                    upgrades=debug,\
                    wallet=debug"
                    .into(),
                level: bevy::log::Level::TRACE,
                ..Default::default()
            },
            StatesPlugin,
            CorePlugin,
        ))
        .run();
}
