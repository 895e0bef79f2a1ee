mod map;
mod placement;
mod systems;

#[cfg(test)]
mod tests;

pub use {
    map::{GRID_SIZE, STARTING_RADIUS, TerritoryMap},
    placement::{StructureSpec, adjacency_bonus, placement_allowed, spec},
};

use {bevy::prelude::*, system_schedule::GameSchedule};

pub struct TerritoryPlugin;

impl Plugin for TerritoryPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TerritoryMap>()
            .init_resource::<TerritoryMap>()
            .add_systems(
                Update,
                (systems::handle_place_requests, systems::handle_expand_requests)
                    .in_set(GameSchedule::PlayerActions),
            )
            .add_systems(
                Update,
                systems::unlock_tiles_from_biomatter.in_set(GameSchedule::Evaluation),
            );
    }
}
