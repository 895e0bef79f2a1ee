use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameState {
    /// Reading the save snapshot (or falling back to a fresh game).
    #[default]
    Loading,
    /// The two fixed-interval loops are live and player input is accepted.
    Running,
}
