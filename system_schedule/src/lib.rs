use bevy::prelude::*;

/// Ordering of one engine frame. Player actions mutate the ledgers first,
/// then the production tick accrues, then unlock checks run against the
/// post-credit totals, and persistence observes the settled state last.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GameSchedule {
    PlayerActions,
    Production,
    Evaluation,
    Persistence,
}
