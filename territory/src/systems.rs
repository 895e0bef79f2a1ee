use {
    crate::map::TerritoryMap,
    bevy::prelude::*,
    progress_events::{ExpandTerritoryRequest, PlaceStructureRequest},
    wallet::Wallet,
};

pub fn handle_place_requests(
    mut requests: MessageReader<PlaceStructureRequest>,
    mut map: ResMut<TerritoryMap>,
    mut wallet: ResMut<Wallet>,
) {
    for request in requests.read() {
        if map.place_structure(request.q, request.r, request.kind, &mut wallet) {
            info!(kind = ?request.kind, q = request.q, r = request.r, "Placed structure");
        } else {
            debug!(kind = ?request.kind, q = request.q, r = request.r, "Placement rejected");
        }
    }
}

/// Paid expansion: validates affordability of all three costs, debits them
/// as one transaction, then opens the next ring.
pub fn handle_expand_requests(
    mut requests: MessageReader<ExpandTerritoryRequest>,
    mut map: ResMut<TerritoryMap>,
    mut wallet: ResMut<Wallet>,
) {
    for _ in requests.read() {
        if !map.can_expand() {
            debug!("Expansion rejected: no locked tiles in the next ring");
            continue;
        }
        let costs = map.expansion_cost();
        if !wallet.debit_all(&costs) {
            debug!(?costs, "Expansion unaffordable");
            continue;
        }
        map.expand_ring();
        info!(unlocked = map.unlocked_count(), "Territory expanded");
    }
}

/// Opens tiles when cumulative BioMatter crosses a milestone. Runs only on
/// wallet changes; unlocking is monotonic so re-checks are harmless.
pub fn unlock_tiles_from_biomatter(wallet: Res<Wallet>, mut map: ResMut<TerritoryMap>) {
    if !wallet.is_changed() {
        return;
    }
    let opened = map.unlock_for_biomatter(wallet.bio_matter);
    if opened > 0 {
        info!(opened, bio_matter = wallet.bio_matter, "BioMatter milestone unlocked tiles");
    }
}
