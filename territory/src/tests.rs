use {
    crate::{TerritoryMap, adjacency_bonus, placement_allowed, spec},
    territory_components::{StructureKind, TerrainKind},
    wallet::{ResourceKind, Wallet},
};

fn funded_wallet() -> Wallet {
    let mut wallet = Wallet::default();
    wallet.credit(ResourceKind::Energy, 100_000.0);
    wallet.credit(ResourceKind::BioMatter, 100_000.0);
    wallet.credit(ResourceKind::Minerals, 100_000.0);
    wallet
}

fn find_tile(map: &TerritoryMap, terrain: TerrainKind, unlocked: bool) -> Option<(i32, i32)> {
    map.tiles
        .values()
        .find(|t| t.terrain == terrain && t.unlocked == unlocked && t.structure.is_none())
        .map(|t| (t.q, t.r))
}

#[test]
fn test_generation_is_deterministic() {
    let a = TerritoryMap::generate();
    let b = TerritoryMap::generate();
    assert_eq!(a.tiles.len(), 400);
    for (key, tile) in &a.tiles {
        let other = &b.tiles[key];
        assert_eq!(tile.terrain, other.terrain);
        assert_eq!(tile.unlocked, other.unlocked);
    }
}

#[test]
fn test_starting_region_is_unlocked_barren() {
    let map = TerritoryMap::generate();
    let center = map.tile(10, 10).unwrap();
    assert!(center.unlocked);
    assert_eq!(center.terrain, TerrainKind::Barren);
    // Manhattan radius 2 around the center: 13 tiles.
    assert_eq!(map.unlocked_count(), 13);
}

#[test]
fn test_place_terraformer_on_barren() {
    let mut map = TerritoryMap::generate();
    let mut wallet = funded_wallet();
    assert!(map.place_structure(10, 10, StructureKind::Terraformer, &mut wallet));
    assert_eq!(
        map.tile(10, 10).unwrap().structure,
        Some(StructureKind::Terraformer)
    );
    assert_eq!(wallet.energy, 100_000.0 - 50.0);
    assert_eq!(wallet.bio_matter, 100_000.0 - 10.0);
}

#[test]
fn test_terraformer_rejected_on_water() {
    let mut map = TerritoryMap::generate();
    map.unlock_within(crate::GRID_SIZE);
    let (q, r) = find_tile(&map, TerrainKind::Water, true).expect("map has water");
    let mut wallet = funded_wallet();
    let before = wallet.clone();

    assert!(!map.place_structure(q, r, StructureKind::Terraformer, &mut wallet));
    assert_eq!(wallet, before);
    assert_eq!(map.tile(q, r).unwrap().structure, None);
}

#[test]
fn test_locked_and_occupied_tiles_rejected() {
    let mut map = TerritoryMap::generate();
    let mut wallet = funded_wallet();

    // Locked tile.
    let (q, r) = find_tile(&map, TerrainKind::Barren, false).expect("locked barren exists");
    assert!(!map.place_structure(q, r, StructureKind::Terraformer, &mut wallet));

    // Occupied tile.
    assert!(map.place_structure(10, 10, StructureKind::Terraformer, &mut wallet));
    assert!(!map.place_structure(10, 10, StructureKind::ResearchHub, &mut wallet));
}

#[test]
fn test_placement_is_atomic_when_one_cost_unaffordable() {
    let mut map = TerritoryMap::generate();
    let mut wallet = Wallet::default();
    // Enough energy, not enough BioMatter.
    wallet.credit(ResourceKind::Energy, 1_000.0);
    wallet.credit(ResourceKind::BioMatter, 5.0);

    assert!(!map.place_structure(10, 10, StructureKind::Terraformer, &mut wallet));
    assert_eq!(wallet.energy, 1_000.0);
    assert_eq!(wallet.bio_matter, 5.0);
    assert_eq!(map.tile(10, 10).unwrap().structure, None);
}

#[test]
fn test_adjacency_bonus_extractor_near_volcano() {
    let mut map = TerritoryMap::generate();
    map.unlock_within(crate::GRID_SIZE);

    let near_volcano = map
        .tiles
        .values()
        .find(|t| {
            (t.terrain == TerrainKind::Mountain || t.terrain == TerrainKind::Crater)
                && map
                    .adjacent(t.q, t.r)
                    .iter()
                    .any(|n| n.terrain == TerrainKind::Volcano)
        })
        .map(|t| (t.q, t.r));

    if let Some((q, r)) = near_volcano {
        let tile = map.tile(q, r).unwrap();
        assert!(placement_allowed(&map, tile, StructureKind::Extractor));
        assert_eq!(adjacency_bonus(&map, tile, StructureKind::Extractor), 1.5);
    }
}

#[test]
fn test_total_production_applies_stored_bonus() {
    let mut map = TerritoryMap::generate();
    let mut wallet = funded_wallet();
    assert!(map.place_structure(10, 10, StructureKind::Terraformer, &mut wallet));

    let rates = map.total_production();
    let bonus = map.tile(10, 10).unwrap().adjacency_bonus;
    assert_eq!(rates.bio_matter, spec(StructureKind::Terraformer).production.bio_matter * bonus);
    assert_eq!(rates.energy, 0.0);
}

#[test]
fn test_extractor_on_mountain_yields_minerals() {
    let mut map = TerritoryMap::generate();
    map.unlock_within(crate::GRID_SIZE);
    let (q, r) = find_tile(&map, TerrainKind::Mountain, true).expect("map has mountains");
    let mut wallet = funded_wallet();

    assert!(map.place_structure(q, r, StructureKind::Extractor, &mut wallet));
    let rates = map.total_production();
    let bonus = map.tile(q, r).unwrap().adjacency_bonus;
    assert_eq!(rates.minerals, 1.0 * bonus);
}

#[test]
fn test_biomatter_milestones_open_rings() {
    let mut map = TerritoryMap::generate();
    let before = map.unlocked_count();

    assert_eq!(map.unlock_for_biomatter(99.0), 0);
    assert_eq!(map.unlocked_count(), before);

    let opened = map.unlock_for_biomatter(100.0);
    assert!(opened > 0);

    // Re-applying the same milestone is a no-op.
    assert_eq!(map.unlock_for_biomatter(100.0), 0);

    map.unlock_for_biomatter(5_000.0);
    assert_eq!(map.unlocked_count(), 400);
}

#[test]
fn test_expand_ring_opens_exactly_next_ring() {
    let mut map = TerritoryMap::generate();
    assert!(map.can_expand());
    assert!(map.expand_ring());
    // Ring at Manhattan distance 3 inside a 20x20 grid has 12 tiles.
    assert_eq!(map.unlocked_count(), 25);
}

#[test]
fn test_expansion_cost_tiers() {
    let map = TerritoryMap::generate();
    // 13 unlocked tiles -> tier 0.
    let costs = map.expansion_cost();
    assert_eq!(costs[0], (ResourceKind::Energy, 500.0));
    assert_eq!(costs[1], (ResourceKind::BioMatter, 100.0));
    assert_eq!(costs[2], (ResourceKind::Minerals, 50.0));

    let mut map = map;
    map.unlock_within(4);
    // 41 unlocked tiles -> tier 1.
    assert_eq!(map.unlocked_count(), 41);
    assert_eq!(map.expansion_cost()[0], (ResourceKind::Energy, 750.0));
}

#[test]
fn test_restore_unlocked_reaches_saved_count() {
    let mut original = TerritoryMap::generate();
    original.expand_ring();
    original.expand_ring();
    let count = original.unlocked_count();

    let mut restored = TerritoryMap::generate();
    restored.restore_unlocked(count);
    assert_eq!(restored.unlocked_count(), count);
}
