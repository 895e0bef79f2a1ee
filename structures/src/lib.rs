use {
    bevy::prelude::*,
    progress_events::BuyStructureRequest,
    system_schedule::GameSchedule,
    wallet::{PurchaseOutcome, ResourceKind, Wallet},
};

/// One purchasable tier of the global structure catalog. Everything but
/// `owned` is immutable at runtime.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub unlock_cost: f64,
    pub base_cost: f64,
    /// Energy per second from one owned unit.
    pub base_production: f64,
    pub owned: u32,
    pub tier: u32,
}

impl CatalogEntry {
    fn new(id: &str, name: &str, unlock_cost: f64, base_cost: f64, base_production: f64, tier: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unlock_cost,
            base_cost,
            base_production,
            owned: 0,
            tier,
        }
    }
}

/// The five-tier energy structure catalog with per-entry owned counts.
#[derive(Resource, Reflect, Debug, Clone, PartialEq)]
#[reflect(Resource, Default)]
pub struct StructureCatalog {
    pub entries: Vec<CatalogEntry>,
}

impl Default for StructureCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                CatalogEntry::new("basic_generator", "Basic Generator", 0.0, 50.0, 1.0, 1),
                CatalogEntry::new("solar_array", "Solar Array", 500.0, 300.0, 5.0, 2),
                CatalogEntry::new("fusion_reactor", "Fusion Reactor", 5_000.0, 2_000.0, 25.0, 3),
                CatalogEntry::new("quantum_factory", "Quantum Factory", 50_000.0, 15_000.0, 100.0, 4),
                CatalogEntry::new("genesis_core", "Genesis Core", 500_000.0, 100_000.0, 500.0, 5),
            ],
        }
    }
}

impl StructureCatalog {
    pub fn entry(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Cost of the next unit of `entry`, growing geometrically with ownership.
    pub fn next_cost(entry: &CatalogEntry) -> f64 {
        balance::structure_cost(entry.base_cost, entry.owned)
    }

    /// Buys one unit of the structure with the given id. Reports the cost on
    /// failure so the UI can show what is missing.
    pub fn buy(&mut self, id: &str, wallet: &mut Wallet) -> PurchaseOutcome {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return PurchaseOutcome { success: false, cost: 0.0 };
        };
        let cost = Self::next_cost(entry);
        if !wallet.debit(ResourceKind::Energy, cost) {
            return PurchaseOutcome { success: false, cost };
        }
        entry.owned += 1;
        PurchaseOutcome { success: true, cost }
    }

    /// Summed energy per second over all owned units.
    pub fn total_production(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.base_production * e.owned as f64)
            .sum()
    }

    /// Drops every owned count back to zero; the catalog itself is static.
    pub fn reset_owned(&mut self) {
        for entry in &mut self.entries {
            entry.owned = 0;
        }
    }
}

pub struct StructuresPlugin;

impl Plugin for StructuresPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<StructureCatalog>()
            .init_resource::<StructureCatalog>()
            .add_systems(Update, handle_buy_requests.in_set(GameSchedule::PlayerActions));
    }
}

fn handle_buy_requests(
    mut requests: MessageReader<BuyStructureRequest>,
    mut catalog: ResMut<StructureCatalog>,
    mut wallet: ResMut<Wallet>,
) {
    for request in requests.read() {
        let outcome = catalog.buy(&request.id, &mut wallet);
        if outcome.success {
            info!(id = %request.id, cost = outcome.cost, "Catalog structure purchased");
        } else {
            debug!(id = %request.id, cost = outcome.cost, "Catalog purchase rejected");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buy_increments_owned_and_raises_cost() {
        let mut catalog = StructureCatalog::default();
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::Energy, 200.0);

        let first = catalog.buy("basic_generator", &mut wallet);
        assert!(first.success);
        assert_eq!(first.cost, 50.0);

        let second = catalog.buy("basic_generator", &mut wallet);
        assert!(second.success);
        assert_eq!(second.cost, 57.0); // floor(50 * 1.15)
        assert_eq!(catalog.entry("basic_generator").map(|e| e.owned), Some(2));

        // The advertised next cost is exactly what the next buy charges.
        let advertised = StructureCatalog::next_cost(catalog.entry("basic_generator").unwrap());
        assert_eq!(catalog.buy("basic_generator", &mut wallet).cost, advertised);
    }

    #[test]
    fn test_unlock_thresholds_ascend_with_tier() {
        let catalog = StructureCatalog::default();
        let thresholds: Vec<f64> = catalog.entries.iter().map(|e| e.unlock_cost).collect();
        assert_eq!(thresholds, vec![0.0, 500.0, 5_000.0, 50_000.0, 500_000.0]);
        // The entry tier order the UI shows matches the threshold order.
        for pair in catalog.entries.windows(2) {
            assert!(pair[1].unlock_cost > pair[0].unlock_cost);
            assert!(pair[1].tier > pair[0].tier);
        }
    }

    #[test]
    fn test_buy_unknown_id_is_rejected() {
        let mut catalog = StructureCatalog::default();
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::Energy, 1_000.0);
        assert!(!catalog.buy("dyson_sphere", &mut wallet).success);
        assert_eq!(wallet.energy, 1_000.0);
    }

    #[test]
    fn test_total_production_sums_owned_units() {
        let mut catalog = StructureCatalog::default();
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::Energy, 10_000.0);
        assert!(catalog.buy("basic_generator", &mut wallet).success);
        assert!(catalog.buy("solar_array", &mut wallet).success);
        assert!(catalog.buy("fusion_reactor", &mut wallet).success);
        assert_eq!(catalog.total_production(), 31.0);
    }

    #[test]
    fn test_insufficient_funds_leaves_catalog_unchanged() {
        let mut catalog = StructureCatalog::default();
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::Energy, 49.0);
        let outcome = catalog.buy("basic_generator", &mut wallet);
        assert!(!outcome.success);
        assert_eq!(outcome.cost, 50.0);
        assert_eq!(wallet.energy, 49.0);
        assert_eq!(catalog.entry("basic_generator").map(|e| e.owned), Some(0));
    }
}
