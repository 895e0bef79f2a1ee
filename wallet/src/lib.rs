use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
};

/// The four tracked resource pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum ResourceKind {
    Energy,
    BioMatter,
    Minerals,
    RareCrystals,
}

/// Result of a purchase attempt against the ledger. The cost is reported
/// either way so the UI can display what the next purchase requires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchaseOutcome {
    pub success: bool,
    pub cost: f64,
}

/// Holds every spendable quantity. No field ever goes negative: credits
/// reject negative amounts and debits are check-then-apply.
#[derive(Resource, Reflect, Default, Debug, Clone, PartialEq)]
#[reflect(Resource, Default)]
pub struct Wallet {
    pub energy: f64,
    pub bio_matter: f64,
    pub minerals: f64,
    pub rare_crystals: f64,
}

impl Wallet {
    pub fn amount(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::Energy => self.energy,
            ResourceKind::BioMatter => self.bio_matter,
            ResourceKind::Minerals => self.minerals,
            ResourceKind::RareCrystals => self.rare_crystals,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> &mut f64 {
        match kind {
            ResourceKind::Energy => &mut self.energy,
            ResourceKind::BioMatter => &mut self.bio_matter,
            ResourceKind::Minerals => &mut self.minerals,
            ResourceKind::RareCrystals => &mut self.rare_crystals,
        }
    }

    /// Adds `amount` to the pool. Non-positive or non-finite amounts are ignored.
    pub fn credit(&mut self, kind: ResourceKind, amount: f64) {
        if !(amount > 0.0) || !amount.is_finite() {
            return;
        }
        *self.slot_mut(kind) += amount;
    }

    /// Removes `amount` from the pool if the balance covers it. Returns
    /// whether the debit happened; on failure the wallet is untouched.
    pub fn debit(&mut self, kind: ResourceKind, amount: f64) -> bool {
        if amount < 0.0 || !amount.is_finite() {
            return false;
        }
        let slot = self.slot_mut(kind);
        if *slot < amount {
            return false;
        }
        *slot -= amount;
        true
    }

    pub fn can_afford(&self, costs: &[(ResourceKind, f64)]) -> bool {
        costs.iter().all(|&(kind, amount)| self.amount(kind) >= amount)
    }

    /// Multi-resource debit as one transaction: every cost is validated
    /// before any pool is touched, so a placement or expansion either fully
    /// succeeds or leaves the wallet unchanged.
    pub fn debit_all(&mut self, costs: &[(ResourceKind, f64)]) -> bool {
        if costs
            .iter()
            .any(|&(_, amount)| amount < 0.0 || !amount.is_finite())
        {
            return false;
        }
        if !self.can_afford(costs) {
            return false;
        }
        for &(kind, amount) in costs {
            *self.slot_mut(kind) -= amount;
        }
        true
    }
}

pub struct WalletPlugin;

impl Plugin for WalletPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Wallet>().init_resource::<Wallet>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_and_debit() {
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::Energy, 100.0);
        assert_eq!(wallet.energy, 100.0);
        assert!(wallet.debit(ResourceKind::Energy, 40.0));
        assert_eq!(wallet.energy, 60.0);
    }

    #[test]
    fn test_debit_never_goes_negative() {
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::BioMatter, 10.0);
        assert!(!wallet.debit(ResourceKind::BioMatter, 10.5));
        assert_eq!(wallet.bio_matter, 10.0);
        assert!(!wallet.debit(ResourceKind::BioMatter, -1.0));
        assert_eq!(wallet.bio_matter, 10.0);
    }

    #[test]
    fn test_negative_credit_ignored() {
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::Minerals, -5.0);
        wallet.credit(ResourceKind::Minerals, f64::NAN);
        assert_eq!(wallet.minerals, 0.0);
    }

    #[test]
    fn test_debit_all_is_atomic() {
        let mut wallet = Wallet::default();
        wallet.credit(ResourceKind::Energy, 100.0);
        wallet.credit(ResourceKind::BioMatter, 5.0);

        // Second cost unaffordable: nothing may be deducted.
        let costs = [(ResourceKind::Energy, 50.0), (ResourceKind::BioMatter, 10.0)];
        assert!(!wallet.debit_all(&costs));
        assert_eq!(wallet.energy, 100.0);
        assert_eq!(wallet.bio_matter, 5.0);

        let costs = [(ResourceKind::Energy, 50.0), (ResourceKind::BioMatter, 5.0)];
        assert!(wallet.debit_all(&costs));
        assert_eq!(wallet.energy, 50.0);
        assert_eq!(wallet.bio_matter, 0.0);
    }
}
