use serde::{Deserialize, Serialize};
use uuid::Uuid;

use remy_catalog::{AmountError, ProductAmount};

/// What happened to a ledger entry when an amount was depleted from it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Depletion {
    /// Entry reduced, a positive remainder is still held.
    Reduced,
    /// Entry exhausted and deleted.
    Removed,
    /// No entry for that product; nothing changed. Cooking tolerates this.
    Insufficient,
}

/// One product line within a ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub amount: ProductAmount,
}

/// The inventory of one place: at most one entry per product, iterated in
/// stable insertion order. Same-product additions merge, never duplicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryLedger {
    pub id: Uuid,
    pub place_id: Uuid,
    entries: Vec<LedgerEntry>,
}

impl InventoryLedger {
    pub fn new(place_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            place_id,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_for(&self, product_id: Uuid) -> Option<&LedgerEntry> {
        self.entries
            .iter()
            .find(|entry| entry.amount.product.id == product_id)
    }

    /// Merges the amount into the existing entry for its product (keeping
    /// the entry's unit) or appends a new entry.
    pub fn upsert(&mut self, amount: ProductAmount) -> Result<(), AmountError> {
        let product_id = amount.product.id;
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.amount.product.id == product_id)
        {
            Some(entry) => entry.amount.add(&amount),
            None => {
                self.entries.push(LedgerEntry {
                    id: Uuid::new_v4(),
                    amount,
                });
                Ok(())
            }
        }
    }

    /// Subtracts `required` from the entry holding its product. A missing
    /// entry is `Insufficient` and a no-op; an exhausted entry is deleted.
    pub fn deplete(&mut self, required: &ProductAmount) -> Result<Depletion, AmountError> {
        let product_id = required.product.id;
        let Some(position) = self
            .entries
            .iter()
            .position(|entry| entry.amount.product.id == product_id)
        else {
            return Ok(Depletion::Insufficient);
        };

        if self.entries[position].amount.subtract(required)? {
            self.entries.remove(position);
            Ok(Depletion::Removed)
        } else {
            Ok(Depletion::Reduced)
        }
    }
}
