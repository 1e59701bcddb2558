use serde::{Deserialize, Serialize};
use uuid::Uuid;

use remy_catalog::{AmountError, ProductAmount};

/// A place's shopping list. Same-product additions merge like ledger
/// entries do, so a recipe added twice doubles its amounts instead of
/// duplicating lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub place_id: Uuid,
    items: Vec<ProductAmount>,
}

impl Cart {
    pub fn new(place_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            place_id,
            items: Vec::new(),
        }
    }

    pub fn items(&self) -> &[ProductAmount] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add(&mut self, amount: ProductAmount) -> Result<(), AmountError> {
        match self
            .items
            .iter_mut()
            .find(|held| held.product.id == amount.product.id)
        {
            Some(held) => held.add(&amount),
            None => {
                self.items.push(amount);
                Ok(())
            }
        }
    }

    pub fn remove(&mut self, product_id: Uuid) -> Option<ProductAmount> {
        let position = self
            .items
            .iter()
            .position(|held| held.product.id == product_id)?;
        Some(self.items.remove(position))
    }
}
