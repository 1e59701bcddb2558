use std::sync::Arc;

use uuid::Uuid;

use remy_catalog::{ProductAmount, Quantity, UnitCatalog};
use remy_inventory::{aggregate, Purchase, RawPurchaseItem};

use crate::repository::Store;
use crate::{CoreError, CoreResult};

/// Turns raw (product name, quantity, unit) rows into a persisted,
/// deduplicated purchase record.
pub struct PurchaseService {
    store: Arc<dyn Store>,
    catalog: Arc<UnitCatalog>,
}

impl PurchaseService {
    pub fn new(store: Arc<dyn Store>, catalog: Arc<UnitCatalog>) -> Self {
        Self { store, catalog }
    }

    /// Resolves, aggregates and commits a purchase. Any unrecognized unit or
    /// unresolvable product name fails the whole operation; no partial
    /// purchase is ever created.
    pub async fn create_purchase(&self, items: &[RawPurchaseItem]) -> CoreResult<Purchase> {
        if items.is_empty() {
            return Err(CoreError::Validation(
                "purchase must contain at least one item".to_string(),
            ));
        }

        let mut resolved = Vec::with_capacity(items.len());
        for item in items {
            let unit = self.catalog.resolve(&item.unit)?.clone();
            let product = self
                .store
                .find_product_by_name(&item.product_name)
                .await?
                .ok_or_else(|| CoreError::UnknownProduct(item.product_name.clone()))?;
            resolved.push(ProductAmount::new(
                product,
                Quantity::new(item.quantity, unit),
            ));
        }

        let purchase = Purchase::new(aggregate(resolved)?);

        let mut tx = self.store.begin().await?;
        if let Err(err) = tx.save_purchase(&purchase).await {
            tx.rollback().await?;
            return Err(err.into());
        }
        tx.commit().await?;

        tracing::info!(id = %purchase.id, items = purchase.items.len(), "purchase recorded");
        Ok(purchase)
    }

    /// Read-back by the purchase's opaque id.
    pub async fn get_purchase(&self, id: Uuid) -> CoreResult<Option<Purchase>> {
        Ok(self.store.get_purchase(id).await?)
    }
}
