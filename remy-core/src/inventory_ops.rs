use std::sync::Arc;

use uuid::Uuid;

use remy_catalog::{ProductAmount, Quantity, UnitCatalog};
use remy_inventory::{Cart, InventoryLedger, RawPurchaseItem};

use crate::repository::Store;
use crate::{CoreError, CoreResult};

/// Bulk additions to a place's inventory. The whole batch lands or none of
/// it does: a single unresolvable row discards every staged change.
pub struct InventoryService {
    store: Arc<dyn Store>,
    catalog: Arc<UnitCatalog>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn Store>, catalog: Arc<UnitCatalog>) -> Self {
        Self { store, catalog }
    }

    pub async fn add_items(
        &self,
        profile_id: Uuid,
        place_id: Option<Uuid>,
        items: &[RawPurchaseItem],
    ) -> CoreResult<InventoryLedger> {
        let place = self
            .store
            .place_or_default(profile_id, place_id)
            .await?
            .ok_or(CoreError::PlaceNotFound)?;
        let mut ledger = self.store.ledger_for_place(place.id).await?;

        for item in items {
            let unit = self.catalog.resolve(&item.unit)?.clone();
            let product = self
                .store
                .find_product_by_name(&item.product_name)
                .await?
                .ok_or_else(|| CoreError::UnknownProduct(item.product_name.clone()))?;
            ledger.upsert(ProductAmount::new(
                product,
                Quantity::new(item.quantity, unit),
            ))?;
        }

        let mut tx = self.store.begin().await?;
        if let Err(err) = tx.save_ledger(&ledger).await {
            tx.rollback().await?;
            return Err(err.into());
        }
        tx.commit().await?;

        tracing::info!(place = %place.name, items = items.len(), "inventory items added");
        Ok(ledger)
    }
}

/// Copies a recipe's quantified ingredients into a place's shopping cart.
pub struct CartService {
    store: Arc<dyn Store>,
}

impl CartService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn add_recipe_to_cart(
        &self,
        profile_id: Uuid,
        recipe_id: Uuid,
        place_id: Option<Uuid>,
    ) -> CoreResult<Cart> {
        let recipe = self
            .store
            .get_recipe(recipe_id)
            .await?
            .ok_or(CoreError::RecipeNotFound(recipe_id))?;
        let place = self
            .store
            .place_or_default(profile_id, place_id)
            .await?
            .ok_or(CoreError::PlaceNotFound)?;

        let mut cart = self.store.cart_for_place(place.id).await?;
        for ingredient in &recipe.ingredients {
            if let Some(amount) = ingredient.to_amount() {
                cart.add(amount)?;
            }
        }

        let mut tx = self.store.begin().await?;
        if let Err(err) = tx.save_cart(&cart).await {
            tx.rollback().await?;
            return Err(err.into());
        }
        tx.commit().await?;

        tracing::info!(recipe = %recipe.title, place = %place.name, "recipe added to cart");
        Ok(cart)
    }
}
