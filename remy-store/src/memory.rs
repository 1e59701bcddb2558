use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use remy_catalog::Product;
use remy_core::repository::{
    InteractionRepository, InventoryRepository, PlaceRepository, ProductRepository,
    PurchaseRepository, RecipeRepository, RepositoryError, TransactionScope, UnitOfWork,
};
use remy_inventory::{Cart, InventoryLedger, Place, Purchase};
use remy_recipes::{Interaction, Recipe};

#[derive(Debug, Clone, Default)]
struct State {
    products: HashMap<Uuid, Product>,
    recipes: HashMap<Uuid, Recipe>,
    // insertion-ordered so "first place" resolution is deterministic
    places: Vec<Place>,
    ledgers: HashMap<Uuid, InventoryLedger>,
    carts: HashMap<Uuid, Cart>,
    interactions: HashMap<(Uuid, Uuid), Interaction>,
    purchases: HashMap<Uuid, Purchase>,
}

/// In-memory store with scoped-transaction semantics. Writes go through a
/// `MemoryTransaction`, which stages them and applies every staged write
/// under a single lock on commit; nothing is visible to readers before that.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Storage("state lock poisoned".to_string()))
    }

    pub fn insert_product(&self, product: Product) -> Result<(), RepositoryError> {
        self.lock()?.products.insert(product.id, product);
        Ok(())
    }

    pub fn insert_recipe(&self, recipe: Recipe) -> Result<(), RepositoryError> {
        self.lock()?.recipes.insert(recipe.id, recipe);
        Ok(())
    }

    pub fn insert_place(&self, place: Place) -> Result<(), RepositoryError> {
        self.lock()?.places.push(place);
        Ok(())
    }

    pub fn seed_ledger(&self, ledger: InventoryLedger) -> Result<(), RepositoryError> {
        self.lock()?.ledgers.insert(ledger.place_id, ledger);
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn find_product_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .lock()?
            .products
            .values()
            .find(|product| product.name == name)
            .cloned())
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.lock()?.recipes.get(&id).cloned())
    }
}

#[async_trait]
impl PlaceRepository for MemoryStore {
    async fn place_or_default(
        &self,
        profile_id: Uuid,
        place_id: Option<Uuid>,
    ) -> Result<Option<Place>, RepositoryError> {
        let state = self.lock()?;
        let member_places = || state.places.iter().filter(|p| p.has_member(profile_id));

        if let Some(id) = place_id {
            if let Some(place) = member_places().find(|p| p.id == id) {
                return Ok(Some(place.clone()));
            }
            // wrong or foreign id falls back to the default place
        }
        let default = member_places().find(|p| p.is_default_for(profile_id));
        Ok(default.or_else(|| member_places().next()).cloned())
    }
}

#[async_trait]
impl InventoryRepository for MemoryStore {
    async fn ledger_for_place(
        &self,
        place_id: Uuid,
    ) -> Result<InventoryLedger, RepositoryError> {
        Ok(self
            .lock()?
            .ledgers
            .get(&place_id)
            .cloned()
            .unwrap_or_else(|| InventoryLedger::new(place_id)))
    }

    async fn cart_for_place(&self, place_id: Uuid) -> Result<Cart, RepositoryError> {
        Ok(self
            .lock()?
            .carts
            .get(&place_id)
            .cloned()
            .unwrap_or_else(|| Cart::new(place_id)))
    }
}

#[async_trait]
impl InteractionRepository for MemoryStore {
    async fn find_interaction(
        &self,
        profile_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<Option<Interaction>, RepositoryError> {
        Ok(self
            .lock()?
            .interactions
            .get(&(profile_id, recipe_id))
            .cloned())
    }
}

#[async_trait]
impl PurchaseRepository for MemoryStore {
    async fn get_purchase(&self, id: Uuid) -> Result<Option<Purchase>, RepositoryError> {
        Ok(self.lock()?.purchases.get(&id).cloned())
    }
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn TransactionScope>, RepositoryError> {
        Ok(Box::new(MemoryTransaction {
            state: Arc::clone(&self.state),
            staged: Vec::new(),
        }))
    }
}

enum StagedWrite {
    Ledger(InventoryLedger),
    Interaction(Interaction),
    Purchase(Purchase),
    Cart(Cart),
}

/// Staged writes for one unit of work. Dropping the scope without committing
/// discards everything, same as an explicit rollback.
pub struct MemoryTransaction {
    state: Arc<Mutex<State>>,
    staged: Vec<StagedWrite>,
}

#[async_trait]
impl TransactionScope for MemoryTransaction {
    async fn save_ledger(&mut self, ledger: &InventoryLedger) -> Result<(), RepositoryError> {
        self.staged.push(StagedWrite::Ledger(ledger.clone()));
        Ok(())
    }

    async fn save_interaction(
        &mut self,
        interaction: &Interaction,
    ) -> Result<(), RepositoryError> {
        self.staged.push(StagedWrite::Interaction(interaction.clone()));
        Ok(())
    }

    async fn save_purchase(&mut self, purchase: &Purchase) -> Result<(), RepositoryError> {
        self.staged.push(StagedWrite::Purchase(purchase.clone()));
        Ok(())
    }

    async fn save_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError> {
        self.staged.push(StagedWrite::Cart(cart.clone()));
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| RepositoryError::Storage("state lock poisoned".to_string()))?;

        let writes = self.staged.len();
        for write in self.staged {
            match write {
                StagedWrite::Ledger(ledger) => {
                    state.ledgers.insert(ledger.place_id, ledger);
                }
                StagedWrite::Interaction(interaction) => {
                    state.interactions.insert(
                        (interaction.profile_id, interaction.recipe_id),
                        interaction,
                    );
                }
                StagedWrite::Purchase(purchase) => {
                    state.purchases.insert(purchase.id, purchase);
                }
                StagedWrite::Cart(cart) => {
                    state.carts.insert(cart.place_id, cart);
                }
            }
        }
        tracing::debug!(writes, "transaction committed");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        tracing::debug!(writes = self.staged.len(), "transaction rolled back");
        Ok(())
    }
}
