use async_trait::async_trait;
use uuid::Uuid;

use remy_catalog::Product;
use remy_inventory::{Cart, InventoryLedger, Place, Purchase};
use remy_recipes::{Interaction, Recipe};

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Product lookup by exact name match.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_product_by_name(&self, name: &str)
        -> Result<Option<Product>, RepositoryError>;
}

#[async_trait]
pub trait RecipeRepository: Send + Sync {
    async fn get_recipe(&self, id: Uuid) -> Result<Option<Recipe>, RepositoryError>;
}

/// Default-place resolution: an explicit place id wins when the profile is
/// a member of it, otherwise the profile's default (or first) place.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn place_or_default(
        &self,
        profile_id: Uuid,
        place_id: Option<Uuid>,
    ) -> Result<Option<Place>, RepositoryError>;
}

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// The place's ledger, materialized empty if nothing is stocked yet.
    async fn ledger_for_place(&self, place_id: Uuid)
        -> Result<InventoryLedger, RepositoryError>;

    async fn cart_for_place(&self, place_id: Uuid) -> Result<Cart, RepositoryError>;
}

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    async fn find_interaction(
        &self,
        profile_id: Uuid,
        recipe_id: Uuid,
    ) -> Result<Option<Interaction>, RepositoryError>;
}

#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    async fn get_purchase(&self, id: Uuid) -> Result<Option<Purchase>, RepositoryError>;
}

/// Entry point for the scoped-transaction contract: acquire a scope,
/// stage every mutation, then commit or roll back as one unit.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn TransactionScope>, RepositoryError>;
}

/// One atomic unit of work. Writes are staged, not visible to readers, until
/// `commit`; `rollback` (or dropping the scope) discards all of them.
#[async_trait]
pub trait TransactionScope: Send + Sync {
    async fn save_ledger(&mut self, ledger: &InventoryLedger) -> Result<(), RepositoryError>;

    async fn save_interaction(&mut self, interaction: &Interaction)
        -> Result<(), RepositoryError>;

    async fn save_purchase(&mut self, purchase: &Purchase) -> Result<(), RepositoryError>;

    async fn save_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}

/// Everything the orchestration services need from the backing store.
pub trait Store:
    ProductRepository
    + RecipeRepository
    + PlaceRepository
    + InventoryRepository
    + InteractionRepository
    + PurchaseRepository
    + UnitOfWork
{
}

impl<T> Store for T where
    T: ProductRepository
        + RecipeRepository
        + PlaceRepository
        + InventoryRepository
        + InteractionRepository
        + PurchaseRepository
        + UnitOfWork
{
}
