pub mod cooking;
pub mod inventory_ops;
pub mod purchasing;
pub mod repository;

pub use cooking::{CookingOutcome, CookingService, CookingState};
pub use inventory_ops::{CartService, InventoryService};
pub use purchasing::PurchaseService;
pub use repository::{RepositoryError, Store, TransactionScope, UnitOfWork};

use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("recipe not found: {0}")]
    RecipeNotFound(Uuid),

    #[error("no place available for this profile")]
    PlaceNotFound,

    #[error("cannot resolve product: '{0}'")]
    UnknownProduct(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error(transparent)]
    Unit(#[from] remy_catalog::UnitError),

    #[error(transparent)]
    Conversion(#[from] remy_catalog::ConversionError),

    #[error(transparent)]
    Amount(#[from] remy_catalog::AmountError),

    #[error(transparent)]
    Rating(#[from] remy_recipes::RatingError),

    #[error(transparent)]
    Aggregate(#[from] remy_inventory::AggregateError),

    #[error(transparent)]
    Repository(#[from] repository::RepositoryError),
}

pub type CoreResult<T> = Result<T, CoreError>;
