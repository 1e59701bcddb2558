pub mod cart;
pub mod ledger;
pub mod place;
pub mod purchase;

pub use cart::Cart;
pub use ledger::{Depletion, InventoryLedger, LedgerEntry};
pub use place::{Place, PlaceMember};
pub use purchase::{aggregate, AggregateError, Purchase, RawPurchaseItem};
