pub mod amount;
pub mod convert;
pub mod product;
pub mod quantity;
pub mod units;

pub use amount::{AmountError, ProductAmount};
pub use convert::{convert, ConversionError};
pub use product::Product;
pub use quantity::Quantity;
pub use units::{Dimension, Unit, UnitCatalog, UnitError, PLAIN_UNIT};
