use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use remy_catalog::{AmountError, ProductAmount};

/// A purchase line as it arrives from the outside: nothing resolved yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPurchaseItem {
    pub product_name: String,
    pub quantity: Decimal,
    pub unit: String,
}

impl RawPurchaseItem {
    pub fn new(product_name: impl Into<String>, quantity: Decimal, unit: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("a purchase must contain at least one item")]
    Empty,

    #[error(transparent)]
    Amount(#[from] AmountError),
}

/// Merges duplicate products in a resolved item list. The first occurrence
/// of a product fixes the unit; later occurrences are converted into it and
/// added. Output preserves first-occurrence order of distinct products.
pub fn aggregate(items: Vec<ProductAmount>) -> Result<Vec<ProductAmount>, AggregateError> {
    if items.is_empty() {
        return Err(AggregateError::Empty);
    }

    let mut merged: Vec<ProductAmount> = Vec::new();
    for item in items {
        match merged
            .iter_mut()
            .find(|held| held.product.id == item.product.id)
        {
            Some(held) => held.add(&item)?,
            None => merged.push(item),
        }
    }
    Ok(merged)
}

/// An immutable, aggregated checkout event, addressable later by its opaque
/// id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ProductAmount>,
}

impl Purchase {
    pub fn new(items: Vec<ProductAmount>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            items,
        }
    }
}
