use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product with the physical coefficients needed to reconcile amounts
/// expressed in different dimensions. All coefficients are optional; a
/// conversion that needs an absent one fails instead of guessing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// kg per cubic meter (mass ↔ volume).
    pub density: Option<Decimal>,
    /// kg per counted unit (mass ↔ count).
    pub avg_unit_weight: Option<Decimal>,
    /// liters per counted unit (volume ↔ count).
    pub avg_unit_volume: Option<Decimal>,
}

impl Product {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            density: None,
            avg_unit_weight: None,
            avg_unit_volume: None,
        }
    }

    pub fn with_density(mut self, density: Decimal) -> Self {
        self.density = Some(density);
        self
    }

    pub fn with_avg_unit_weight(mut self, weight: Decimal) -> Self {
        self.avg_unit_weight = Some(weight);
        self
    }

    pub fn with_avg_unit_volume(mut self, volume: Decimal) -> Self {
        self.avg_unit_volume = Some(volume);
        self
    }
}
