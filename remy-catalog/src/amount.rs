use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::convert::{convert, ConversionError};
use crate::product::Product;
use crate::quantity::Quantity;

#[derive(Debug, thiserror::Error)]
pub enum AmountError {
    /// Add/subtract across different products is an integration bug, not a
    /// recoverable user error: conversion coefficients are product-specific.
    #[error("product mismatch: expected '{expected}', found '{found}'")]
    ProductMismatch { expected: String, found: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// A quantity of a specific product. Mutated in place by `add`/`subtract`;
/// the stored quantity always stays in this amount's own unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductAmount {
    pub product: Product,
    pub quantity: Quantity,
}

impl ProductAmount {
    pub fn new(product: Product, quantity: Quantity) -> Self {
        Self { product, quantity }
    }

    fn converted_magnitude(&self, other: &ProductAmount) -> Result<Decimal, AmountError> {
        if self.product.id != other.product.id {
            return Err(AmountError::ProductMismatch {
                expected: self.product.name.clone(),
                found: other.product.name.clone(),
            });
        }
        let converted = convert(&other.quantity, &self.quantity.unit, &self.product)?;
        Ok(converted.magnitude)
    }

    /// Adds `other` (converted into this amount's unit) to the magnitude.
    pub fn add(&mut self, other: &ProductAmount) -> Result<(), AmountError> {
        self.quantity.magnitude += self.converted_magnitude(other)?;
        Ok(())
    }

    /// Subtracts `other` (converted into this amount's unit) and reports
    /// whether the remainder is exhausted. The stored magnitude clamps at
    /// zero; callers discard the entry when this returns `true`.
    pub fn subtract(&mut self, other: &ProductAmount) -> Result<bool, AmountError> {
        let remainder = self.quantity.magnitude - self.converted_magnitude(other)?;
        let exhausted = remainder <= Decimal::ZERO;
        self.quantity.magnitude = if exhausted { Decimal::ZERO } else { remainder };
        Ok(exhausted)
    }
}

impl fmt::Display for ProductAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.product.name)
    }
}
