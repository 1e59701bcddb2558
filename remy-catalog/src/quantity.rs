use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::units::Unit;

/// An immutable physical amount: a decimal magnitude tagged with a unit.
/// Arithmetic lives in the converter and in `ProductAmount`; this type only
/// carries the value and knows how to render itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quantity {
    pub magnitude: Decimal,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(magnitude: Decimal, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// Magnitude rounded to at most two decimal places, trailing zeros
    /// stripped.
    pub fn display_magnitude(&self) -> Decimal {
        self.magnitude.round_dp(2).normalize()
    }

    /// Unit token for display: nothing for the bare count unit, the short
    /// form when there is one, otherwise the (possibly pluralized) name.
    fn unit_token(&self) -> Option<String> {
        if self.unit.is_plain() {
            return None;
        }
        if let Some(short) = &self.unit.short_name {
            return Some(short.clone());
        }
        if self.display_magnitude() == Decimal::ONE {
            Some(self.unit.name.clone())
        } else {
            Some(self.unit.pluralized_name())
        }
    }

    pub fn to_display(&self) -> String {
        match self.unit_token() {
            Some(token) => format!("{} {}", self.display_magnitude(), token),
            None => self.display_magnitude().to_string(),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitCatalog;
    use rust_decimal_macros::dec;

    fn catalog() -> UnitCatalog {
        UnitCatalog::with_defaults()
    }

    #[test]
    fn test_plain_unit_displays_magnitude_only() {
        let qty = Quantity::new(dec!(3), catalog().plain_unit());

        assert_eq!(qty.to_display(), "3");
    }

    #[test]
    fn test_short_named_units_use_short_form() {
        let catalog = catalog();
        let kg = Quantity::new(dec!(3.14), catalog.resolve("kg").unwrap().clone());
        let liter = Quantity::new(dec!(2.718), catalog.resolve("L").unwrap().clone());

        assert_eq!(kg.to_display(), "3.14 kg");
        // 2.718 rounds to two decimals for display
        assert_eq!(liter.to_display(), "2.72 L");
    }

    #[test]
    fn test_unshortened_units_pluralize_when_magnitude_is_not_one() {
        let cup = catalog().resolve("cup").unwrap().clone();

        assert_eq!(Quantity::new(dec!(108), cup.clone()).to_display(), "108 cups");
        assert_eq!(Quantity::new(dec!(1.000), cup.clone()).to_display(), "1 cup");
        assert_eq!(Quantity::new(dec!(0.026), cup.clone()).to_display(), "0.03 cups");
        assert_eq!(Quantity::new(dec!(1), cup).to_display(), "1 cup");
    }

    #[test]
    fn test_trailing_zeros_are_stripped() {
        let liter = catalog().resolve("L").unwrap().clone();

        assert_eq!(Quantity::new(dec!(2.00), liter.clone()).to_display(), "2 L");
        assert_eq!(Quantity::new(dec!(0.50), liter).to_display(), "0.5 L");
    }

    #[test]
    fn test_display_is_idempotent() {
        let kg = catalog().resolve("kg").unwrap().clone();
        let qty = Quantity::new(dec!(1.005), kg);

        let first = qty.to_display();
        let second = qty.to_display();
        assert_eq!(first, second);
    }
}
