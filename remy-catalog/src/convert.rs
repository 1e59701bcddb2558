use rust_decimal::Decimal;

use crate::product::Product;
use crate::quantity::Quantity;
use crate::units::{Dimension, Unit};

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(
        "cannot relate {from:?} and {to:?} for product '{product}': missing {coefficient}"
    )]
    DimensionMismatch {
        product: String,
        from: Dimension,
        to: Dimension,
        coefficient: &'static str,
    },
}

/// Converts a quantity into `target`'s unit. Same-dimension conversions use
/// the units' fixed base-factor ratio; cross-dimension conversions bridge
/// through the product coefficient selected by the dimension pair. The result
/// always carries `target` itself, so repeated conversions stay in one unit.
pub fn convert(
    quantity: &Quantity,
    target: &Unit,
    product: &Product,
) -> Result<Quantity, ConversionError> {
    if quantity.unit == *target {
        return Ok(quantity.clone());
    }

    let base = quantity.magnitude * quantity.unit.base_factor;
    let bridged = bridge(base, quantity.unit.dimension, target.dimension, product)?;

    Ok(Quantity::new(bridged / target.base_factor, target.clone()))
}

/// Carries a magnitude expressed in `from`'s base unit over to `to`'s base
/// unit. Density is kg per cubic meter while the volume base is the liter,
/// hence the factor of 1000.
fn bridge(
    base: Decimal,
    from: Dimension,
    to: Dimension,
    product: &Product,
) -> Result<Decimal, ConversionError> {
    let missing = |coefficient: &'static str| ConversionError::DimensionMismatch {
        product: product.name.clone(),
        from,
        to,
        coefficient,
    };

    match (from, to) {
        (Dimension::Count, Dimension::Count)
        | (Dimension::Mass, Dimension::Mass)
        | (Dimension::Volume, Dimension::Volume) => Ok(base),

        (Dimension::Volume, Dimension::Mass) => {
            let density = coefficient(product.density).ok_or_else(|| missing("density"))?;
            Ok(base * density / Decimal::from(1000))
        }
        (Dimension::Mass, Dimension::Volume) => {
            let density = coefficient(product.density).ok_or_else(|| missing("density"))?;
            Ok(base * Decimal::from(1000) / density)
        }

        (Dimension::Count, Dimension::Mass) => {
            let weight =
                coefficient(product.avg_unit_weight).ok_or_else(|| missing("avg_unit_weight"))?;
            Ok(base * weight)
        }
        (Dimension::Mass, Dimension::Count) => {
            let weight =
                coefficient(product.avg_unit_weight).ok_or_else(|| missing("avg_unit_weight"))?;
            Ok(base / weight)
        }

        (Dimension::Count, Dimension::Volume) => {
            let volume =
                coefficient(product.avg_unit_volume).ok_or_else(|| missing("avg_unit_volume"))?;
            Ok(base * volume)
        }
        (Dimension::Volume, Dimension::Count) => {
            let volume =
                coefficient(product.avg_unit_volume).ok_or_else(|| missing("avg_unit_volume"))?;
            Ok(base / volume)
        }
    }
}

/// A zero coefficient is treated as absent: dividing by it is meaningless
/// and the conversion must fail closed.
fn coefficient(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}
