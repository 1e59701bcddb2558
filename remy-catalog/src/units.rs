use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Name of the distinguished bare COUNT unit ("3 units of egg" displays as "3").
pub const PLAIN_UNIT: &str = "unit";

/// Physical category of a measurement. Units are directly comparable only
/// within one dimension; crossing dimensions needs a product coefficient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dimension {
    Count,
    Mass,
    Volume,
}

impl Dimension {
    /// Name of the base unit each dimension is normalized to.
    pub fn base_unit_name(&self) -> &'static str {
        match self {
            Dimension::Count => PLAIN_UNIT,
            Dimension::Mass => "kilogram",
            Dimension::Volume => "liter",
        }
    }
}

/// A named measurement unit. `base_factor` expresses one of this unit in the
/// dimension's base unit (kilogram for mass, liter for volume, "unit" for
/// count), so same-dimension conversion is a plain ratio.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    pub name: String,
    pub short_name: Option<String>,
    pub dimension: Dimension,
    pub base_factor: Decimal,
}

impl Unit {
    pub fn new(
        name: impl Into<String>,
        short_name: Option<&str>,
        dimension: Dimension,
        base_factor: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.map(str::to_string),
            dimension,
            base_factor,
        }
    }

    /// The universal default count unit, displayed without any unit token.
    pub fn plain() -> Self {
        Self::new(PLAIN_UNIT, None, Dimension::Count, Decimal::ONE)
    }

    pub fn is_plain(&self) -> bool {
        self.dimension == Dimension::Count && self.name == PLAIN_UNIT
    }

    pub fn pluralized_name(&self) -> String {
        format!("{}s", self.name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("unrecognized unit: '{0}'")]
    Unrecognized(String),

    #[error("unit '{0}' is already registered")]
    Duplicate(String),
}

/// Read-only registry of units. Built once (usually via `with_defaults`) and
/// passed explicitly to whatever needs name resolution; many textual aliases
/// map to one canonical unit.
#[derive(Debug, Clone, Default)]
pub struct UnitCatalog {
    units: Vec<Unit>,
    aliases: HashMap<String, usize>,
}

impl UnitCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the metric kitchen units and their common
    /// English and Spanish spellings.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        let units: Vec<(Unit, &[&str])> = vec![
            (Unit::plain(), &["units", "u", "unidad", "unidades"]),
            (
                Unit::new("milligram", Some("mg"), Dimension::Mass, Decimal::new(1, 6)),
                &["mg", "milligrams", "miligramo", "miligramos"],
            ),
            (
                Unit::new("gram", Some("g"), Dimension::Mass, Decimal::new(1, 3)),
                &["g", "grams", "gramo", "gramos"],
            ),
            (
                Unit::new("kilogram", Some("kg"), Dimension::Mass, Decimal::ONE),
                &["kg", "kilograms", "kilo", "kilos", "kilogramo", "kilogramos"],
            ),
            (
                Unit::new("milliliter", Some("mL"), Dimension::Volume, Decimal::new(1, 3)),
                &["ml", "milliliters", "millilitre", "mililitro", "mililitros"],
            ),
            (
                Unit::new("liter", Some("L"), Dimension::Volume, Decimal::ONE),
                &["l", "liters", "litre", "litres", "litro", "litros"],
            ),
            (
                Unit::new("teaspoon", None, Dimension::Volume, Decimal::new(49_289_216, 10)),
                &["tsp", "teaspoons", "cucharadita", "cucharaditas"],
            ),
            (
                Unit::new("tablespoon", None, Dimension::Volume, Decimal::new(147_867_648, 10)),
                &["tbsp", "tablespoons", "cucharada", "cucharadas"],
            ),
            (
                Unit::new("cup", None, Dimension::Volume, Decimal::new(2_365_882_365, 10)),
                &["cups", "taza", "tazas"],
            ),
        ];

        for (unit, aliases) in units {
            // Defaults are disjoint, so registration cannot collide.
            let _ = catalog.register(unit, aliases);
        }
        catalog
    }

    /// Registers a unit under its canonical name, short form, and any extra
    /// aliases. Alias lookups are case-insensitive.
    pub fn register(&mut self, unit: Unit, aliases: &[&str]) -> Result<(), UnitError> {
        if self.aliases.contains_key(&unit.name.to_lowercase()) {
            return Err(UnitError::Duplicate(unit.name.clone()));
        }

        let index = self.units.len();
        self.aliases.insert(unit.name.to_lowercase(), index);
        if let Some(short) = &unit.short_name {
            self.aliases.entry(short.to_lowercase()).or_insert(index);
        }
        for alias in aliases {
            self.aliases.entry(alias.to_lowercase()).or_insert(index);
        }
        self.units.push(unit);
        Ok(())
    }

    /// Resolves a canonical name, short form, or alias to its unit.
    pub fn resolve(&self, name_or_alias: &str) -> Result<&Unit, UnitError> {
        self.aliases
            .get(&name_or_alias.trim().to_lowercase())
            .map(|&index| &self.units[index])
            .ok_or_else(|| UnitError::Unrecognized(name_or_alias.to_string()))
    }

    pub fn dimension(&self, unit: &Unit) -> Dimension {
        unit.dimension
    }

    /// The distinguished bare COUNT unit.
    pub fn plain_unit(&self) -> Unit {
        self.resolve(PLAIN_UNIT).cloned().unwrap_or_else(|_| Unit::plain())
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }
}
