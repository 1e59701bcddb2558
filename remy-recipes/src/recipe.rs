use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use remy_catalog::{Product, ProductAmount, Quantity};

/// One line of a recipe's ingredient list. The quantity is absent for
/// uncounted ingredients ("a pinch of salt"); those never touch the
/// inventory arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub product: Product,
    pub quantity: Option<Quantity>,
    pub notes: String,
    pub section: String,
}

impl Ingredient {
    pub fn new(product: Product, quantity: Option<Quantity>) -> Self {
        Self {
            product,
            quantity,
            notes: String::new(),
            section: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    /// The depletable amount, when this ingredient is quantified.
    pub fn to_amount(&self) -> Option<ProductAmount> {
        self.quantity
            .clone()
            .map(|quantity| ProductAmount::new(self.product.clone(), quantity))
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.quantity {
            Some(quantity) => write!(f, "{} {}", quantity, self.product.name)?,
            None => write!(f, "{}", self.product.name)?,
        }
        if !self.notes.is_empty() {
            write!(f, " ({})", self.notes)?;
        }
        Ok(())
    }
}

/// A recipe: ordered ingredients plus step-by-step instructions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub instructions: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            instructions: Vec::new(),
            ingredients: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
        self.updated_at = Utc::now();
    }

    /// Example output: "1. Foo\n\n2. Bar\n\n3. Baz".
    pub fn displayable_steps(&self) -> String {
        self.instructions
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {}", i + 1, step))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Ingredient lines grouped by section, sections in first-appearance
    /// order, unsectioned lines first.
    pub fn displayable_ingredients(&self) -> String {
        let mut sections: Vec<(String, Vec<String>)> = Vec::new();
        for ingredient in &self.ingredients {
            let line = format!("- {}", ingredient);
            match sections.iter_mut().find(|(name, _)| *name == ingredient.section) {
                Some((_, lines)) => lines.push(line),
                None => sections.push((ingredient.section.clone(), vec![line])),
            }
        }

        sections
            .into_iter()
            .map(|(name, lines)| {
                if name.is_empty() {
                    lines.join("\n")
                } else {
                    format!("{}:\n{}", name, lines.join("\n"))
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
