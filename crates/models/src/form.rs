//! Raw text fields as typed by a user, before any parsing.

use crate::errors::ModelError;
use crate::product::{ProductInput, CATEGORIES};

/// Unparsed product fields. `parse` reports the first bad field only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: String,
    pub quantity: String,
}

impl ProductForm {
    pub fn parse(&self) -> Result<ProductInput, ModelError> {
        let id = self
            .id
            .trim()
            .parse::<i32>()
            .map_err(|_| ModelError::Parse("Invalid ID. Enter a number.".into()))?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(ModelError::Parse("Name cannot be empty.".into()));
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ModelError::Parse("Invalid price. Enter a numeric value.".into()))?;
        if price < 0.0 {
            return Err(ModelError::Parse("Price cannot be negative.".into()));
        }

        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .map_err(|_| ModelError::Parse("Invalid quantity. Enter a number.".into()))?;
        if quantity < 0 {
            return Err(ModelError::Parse("Quantity cannot be negative.".into()));
        }

        Ok(ProductInput {
            id,
            name: name.to_string(),
            category: self.category.as_deref().map(canonical_category),
            price,
            quantity,
        })
    }
}

/// Known categories keep their canonical spelling; anything else is kept trimmed.
fn canonical_category(raw: &str) -> String {
    let trimmed = raw.trim();
    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(trimmed))
        .map(|c| c.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
