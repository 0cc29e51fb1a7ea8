use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub type ProductId = i32;

/// Category assigned when the caller does not pick one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Categories offered to the user; `DEFAULT_CATEGORY` is always last.
pub const CATEGORIES: [&str; 5] = ["Electronics", "Grocery", "Stationery", "Clothing", DEFAULT_CATEGORY];

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// One inventory entry as held by the store and written to disk.
///
/// Field names are serialized in PascalCase so existing `products.json`
/// files keep loading.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

impl Product {
    /// `price × quantity`, never stored.
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Check the record-level invariants: non-empty name, finite non-negative price.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }

    /// Case-insensitive substring match on name or category.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.id, self.name, self.category)
    }
}

/// Typed values for a create or update, before the store accepts them.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductInput {
    pub id: ProductId,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

impl ProductInput {
    pub fn new(id: ProductId, name: impl Into<String>, category: Option<&str>, price: f64, quantity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.map(str::to_string),
            price,
            quantity,
        }
    }

    /// Validate and build the record. A missing or blank category becomes
    /// `DEFAULT_CATEGORY`.
    pub fn into_product(self) -> Result<Product, ModelError> {
        let name = self.name.trim().to_string();
        validate_name(&name)?;
        validate_price(self.price)?;
        if self.quantity < 0 {
            return Err(ModelError::Validation("quantity cannot be negative".into()));
        }
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| ModelError::Validation("quantity is too large".into()))?;
        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(default_category);
        Ok(Product { id: self.id, name, category, price: self.price, quantity })
    }
}

impl From<&Product> for ProductInput {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            category: Some(p.category.clone()),
            price: p.price,
            quantity: i64::from(p.quantity),
        }
    }
}

fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name cannot be empty".into()));
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ModelError> {
    if !price.is_finite() {
        return Err(ModelError::Validation("price must be a finite number".into()));
    }
    if price < 0.0 {
        return Err(ModelError::Validation("price cannot be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse() -> Product {
        ProductInput::new(1, "Mouse", Some("Electronics"), 1500.0, 10)
            .into_product()
            .expect("valid")
    }

    #[test]
    fn total_is_price_times_quantity() {
        assert_eq!(mouse().total(), 15000.0);
    }

    #[test]
    fn missing_or_blank_category_defaults_to_other() {
        let p = ProductInput::new(2, "Pen", None, 1.0, 1).into_product().expect("valid");
        assert_eq!(p.category, DEFAULT_CATEGORY);
        let p = ProductInput::new(3, "Pen", Some("   "), 1.0, 1).into_product().expect("valid");
        assert_eq!(p.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn name_is_trimmed_and_required() {
        let p = ProductInput::new(1, "  Mouse ", None, 0.0, 0).into_product().expect("valid");
        assert_eq!(p.name, "Mouse");
        assert!(matches!(
            ProductInput::new(1, "  ", None, 0.0, 0).into_product(),
            Err(ModelError::Validation(_))
        ));
    }

    #[test]
    fn negative_or_non_finite_values_are_rejected() {
        assert!(ProductInput::new(1, "A", None, -0.01, 0).into_product().is_err());
        assert!(ProductInput::new(1, "A", None, f64::NAN, 0).into_product().is_err());
        assert!(ProductInput::new(1, "A", None, f64::INFINITY, 0).into_product().is_err());
        assert!(ProductInput::new(1, "A", None, 1.0, -1).into_product().is_err());
        assert!(ProductInput::new(1, "A", None, 1.0, i64::from(u32::MAX) + 1).into_product().is_err());
    }

    #[test]
    fn validate_catches_records_built_directly() {
        let mut p = mouse();
        p.name = String::new();
        assert!(p.validate().is_err());
        let mut p = mouse();
        p.price = -5.0;
        assert!(p.validate().is_err());
        assert!(mouse().validate().is_ok());
    }

    #[test]
    fn matches_name_or_category_case_insensitively() {
        let p = mouse();
        assert!(p.matches("mou"));
        assert!(p.matches("elec"));
        assert!(!p.matches("grocery"));
    }

    #[test]
    fn display_shows_id_name_and_category() {
        assert_eq!(mouse().to_string(), "1 - Mouse (Electronics)");
    }

    #[test]
    fn serializes_with_pascal_case_fields() -> Result<(), anyhow::Error> {
        let json = serde_json::to_value(mouse())?;
        assert_eq!(
            json,
            serde_json::json!({"Id": 1, "Name": "Mouse", "Category": "Electronics", "Price": 1500.0, "Quantity": 10})
        );
        let back: Product = serde_json::from_str(r#"{"Id":4,"Name":"Rice","Price":2.5,"Quantity":3}"#)?;
        assert_eq!(back.category, DEFAULT_CATEGORY);
        Ok(())
    }

    #[test]
    fn input_round_trips_from_product() {
        let p = mouse();
        assert_eq!(ProductInput::from(&p).into_product().expect("valid"), p);
    }
}
