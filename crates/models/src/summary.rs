use std::fmt;

use serde::Serialize;

use crate::product::Product;

/// Aggregate figures over a collection, computed on demand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub total_quantity: u64,
    pub total_value: f64,
}

impl Summary {
    pub fn of(products: &[Product]) -> Self {
        products.iter().fold(Self::default(), |acc, p| Self {
            count: acc.count + 1,
            total_quantity: acc.total_quantity + u64::from(p.quantity),
            total_value: acc.total_value + p.total(),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Items: {}  Total Qty: {}  Inventory Value: {:.2}",
            self.count, self.total_quantity, self.total_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductInput;

    #[test]
    fn empty_collection_is_all_zero() {
        assert_eq!(Summary::of(&[]), Summary::default());
    }

    #[test]
    fn folds_count_quantity_and_value() {
        let products = vec![
            ProductInput::new(1, "Mouse", Some("Electronics"), 1500.0, 10).into_product().expect("valid"),
            ProductInput::new(2, "Rice", Some("Grocery"), 2.5, 4).into_product().expect("valid"),
        ];
        let s = Summary::of(&products);
        assert_eq!(s.count, 2);
        assert_eq!(s.total_quantity, 14);
        assert_eq!(s.total_value, 15010.0);
        assert_eq!(s.to_string(), "Items: 2  Total Qty: 14  Inventory Value: 15010.00");
    }
}
