use std::fmt::Write;

use models::{Product, Summary};

/// Grid of products with a derived Total column.
pub fn table(products: &[Product]) -> String {
    if products.is_empty() {
        return "(no products)\n".to_string();
    }
    let name_w = products.iter().map(|p| p.name.chars().count()).max().unwrap_or(0).max(4);
    let cat_w = products.iter().map(|p| p.category.chars().count()).max().unwrap_or(0).max(8);
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<name_w$}  {:<cat_w$}  {:>12}  {:>8}  {:>14}",
        "Id", "Name", "Category", "Price", "Qty", "Total"
    );
    for p in products {
        let _ = writeln!(out, "{}", row(p, name_w, cat_w));
    }
    out
}

fn row(p: &Product, name_w: usize, cat_w: usize) -> String {
    format!(
        "{:>6}  {:<name_w$}  {:<cat_w$}  {:>12.2}  {:>8}  {:>14.2}",
        p.id,
        p.name,
        p.category,
        p.price,
        p.quantity,
        p.total()
    )
}

pub fn summary(s: &Summary) -> String {
    format!("{s}\n")
}
