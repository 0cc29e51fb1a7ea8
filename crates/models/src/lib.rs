//! Inventory domain types.
//! - `Product` is the persisted record; `total()` is always derived.
//! - `ProductInput` is the validated value object the store accepts.
//! - `ProductForm` turns raw text fields into a `ProductInput`.

pub mod errors;
pub mod form;
pub mod product;
pub mod summary;

pub use errors::ModelError;
pub use form::ProductForm;
pub use product::{Product, ProductId, ProductInput, CATEGORIES, DEFAULT_CATEGORY};
pub use summary::Summary;
