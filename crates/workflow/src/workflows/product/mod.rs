//! Product workflows: catalogue listing and lookup.

mod list_products;

pub use list_products::{get_product, list_products};
