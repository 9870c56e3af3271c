//! HTTP handlers, grouped by surface.

mod auth;
mod health;
mod orders;
mod products;
mod robot;

pub use auth::{login, logout};
pub use health::health;
pub use orders::{create_orders, list_orders};
pub use products::{get_product, list_products};
pub use robot::{generate_plan, update_order_status};
