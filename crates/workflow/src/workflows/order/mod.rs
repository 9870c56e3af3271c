//! Order workflows: placement and history listing.

mod commands;
mod list_orders;
mod place_orders;

pub use commands::{OrderLine, PlaceOrdersCommand};
pub use list_orders::list_orders;
pub use place_orders::place_orders;
