//! Delivery subdomain: robot identity, delivery plans and the plan
//! selector.

mod bitset;
mod errors;
mod plan;
mod robot;
mod selector;

pub use errors::Cancelled;
pub use plan::{DeliveryPlan, ShippingOrder};
pub use robot::RobotId;
pub use selector::{select_orders, CHECK_EVERY};
