use std::fmt;
use std::str::FromStr;

use crate::common::ValidationError;

// =============================================================================
// OrderStatus
// =============================================================================

/// Lifecycle state of an order.
///
/// Orders are created in [`OrderStatus::Shipping`], move to
/// [`OrderStatus::Delivering`] when a robot claims them through a
/// delivery plan, and end in [`OrderStatus::Delivered`] when the robot
/// reports completion. No other transitions are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Awaiting robot pickup.
    Shipping,
    /// Assigned to a robot.
    Delivering,
    /// Delivery reported complete.
    Delivered,
}

impl OrderStatus {
    /// Returns the storage representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shipping => "shipping",
            Self::Delivering => "delivering",
            Self::Delivered => "delivered",
        }
    }

    /// Returns true if the transition to `next` is a valid lifecycle step.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Shipping, Self::Delivering) | (Self::Delivering, Self::Delivered)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "shipping" => Ok(Self::Shipping),
            "delivering" => Ok(Self::Delivering),
            "delivered" => Ok(Self::Delivered),
            _ => Err(ValidationError::invalid_format(
                "shipped_status",
                "shipping|delivering|delivered",
            )),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OrderStatus::Shipping, "shipping")]
    #[case(OrderStatus::Delivering, "delivering")]
    #[case(OrderStatus::Delivered, "delivered")]
    fn as_str_matches_storage_representation(#[case] status: OrderStatus, #[case] expected: &str) {
        assert_eq!(status.as_str(), expected);
    }

    #[rstest]
    #[case("shipping", OrderStatus::Shipping)]
    #[case("delivering", OrderStatus::Delivering)]
    #[case("delivered", OrderStatus::Delivered)]
    fn from_str_parses_valid_values(#[case] input: &str, #[case] expected: OrderStatus) {
        assert_eq!(input.parse::<OrderStatus>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("returned")]
    #[case("Shipping")]
    fn from_str_rejects_unknown_values(#[case] input: &str) {
        assert!(input.parse::<OrderStatus>().is_err());
    }

    #[rstest]
    fn roundtrip_through_storage_representation() {
        for status in [
            OrderStatus::Shipping,
            OrderStatus::Delivering,
            OrderStatus::Delivered,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[rstest]
    #[case(OrderStatus::Shipping, OrderStatus::Delivering, true)]
    #[case(OrderStatus::Delivering, OrderStatus::Delivered, true)]
    #[case(OrderStatus::Shipping, OrderStatus::Delivered, false)]
    #[case(OrderStatus::Delivered, OrderStatus::Shipping, false)]
    #[case(OrderStatus::Delivering, OrderStatus::Shipping, false)]
    fn can_transition_to_allows_only_lifecycle_steps(
        #[case] from: OrderStatus,
        #[case] to: OrderStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(from.can_transition_to(to), expected);
    }
}
