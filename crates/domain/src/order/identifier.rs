use std::fmt;

use crate::common::ValidationError;

// =============================================================================
// OrderId
// =============================================================================

/// Identifier of a persisted order.
///
/// Order identifiers are monotone positive integers assigned by the
/// storage layer at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderId(i64);

impl OrderId {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::out_of_range(
                "order_id",
                1,
                i64::MAX,
                value,
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// UserId
// =============================================================================

/// Identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::out_of_range("user_id", 1, i64::MAX, value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod order_id {
        use super::*;

        #[rstest]
        fn new_accepts_positive_values() {
            let id = OrderId::new(42).unwrap();
            assert_eq!(id.value(), 42);
        }

        #[rstest]
        #[case(0)]
        #[case(-1)]
        fn new_rejects_non_positive_values(#[case] value: i64) {
            assert!(OrderId::new(value).is_err());
        }

        #[rstest]
        fn display_formats_value() {
            let id = OrderId::new(7).unwrap();
            assert_eq!(format!("{}", id), "7");
        }

        #[rstest]
        fn ordering_follows_value() {
            let earlier = OrderId::new(1).unwrap();
            let later = OrderId::new(2).unwrap();
            assert!(earlier < later);
        }
    }

    mod user_id {
        use super::*;

        #[rstest]
        fn new_accepts_positive_values() {
            let id = UserId::new(9).unwrap();
            assert_eq!(id.value(), 9);
        }

        #[rstest]
        fn new_rejects_zero() {
            assert!(UserId::new(0).is_err());
        }
    }
}
