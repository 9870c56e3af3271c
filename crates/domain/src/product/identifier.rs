use std::fmt;

use crate::common::ValidationError;

// =============================================================================
// ProductId
// =============================================================================

/// Identifier of a catalogued product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::out_of_range(
                "product_id",
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

impl fmt::Display for ProductId {
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

    #[rstest]
    fn new_accepts_positive_values() {
        assert_eq!(ProductId::new(3).unwrap().value(), 3);
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn new_rejects_non_positive_values(#[case] value: i64) {
        assert!(ProductId::new(value).is_err());
    }
}
