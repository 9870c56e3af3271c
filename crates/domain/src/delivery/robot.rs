use std::fmt;

use crate::common::ValidationError;

// =============================================================================
// RobotId
// =============================================================================

/// Identifier a robot presents when requesting a delivery plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RobotId(String);

impl RobotId {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_value("robot_id"));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RobotId {
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
    fn new_accepts_non_empty_value() {
        let id = RobotId::new("robot-7").unwrap();
        assert_eq!(id.as_str(), "robot-7");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn new_rejects_blank_values(#[case] value: &str) {
        assert!(RobotId::new(value).is_err());
    }
}
