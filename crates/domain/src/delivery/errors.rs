use std::error::Error;
use std::fmt;

// =============================================================================
// Cancelled
// =============================================================================

/// Raised by the selector when its cancellation signal fires mid-run.
///
/// No partial result accompanies this error; the caller is expected to
/// abandon the surrounding transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "plan selection cancelled")
    }
}

impl Error for Cancelled {}

// =============================================================================
// Tests
// =============================================================================
