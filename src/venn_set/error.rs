/// An error which is returned when an enumeration would produce more than the allowed
/// number of assignments (or candidate solutions).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ComplexityLimitExceeded {
    limit: usize,
}

impl ComplexityLimitExceeded {
    /// Create a new error instance with the given limit.
    pub fn new(limit: usize) -> ComplexityLimitExceeded {
        ComplexityLimitExceeded { limit }
    }

    /// The limit that was exceeded.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl std::fmt::Display for ComplexityLimitExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity limit of {} assignments exceeded.", self.limit)
    }
}

impl std::error::Error for ComplexityLimitExceeded {}
