use crate::rule_based::GroundingFailure;
use crate::solver::ComplexityLimitExceeded;
use std::fmt::{Display, Error, Formatter};

impl From<ComplexityLimitExceeded> for GroundingFailure {
    fn from(error: ComplexityLimitExceeded) -> Self {
        GroundingFailure::TooComplex(error)
    }
}

impl Display for GroundingFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            GroundingFailure::InconsistentStructure(message) => write!(f, "{}", message),
            GroundingFailure::TooComplex(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for GroundingFailure {}
