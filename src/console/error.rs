use crate::client_core;
use crate::entities::StringIdentifierError;

/// Input rejected before anything is sent.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Paths is empty")]
    EmptyPaths,

    #[error("Invalidation ID is empty")]
    EmptyInvalidationId,

    #[error("Invalidation ID is invalid: {0}")]
    BadInvalidationId(StringIdentifierError),

    #[error("Distribution is empty")]
    EmptyDistribution,

    #[error("Distribution is invalid: {0}")]
    BadDistribution(StringIdentifierError),
}

#[derive(thiserror::Error, Debug)]
pub enum OperationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] client_core::Error),
}

impl OperationError {
    pub fn is_validation(&self) -> bool {
        matches!(self, OperationError::Validation(_))
    }
}
