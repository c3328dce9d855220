use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FreeformError {
    #[error("Parameter out of domain: {0}")]
    ParameterOutOfDomain(String),

    #[error("Unsupported derivative order: {0}")]
    UnsupportedOrder(String),

    #[error("Unsupported degree {degree}: binomial table covers degrees up to {max}")]
    UnsupportedDegree { degree: usize, max: usize },

    #[error("Invalid knot: {0}")]
    InvalidKnot(String),

    #[error("Invalid knot vector: {0}")]
    InvalidKnotVector(String),

    #[error("Invalid control grid: {0}")]
    InvalidControlGrid(String),
}

pub type Result<T> = std::result::Result<T, FreeformError>;
