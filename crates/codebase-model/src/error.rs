use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    #[error("unknown codeset type: {0}")]
    UnknownCodeset(String),
    #[error("unknown CVX concept type: {0}")]
    UnknownConceptType(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
