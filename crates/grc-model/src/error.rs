use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown field key: {0}")]
    UnknownFieldKey(String),
    #[error("invalid criticality value: {0}")]
    InvalidCriticality(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
