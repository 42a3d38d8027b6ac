use crate::catalog::ConditionId;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// A match referenced a condition the catalog does not hold.
    #[error("condition {0} is not in the catalog")]
    UnknownCondition(ConditionId),
    #[error("unknown condition id: {0}")]
    UnknownConditionId(String),
    #[error("condition {0} is declared more than once")]
    DuplicateCondition(ConditionId),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to serialize session log: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to write session log: {0}")]
    FileWrite(std::io::Error),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
